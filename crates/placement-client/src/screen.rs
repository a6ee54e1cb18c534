//! What every screen shares: where it is, how it talks to the user, and how
//! it runs background work.

use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;

use placement_shared::{Role, UserId};
use placement_store::DocumentStore;

use crate::busy::BusyIndicator;
use crate::dispatch::{DispatchHandle, Dispatcher};
use crate::error::{ClientError, Result};
use crate::events::{AlertLevel, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Login,
    SignUp,
    CandidateDashboard,
    RecruiterDashboard,
    CandidateProfile,
}

impl ScreenId {
    /// The landing screen for a signed-in user.
    pub fn dashboard_for(role: Role) -> Self {
        match role {
            Role::Candidate => Self::CandidateDashboard,
            Role::Recruiter => Self::RecruiterDashboard,
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Login => "login",
            Self::SignUp => "sign-up",
            Self::CandidateDashboard => "candidate-dashboard",
            Self::RecruiterDashboard => "recruiter-dashboard",
            Self::CandidateProfile => "candidate-profile",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenParams {
    pub user_id: Option<UserId>,
}

impl ScreenParams {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }
}

pub trait Navigator {
    fn show_screen(&self, screen: ScreenId, params: ScreenParams);
}

// ---------------------------------------------------------------------------
// Generation tokens
// ---------------------------------------------------------------------------

/// Generation counter for the one visible screen.
#[derive(Debug, Clone, Default)]
pub struct ScreenSlot {
    generation: Rc<Cell<u64>>,
}

impl ScreenSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation; tokens from earlier ones go stale.
    pub fn advance(&self) -> ScreenToken {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        ScreenToken {
            slot: self.clone(),
            generation,
        }
    }

    pub fn current(&self) -> u64 {
        self.generation.get()
    }
}

#[derive(Debug, Clone)]
pub struct ScreenToken {
    slot: ScreenSlot,
    generation: u64,
}

impl ScreenToken {
    pub fn is_current(&self) -> bool {
        self.slot.current() == self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

// ---------------------------------------------------------------------------
// ScreenContext
// ---------------------------------------------------------------------------

/// Per-screen handle bundling the store, dispatcher, busy indicator and
/// message sinks.
#[derive(Clone)]
pub struct ScreenContext {
    store: Arc<dyn DocumentStore>,
    dispatcher: Dispatcher,
    busy: BusyIndicator,
    notifier: Rc<dyn Notifier>,
    navigator: Rc<dyn Navigator>,
    token: ScreenToken,
}

impl ScreenContext {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        dispatcher: Dispatcher,
        notifier: Rc<dyn Notifier>,
        navigator: Rc<dyn Navigator>,
        token: ScreenToken,
    ) -> Self {
        Self {
            store,
            dispatcher,
            busy: BusyIndicator::new(),
            notifier,
            navigator,
            token,
        }
    }

    pub fn store(&self) -> Arc<dyn DocumentStore> {
        Arc::clone(&self.store)
    }

    pub fn busy(&self) -> &BusyIndicator {
        &self.busy
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn is_current(&self) -> bool {
        self.token.is_current()
    }

    /// Show the busy indicator, run `work` on the pool, and hand the outcome
    /// to `on_complete` on the presentation thread.
    ///
    /// The indicator is hidden before `on_complete` runs.  If the screen was
    /// replaced meanwhile the outcome is dropped and `on_complete` never runs.
    pub fn run<T, W, C>(&self, operation: &'static str, work: W, on_complete: C) -> DispatchHandle
    where
        T: Send + 'static,
        W: Future<Output = Result<T>> + Send + 'static,
        C: FnOnce(Result<T>) + 'static,
    {
        let busy = self.busy.show();
        let token = self.token.clone();
        tracing::debug!(operation, generation = token.generation(), "dispatching");

        self.dispatcher.dispatch(work, move |outcome| {
            drop(busy);
            if !token.is_current() {
                tracing::debug!(operation, "screen replaced, dropping result");
                return;
            }
            on_complete(outcome);
        })
    }

    pub fn info(&self, title: &str, message: &str) {
        self.notifier.alert(AlertLevel::Info, title, message);
    }

    pub fn error(&self, title: &str, message: &str) {
        self.notifier.alert(AlertLevel::Error, title, message);
    }

    /// Log a failed operation and show it as an error alert.
    pub fn report(&self, title: &str, err: &ClientError) {
        tracing::warn!(title, error = %err, "operation failed");
        self.error(title, &err.to_string());
    }

    pub fn navigate(&self, screen: ScreenId, params: ScreenParams) {
        tracing::debug!(%screen, "navigating");
        self.navigator.show_screen(screen, params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_makes_older_tokens_stale() {
        let slot = ScreenSlot::new();
        let first = slot.advance();
        assert!(first.is_current());

        let second = slot.advance();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn test_dashboard_for_role() {
        assert_eq!(
            ScreenId::dashboard_for(Role::Candidate),
            ScreenId::CandidateDashboard
        );
        assert_eq!(
            ScreenId::dashboard_for(Role::Recruiter),
            ScreenId::RecruiterDashboard
        );
    }
}
