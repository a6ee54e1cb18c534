//! Application-wide handles shared by every screen.
//!
//! Built once at startup.  The store is injected here and handed down to
//! every screen and service, so nothing can reach it before it exists.

use std::rc::Rc;
use std::sync::Arc;

use placement_store::DocumentStore;

use crate::auth::AuthService;
use crate::dispatch::Dispatcher;
use crate::events::Notifier;
use crate::offers::OfferLifecycle;
use crate::screen::{Navigator, ScreenContext, ScreenToken};

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn DocumentStore>,
    dispatcher: Dispatcher,
    notifier: Rc<dyn Notifier>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        dispatcher: Dispatcher,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            dispatcher,
            notifier,
        }
    }

    pub fn store(&self) -> Arc<dyn DocumentStore> {
        Arc::clone(&self.store)
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// A fresh context for one screen generation, with its own busy
    /// indicator.
    pub fn screen_context(&self, token: ScreenToken, navigator: Rc<dyn Navigator>) -> ScreenContext {
        ScreenContext::new(
            self.store(),
            self.dispatcher.clone(),
            Rc::clone(&self.notifier),
            navigator,
            token,
        )
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.store())
    }

    pub fn offers(&self) -> OfferLifecycle {
        OfferLifecycle::new(self.store())
    }
}
