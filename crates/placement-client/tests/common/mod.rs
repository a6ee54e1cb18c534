#![allow(dead_code)]

// Shared harness for the integration tests.

use std::rc::Rc;
use std::sync::Arc;

use placement_client_lib::auth::AuthService;
use placement_client_lib::dispatch::{Dispatcher, WorkerPool};
use placement_client_lib::screen::{ScreenContext, ScreenSlot};
use placement_client_lib::state::AppState;
use placement_client_lib::testing::{RecordingNavigator, RecordingNotifier};
use placement_shared::validation::Registration;
use placement_shared::{Role, UserId};
use placement_store::MemoryStore;

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub state: AppState,
    pub notifier: Rc<RecordingNotifier>,
    pub navigator: Rc<RecordingNavigator>,
}

impl Harness {
    /// Must be called inside a `LocalSet` on a tokio runtime.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        let notifier = Rc::new(RecordingNotifier::new());
        let navigator = Rc::new(RecordingNavigator::new());
        let dispatcher = Dispatcher::new(WorkerPool::current(4));
        let state = AppState::new(store.clone(), dispatcher, notifier.clone());
        Self {
            store,
            state,
            notifier,
            navigator,
        }
    }

    /// A context on its own slot, so it stays current.
    pub fn context(&self) -> ScreenContext {
        self.context_in(&ScreenSlot::new())
    }

    pub fn context_in(&self, slot: &ScreenSlot) -> ScreenContext {
        self.state
            .screen_context(slot.advance(), self.navigator.clone())
    }

    pub async fn settle(&self) {
        self.state.dispatcher().settle().await;
    }

    pub async fn register(&self, name: &str, email: &str, role: Role) -> UserId {
        AuthService::new(self.store.clone())
            .register(&Registration {
                name: name.into(),
                email: email.into(),
                password: "secret-pass".into(),
                role,
                company_name: (role == Role::Recruiter).then(|| "Acme".to_string()),
            })
            .await
            .expect("register")
            .expect("fresh email")
    }
}
