//! Recording stand-ins for the view layer, for tests and headless runs.

use std::cell::RefCell;

use crate::events::{Alert, AlertLevel, Notifier};
use crate::screen::{Navigator, ScreenId, ScreenParams};

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    alerts: RefCell<Vec<Alert>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.borrow().clone()
    }

    pub fn last(&self) -> Option<Alert> {
        self.alerts.borrow().last().cloned()
    }

    pub fn errors(&self) -> Vec<Alert> {
        self.alerts
            .borrow()
            .iter()
            .filter(|a| a.level == AlertLevel::Error)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.alerts.borrow_mut().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, level: AlertLevel, title: &str, message: &str) {
        self.alerts.borrow_mut().push(Alert {
            level,
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: RefCell<Vec<(ScreenId, ScreenParams)>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<(ScreenId, ScreenParams)> {
        self.visits.borrow().clone()
    }

    pub fn last(&self) -> Option<(ScreenId, ScreenParams)> {
        self.visits.borrow().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn show_screen(&self, screen: ScreenId, params: ScreenParams) {
        self.visits.borrow_mut().push((screen, params));
    }
}
