//! User-visible messages.
//!
//! Screens never render; they push alerts through a [`Notifier`] supplied by
//! the view layer.  [`LogNotifier`] is the headless default.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Error,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => f.write_str("info"),
            Self::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
}

/// Sink for alerts.  Called only on the presentation thread.
pub trait Notifier {
    fn alert(&self, level: AlertLevel, title: &str, message: &str);
}

/// Writes alerts to the log instead of showing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, level: AlertLevel, title: &str, message: &str) {
        match level {
            AlertLevel::Info => tracing::info!(title, message, "alert"),
            AlertLevel::Error => tracing::warn!(title, message, "alert"),
        }
    }
}
