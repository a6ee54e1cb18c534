//! # placement-client
//!
//! Presentation core of Placement Desk.  Screens keep `!Send` observable
//! state on a single presentation thread and push every store access to a
//! bounded worker pool through the [`dispatch::Dispatcher`].

pub mod app;
pub mod auth;
pub mod busy;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod filter;
pub mod host;
pub mod observable;
pub mod offers;
pub mod runtime;
pub mod screen;
pub mod screens;
pub mod state;
pub mod testing;

use std::rc::Rc;

use tracing_subscriber::{fmt, EnvFilter};

pub use app::App;
pub use config::ClientConfig;
pub use error::{ClientError, Result};

use crate::events::LogNotifier;

/// Install the global subscriber.  `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("placement_client_lib=debug,placement_store=info,warn")
    });

    // Ignore a second install (tests, embedding hosts).
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Headless entry point: open the configured store, show the login screen,
/// and log alerts instead of displaying them.
pub fn run() -> anyhow::Result<()> {
    init_tracing();
    tracing::info!("Starting {}", placement_shared::constants::APP_NAME);

    let config = ClientConfig::from_env();
    tracing::info!(?config, "Loaded configuration");

    let app = App::open(config)?;
    app.run(Rc::new(LogNotifier), |host| async move {
        tracing::info!(screen = ?host.current_id(), "presentation thread idle");
    });
    Ok(())
}
