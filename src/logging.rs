//! Tracing subscriber setup.
//!
//! Logs go to stderr so that command output on stdout stays clean. The
//! filter is taken from `RUST_LOG` when set.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output.
    Development,
    /// JSON lines.
    Production,
    /// Installs a subscriber that records nothing.
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber. Only the first call has any effect.
pub fn init(profile: Profile, verbose: bool) {
    INIT_ONCE.call_once(|| {
        let default_directive = if verbose { "silmari=debug" } else { "silmari=info" };
        let filter = || {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
        };
        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_env_filter(filter())
                    .init();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_env_filter(filter())
                    .init();
            }
            Profile::Test => {
                tracing_subscriber::registry().init();
            }
        }
    });
}
