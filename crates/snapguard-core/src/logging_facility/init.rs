//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at startup; later calls are ignored. `RUST_LOG` overrides the
/// profile's default filter.
///
/// - **Development**: human-readable logs, `snapguard=debug`
/// - **Production**: JSON logs, `snapguard=info`
/// - **Test**: bare registry; use `init_test_capture()` to record events
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("snapguard=debug")),
                )
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("snapguard=info")),
                )
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}
