//! Structured logging initialization
//!
//! Provides consistent logging initialization across all init components.
//! Logs go to stderr; stdout stays free for tools that capture it.

use crate::config::EnvSource;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Guard that keeps the tracing subscriber active.
/// Drop this at the end of main to flush logs.
pub struct LogGuard;

/// Initialize structured logging for a component.
///
/// `RUST_LOG` overrides the default `info` level. Setting
/// `MONGO_INIT_LOG_FORMAT=json` switches to one JSON object per line.
/// The first line names the component.
///
/// # Example
/// ```ignore
/// let _guard = init_logging("mongo-init", &ProcessEnv);
/// info!("Starting up...");
/// ```
pub fn init_logging(component: &str, env: &impl EnvSource) -> LogGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env
        .var("MONGO_INIT_LOG_FORMAT")
        .is_some_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }

    tracing::info!(component, "Logging initialized");

    LogGuard
}
