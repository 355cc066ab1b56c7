//! Structured logging for the plugin host
//!
//! Sets up tracing-based logging. The filter comes from `RUST_LOG` when set,
//! otherwise from the configured filter, otherwise from a build-dependent
//! default.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::HostConfig;

/// Default filter when nothing else is configured
fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "glide_plugin_host_lib=debug,info"
    } else {
        "glide_plugin_host_lib=info,warn"
    }
}

/// Build the env filter, preferring `RUST_LOG` over the configured value
fn build_filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| configured_filter(configured))
}

/// Filter from configured directives, falling back to the default when
/// they are missing or malformed
fn configured_filter(configured: Option<&str>) -> EnvFilter {
    let directives = configured.unwrap_or(default_filter());
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(default_filter()))
}

/// Initialize the logging system
///
/// Uses `try_init` so that an embedding process which already installed a
/// global subscriber keeps its own.
///
/// # Example
/// ```ignore
/// use glide_plugin_host_lib::logging;
/// logging::init(None);
/// tracing::info!("Plugin host started");
/// ```
pub fn init(filter: Option<&str>) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(filter))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .try_init();
}

/// Initialize logging with the filter from the host configuration
pub fn init_from_config(config: &HostConfig) {
    init(config.log_filter.as_deref());
}

/// Initialize logging for tests
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new("debug"))
        .with(fmt::layer().with_test_writer())
        .try_init();
}
