use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "orrery_engine=debug,wgpu=warn").
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored. Intended usage
/// is early in `main`. An explicit filter wins over `RUST_LOG`; with neither
/// set, info-level output is kept and wgpu's own chatter is reduced to warn.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.parse_filters("info,wgpu_core=warn,wgpu_hal=warn");
        }

        builder.init();

        log::debug!("logging initialized");
    });
}
