use tracing_log::LogTracer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Log output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text format with timestamp, level, target, and message
    Text,
    /// JSON format with structured fields
    Json,
}

impl LogFormat {
    /// Parses a format name, falling back to `Text` for anything unrecognized.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }

    /// Reads `LOG_FORMAT` from the environment.
    pub fn from_env_or_default() -> Self {
        Self::parse_or_default(std::env::var("LOG_FORMAT").ok().as_deref())
    }
}

/// Installs the global tracing subscriber and the `log` bridge.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Safe to call more
/// than once: when a subscriber is already installed nothing is changed and
/// `false` is returned.
pub fn init_logging(format: LogFormat) -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match format {
        LogFormat::Json => tracing::subscriber::set_global_default(
            registry.with(fmt::layer().json().with_target(true)),
        ),
        LogFormat::Text => tracing::subscriber::set_global_default(
            registry.with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true),
            ),
        ),
    }
    .is_ok();

    if installed {
        if let Err(e) = LogTracer::init() {
            eprintln!("log bridge already initialized: {}", e);
        }
    }
    installed
}
