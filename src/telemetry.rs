// 📡 Telemetry - Structured logging setup
//
// RUST_LOG          filter directives (default: info,zoo_registry=info)
// RUST_LOG_FORMAT   "json" for one JSON object per event, anything else for text

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "info,zoo_registry=info";

/// Which formatter the fmt layer should use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }
}

/// Install the global subscriber
///
/// Returns false when a subscriber was already installed (tests, repeated calls).
pub fn init_logging() -> bool {
    let format = LogFormat::from_env_value(std::env::var("RUST_LOG_FORMAT").ok().as_deref());
    let env_filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string()),
    );

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match format {
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true)
                .with_writer(std::io::stderr);
            registry.with(fmt_layer).try_init().is_ok()
        }
        LogFormat::Text => {
            let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            registry.with(fmt_layer).try_init().is_ok()
        }
    };

    if installed {
        tracing::debug!(format = format.as_str(), "logging initialised");
    }
    installed
}
