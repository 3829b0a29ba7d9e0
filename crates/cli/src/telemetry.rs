use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::LogFormat;

/// Initialise tracing on stderr so stdout carries only the report.
///
/// `RUST_LOG` picks the filter (default `info`). `LogFormat::Json` emits one
/// flattened JSON object per event.
pub fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true)
                .with_writer(std::io::stderr);
            Registry::default()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Text => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            Registry::default()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}
