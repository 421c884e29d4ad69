use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),
}

/// Initialize structured logging for the host process.
///
/// The default filter enables `log_level` for this crate and can be
/// overridden with `RUST_LOG`. With `enable_json_logging` the fmt layer
/// emits one JSON object per event; otherwise a human-readable line.
/// Returns an error when a global subscriber is already installed.
pub fn init_logging(
    service_name: &str,
    log_level: &str,
    enable_json_logging: bool,
) -> Result<(), ObservabilityError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("{}={}", service_name.replace('-', "_"), log_level).into()
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    if enable_json_logging {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_level(true)
                    .with_file(false)
                    .with_line_number(false)
                    .log_internal_errors(false)
                    .boxed(),
            )
            .try_init()
            .map_err(|e| ObservabilityError::TracingInit(e.to_string()))?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_file(false)
                    .with_line_number(false)
                    .boxed(),
            )
            .try_init()
            .map_err(|e| ObservabilityError::TracingInit(e.to_string()))?;
    }

    Ok(())
}
