//! Observability infrastructure for Basin.
//!
//! Structured logging with consistent spans across all components. This
//! module provides the one-time subscriber initialization and span
//! constructors used by the registry.

use std::sync::Once;
use tracing::Span;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Log output format.
#[derive(Debug, Clone, Copy, Default)]
pub enum LogFormat {
    /// JSON structured logs (for production).
    Json,
    /// Pretty-printed logs (for development).
    #[default]
    Pretty,
}

/// Initializes the logging subsystem.
///
/// Call once at application startup. Safe to call multiple times;
/// subsequent calls are no-ops.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Controls log levels (e.g., `info`, `basin_registry=debug`)
///
/// # Example
///
/// ```rust
/// use basin_core::observability::{LogFormat, init_logging};
///
/// init_logging(LogFormat::Pretty);
/// ```
pub fn init_logging(format: LogFormat) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        match format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().json())
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().pretty())
                    .init();
            }
        }
    });
}

/// Creates a span for registry operations with standard fields.
///
/// # Example
///
/// ```rust
/// use basin_core::observability::registry_span;
///
/// let span = registry_span("load_catalog", "prod-lake");
/// let _guard = span.enter();
/// // ... do registry operation
/// ```
#[must_use]
pub fn registry_span(operation: &str, metalake: &str) -> Span {
    tracing::info_span!(
        "registry",
        op = operation,
        metalake = metalake,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        // Should not panic (uses Once internally)
        init_logging(LogFormat::Pretty);
        init_logging(LogFormat::Pretty);
    }

    #[test]
    fn span_helper_creates_span() {
        let span = registry_span("list_catalogs", "prod-lake");
        let _guard = span.enter();
        tracing::info!("test message in span");
    }
}
