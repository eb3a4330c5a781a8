//! Opt-in tracing setup for hosts embedding `gridline-chart`.
//!
//! The engine only emits `tracing` events; installing a subscriber is left to
//! the host. With the `telemetry` feature enabled these helpers install a
//! compact `fmt` subscriber filtered by `RUST_LOG` or a fallback directive.

/// Directive used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER_DIRECTIVE: &str = "gridline_chart=info";

/// Installs a compact subscriber using [`DEFAULT_FILTER_DIRECTIVE`] as fallback.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber was already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_FILTER_DIRECTIVE)
}

/// Installs a compact subscriber, falling back to `directive` when `RUST_LOG`
/// does not yield a usable filter.
#[must_use]
pub fn init_tracing_with_fallback(directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directive;
        false
    }
}
