//! Opt-in tracing setup for hosts and the `render_dashboard` tool.
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! host's call. With the `telemetry` feature enabled these helpers install a
//! compact `fmt` subscriber filtered by `RUST_LOG` or a fallback directive.

/// Fallback filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "sp500_charts=info,warn";

/// Installs the default subscriber with [`DEFAULT_FILTER`].
///
/// Returns `false` when the feature is disabled or a global subscriber is
/// already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_FILTER)
}

/// Installs a compact subscriber, preferring `RUST_LOG` over `fallback`.
#[must_use]
pub fn init_tracing_with_fallback(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
