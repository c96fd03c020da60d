//! Telemetry helpers for applications embedding `timegraph`.
//!
//! Tracing setup stays explicit and opt-in: hosts either call one of the
//! helpers below (with the `telemetry` feature enabled) or install their own
//! `tracing` subscriber before creating an engine.

/// Initializes a compact `tracing` subscriber filtered by `RUST_LOG`,
/// defaulting to `info`.
///
/// Returns `true` when initialization succeeds, `false` when the `telemetry`
/// feature is disabled or a global subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter("info")
}

/// Like [`init_default_tracing`], but with an explicit fallback filter used
/// when `RUST_LOG` is not set (e.g. `"timegraph=debug"`).
#[must_use]
pub fn init_tracing_with_filter(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_filter));

        return tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
