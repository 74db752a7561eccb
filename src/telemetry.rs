//! Opt-in tracing setup for hosts embedding `gantt-rs`.
//!
//! Nothing here runs implicitly. A host either calls
//! `init_default_tracing` once at startup or installs its own `tracing`
//! subscriber and filter layers; the engine only emits events.

/// Installs a compact stderr `tracing` subscriber when the `telemetry`
/// feature is enabled.
///
/// The filter honors `RUST_LOG` and falls back to `info`. Returns `true`
/// when the subscriber was installed, `false` when the feature is off or a
/// global subscriber already exists.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
