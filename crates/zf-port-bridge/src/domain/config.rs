//! Bridge configuration.
//!
//! [`BridgeConfig`] is the single source of truth for the bridge's runtime
//! policy.  Keeping it a plain struct (no global state, no environment reads)
//! makes the bridge easy to embed in tests and host applications alike.

/// Runtime policy for one bridge instance.
///
/// Build this once at startup and hand it to
/// [`Bridge::new`](crate::infrastructure::Bridge::new).
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Whether to eagerly invoke the site-info query once the channel opens
    /// and replay its result through the site-info push path, so host
    /// subscribers observe an initial state without waiting for the wrapper
    /// to push one.
    pub fetch_initial_site_info: bool,

    /// Whether to log the settled outcome of commands that carried no
    /// correlation id.  Such outcomes are never forwarded to the host either
    /// way; this only controls the debug-log side channel.
    pub log_uncorrelated_responses: bool,
}

impl Default for BridgeConfig {
    /// Defaults match the behavior a site front end expects: initial state is
    /// fetched eagerly, and fire-and-forget outcomes are visible in logs.
    fn default() -> Self {
        Self {
            fetch_initial_site_info: true,
            log_uncorrelated_responses: true,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
