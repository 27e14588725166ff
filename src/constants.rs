//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Dependency analysis constants
pub mod analysis {
    /// Maximum number of source files fetched per analysis run.
    ///
    /// A deliberate cost/scalability trade-off: files beyond the cap
    /// become neither nodes nor edge endpoints.
    pub const MAX_FILES_TO_ANALYZE: usize = 30;

    /// Per-index stagger between content fetch starts (milliseconds),
    /// smoothing call-rate bursts against the remote API.
    pub const STAGGER_DELAY_MS: u64 = 100;
}

/// Rate-limit governor constants
pub mod governor {
    /// Retry ceiling for rate-limited calls.
    pub const MAX_RETRIES: u32 = 3;

    /// Base for the exponential backoff schedule: the n-th retry waits
    /// `BACKOFF_BASE_SECS * 2^n` seconds.
    pub const BACKOFF_BASE_SECS: u64 = 1;

    /// Assumed call budget before the first response headers arrive
    /// (the GitHub authenticated default).
    pub const DEFAULT_LIMIT: u32 = 5000;
}

/// HTTP/network constants
pub mod network {
    /// Default REST API base.
    pub const DEFAULT_API_BASE: &str = "https://api.github.com";

    /// Per-request timeout (seconds).
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// User-Agent header value; the GitHub API rejects anonymous agents.
    pub const USER_AGENT: &str = concat!("repograph/", env!("CARGO_PKG_VERSION"));
}
