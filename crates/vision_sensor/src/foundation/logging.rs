//! Logging utilities and structured logging support
//!
//! The library only talks to the `log` facade. Hosts that have no logger of
//! their own can call [`init`] once at startup.

pub use log::{debug, info, warn, error, trace};

/// Default filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info";

/// Initialize the logging system
///
/// Honours `RUST_LOG`; falls back to [`DEFAULT_FILTER`]. Calling it more than
/// once is harmless, later calls are ignored.
pub fn init() {
    let env = env_logger::Env::default().default_filter_or(DEFAULT_FILTER);
    // A second init (tests, embedding hosts) returns Err which we ignore
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}
