#![forbid(unsafe_code)]

//! Log targets and optional subscriber setup.
//!
//! Every crate in the workspace logs through `tracing` with one of the
//! targets below, so hosts can filter per component, e.g.
//! `RUST_LOG=fab.gesture=debug,fab.greeting=trace`.
//!
//! With the `tracing-json` feature, [`init_json_logging`] installs a JSON
//! formatter for production hosts. Libraries never install a subscriber on
//! their own.

/// Gesture classifier transitions.
pub const TARGET_GESTURE: &str = "fab.gesture";
/// Greeting reveal lifecycle.
pub const TARGET_GREETING: &str = "fab.greeting";
/// Timer slot replacement.
pub const TARGET_TIMER: &str = "fab.timer";
/// Widget shell decisions (click, modal, hover).
pub const TARGET_WIDGET: &str = "fab.widget";
/// Browser host adapter.
pub const TARGET_WEB: &str = "fab.web";

/// Install a global JSON subscriber filtered by `filter` (or `RUST_LOG`).
///
/// Returns an error string if a global subscriber is already set or the
/// filter does not parse.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging(filter: Option<&str>) -> Result<(), String> {
    use tracing_subscriber::EnvFilter;

    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives).map_err(|e| e.to_string())?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| e.to_string())
}
