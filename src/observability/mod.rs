//! Logging setup and crash reporting.
//!
//! ## Usage
//!
//! ```ignore
//! use kpiboard::observability::{init_tracing, install_panic_hook, set_phase, RenderPhase};
//!
//! fn main() {
//!     install_panic_hook();
//!     init_tracing(verbosity);
//!     let _phase = set_phase(RenderPhase::DataLoading);
//!     // a panic here reports the data_loading phase
//! }
//! ```

pub mod context;
pub mod panic_hook;

pub use context::{
    get_current_context, set_phase, set_source, ContextGuard, RenderContext, RenderPhase,
};
pub use panic_hook::install_panic_hook;

use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v` count.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over the verbosity flag. Calling this twice is
/// harmless; the second subscriber is ignored.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for_verbosity(0), "warn");
        assert_eq!(level_for_verbosity(1), "info");
        assert_eq!(level_for_verbosity(2), "debug");
        assert_eq!(level_for_verbosity(9), "trace");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_tracing(0);
        init_tracing(2);
    }
}
