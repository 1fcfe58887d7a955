#![forbid(unsafe_code)]

//! Logging shim.
//!
//! `folio-core` sits under every other crate and must not force a `tracing`
//! dependency on embedders, so its log calls go through [`trace!`] and
//! [`debug!`]. With the `tracing` feature these are the `tracing` macros;
//! without it they expand to nothing and their arguments are never
//! evaluated.
//!
//! With `tracing-json`, [`init_json`] installs a JSON subscriber filtered by
//! `RUST_LOG` (falling back to `info`).

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

/// Install a global JSON subscriber honouring `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .try_init()
        .is_ok()
}

#[cfg(not(feature = "tracing"))]
mod noop {
    /// Discards its arguments (`tracing` feature off).
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// Discards its arguments (`tracing` feature off).
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }
}
