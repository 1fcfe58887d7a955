#![forbid(unsafe_code)]

//! Core: host-driven time, cancellable timers, and animation primitives.

pub mod animation;
pub mod clock;
pub mod logging;
pub mod rng;
pub mod timer;

#[cfg(feature = "tracing")]
pub use logging::{debug, trace};
