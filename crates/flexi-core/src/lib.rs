#![forbid(unsafe_code)]

//! Core: CSS lengths, time sources, deferred continuations, and debounce gates.
//!
//! # Role in flexi-slider
//! `flexi-core` holds the leaf pieces that have no knowledge of layouts or
//! settings. The layout crate (`flexi-layout`) builds its formulas on
//! [`length::Length`], and the engine (`flexi-slider`) drives
//! [`timer::TimerQueue`] and [`debounce::DebounceGate`] from a
//! [`clock::Clock`].
//!
//! # Concurrency
//! Everything here is single-threaded and cooperative. Nothing blocks or
//! sleeps; "waiting" is a deadline that the owner checks on its next tick.

pub mod clock;
pub mod debounce;
pub mod length;
#[cfg(feature = "subscriber")]
pub mod logging;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use debounce::{DebounceGate, Gate};
pub use length::{Length, LengthError, LengthUnit};
pub use timer::TimerQueue;
