//! Utility Module
//!
//! - [`Timer`]: frame clock producing per-frame deltas

pub mod time;

pub use time::Timer;
