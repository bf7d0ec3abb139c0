//! Pure computation engine: no I/O, snapshot in, report out.

pub mod economics;

pub use economics::{evaluate, EconomicsError};
