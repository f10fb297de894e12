//! Helper Utilities
//!
//! Common utilities used across the crate.

mod change;

pub use change::*;
