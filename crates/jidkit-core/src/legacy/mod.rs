//! Timestamp helpers kept for callers that predate chrono-based formatting.
//!
//! Nothing in the address model depends on this module. Every public item is
//! deprecated; new code should format with `chrono` directly.

pub mod datetime;
pub mod time_utils;
