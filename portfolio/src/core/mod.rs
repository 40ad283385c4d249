//! Deterministic, pure logic for the page's interactive state.
//!
//! Core modules must be free of I/O side effects and must not read a clock.
//! Callers pass time in as an offset from their own epoch.

pub mod invariants;
pub mod motion;
pub mod reveal;
pub mod submission;
pub mod types;
