//! Single-page portfolio site: content model, interactive state, rendering.
//!
//! The crate keeps the same split throughout:
//!
//! - **[`core`]**: Pure, deterministic logic (submission state machine, reveal
//!   latches, stagger timing, content checks). No I/O, no clock.
//! - **[`io`]**: Side-effecting operations (config and content files,
//!   template rendering, static builds).
//!
//! The `portfolio` binary wraps [`io`] in a CLI; `portfolio-ui` serves the
//! page and drives [`core`] per browser session.

pub mod content;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
