//! Error handling foundation for the ZIP FIT navigation stack.
//!
//! This module provides only the `Result` type alias using rootcause. The
//! router, state, and shell crates define their own domain error enums in
//! their own error modules; layers that compose them (route-table assembly,
//! shell startup) use rootcause's `.context()` to add layer-appropriate
//! context as errors propagate up the stack.

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
///
/// Each layer adds its own context via `.context()` as errors propagate.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
