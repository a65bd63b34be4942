//! Core domain types and utilities for the ZIP FIT navigation core.
//!
//! This crate provides the foundational types and error handling shared by
//! the routing, state, and application-shell crates of the ZIP FIT
//! client-side navigation stack.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{NavigationId, ParseIdError};
