//! State-management capability for the ZIP FIT front-end.
//!
//! Installed by the application shell before mount and shared by views as
//! an opaque collaborator of the navigation core.

pub mod error;
pub mod store;

pub use error::StateError;
pub use store::{StateChange, StateRegistry, Store};
