//! ZIP FIT application shell.
//!
//! Wires the application root to its host document, installs the state and
//! router capabilities, and declares the navigable views with their
//! per-route document titles.

pub mod app;
pub mod config;
pub mod document;
pub mod error;
pub mod pages;
pub mod routes;
