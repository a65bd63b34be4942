//! Page views for the application.
//!
//! Each page implements the router's `View` seam for a specific route. The
//! home page is bound eagerly; the AI-consultation and listing pages sit
//! behind loaders so their code is only pulled in when first visited.

pub mod ai;
pub mod home;
pub mod list;

pub use ai::{AiView, AiViewLoader};
pub use home::HomeView;
pub use list::{ListView, ListViewLoader};
