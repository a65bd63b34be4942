//! Client-side routing core for the ZIP FIT front-end.
//!
//! Maps URL paths to registered routes, runs global pre-navigation hooks
//! with continuation callbacks, loads views eagerly or on first activation,
//! and keeps the process-wide document title in step with the active route.
//!
//! Rendering, styling, and state storage are external collaborators: the
//! router only hands back a [`ViewHandle`](view::ViewHandle) and never draws
//! anything itself.

pub mod error;
pub mod history;
pub mod hook;
pub mod navigator;
pub mod route;
pub mod table;
pub mod title;
pub mod view;

pub use error::{NavigationError, RouteDefinitionError, RouteTableError, ViewError};
pub use history::{EntryKind, History, HistoryEntry};
pub use hook::{HookDecision, NavigationEvent, NavigationHook, Proceed};
pub use navigator::{NavigationOutcome, Router};
pub use route::{Route, RouteMeta, RouteName, RoutePath};
pub use table::{RouteTable, RouteTableBuilder};
pub use title::{DocumentTitle, TitleHook, TitleSink};
pub use view::{LazyView, View, ViewBinding, ViewHandle, ViewLoader};
