//! Error types for the router crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `RouteDefinitionError`: Invalid route declarations (names, path patterns)
//! - `RouteTableError`: Route table construction failures
//! - `ViewError`: View loading failures
//! - `NavigationError`: Failures of a single navigation attempt

use std::fmt;
use std::time::Duration;

/// Errors from declaring a single route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDefinitionError {
    /// Route name is empty.
    EmptyName,
    /// Path pattern does not start with `/`.
    RelativePath { path: String },
    /// Path pattern contains a query string or hash fragment.
    PatternHasSuffix { path: String },
}

impl fmt::Display for RouteDefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "route name must not be empty"),
            Self::RelativePath { path } => {
                write!(f, "route path '{path}' must start with '/'")
            }
            Self::PatternHasSuffix { path } => {
                write!(
                    f,
                    "route path '{path}' must not contain a query string or hash fragment"
                )
            }
        }
    }
}

impl std::error::Error for RouteDefinitionError {}

/// Errors from building a route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTableError {
    /// A route with this name is already registered.
    DuplicateName { name: String },
    /// A route with this path pattern is already registered.
    DuplicatePath { path: String },
    /// A fallback route was registered twice.
    FallbackAlreadySet { name: String },
    /// The route declaration itself was invalid.
    Definition(RouteDefinitionError),
}

impl fmt::Display for RouteTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { name } => {
                write!(f, "route name '{name}' is already registered")
            }
            Self::DuplicatePath { path } => {
                write!(f, "route path '{path}' is already registered")
            }
            Self::FallbackAlreadySet { name } => {
                write!(f, "fallback route is already set to '{name}'")
            }
            Self::Definition(err) => write!(f, "invalid route declaration: {err}"),
        }
    }
}

impl std::error::Error for RouteTableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Definition(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RouteDefinitionError> for RouteTableError {
    fn from(err: RouteDefinitionError) -> Self {
        Self::Definition(err)
    }
}

/// Errors from loading a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The view loader failed to produce a view.
    LoadFailed { view: String, reason: String },
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadFailed { view, reason } => {
                write!(f, "failed to load view '{view}': {reason}")
            }
        }
    }
}

impl std::error::Error for ViewError {}

/// Errors from a single navigation attempt.
///
/// A failed attempt never commits: the current route, the history log, and
/// (except for writes the title hook performed before the failure) the
/// document title are left as they were.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// No registered route matched the requested path and no fallback is set.
    NotFound { path: String },
    /// A hook aborted the transition.
    Aborted { reason: String },
    /// A hook finished without signalling its continuation.
    HookFailed { hook: String },
    /// A hook did not signal its continuation within the configured timeout.
    HookTimedOut { hook: String, timeout: Duration },
    /// A newer navigation attempt superseded this one.
    Superseded,
    /// Hooks kept redirecting past the redirect limit.
    RedirectLimitExceeded { limit: usize },
    /// The target route's view failed to load.
    ViewLoadFailed { route: String, source: ViewError },
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "no route matches path '{path}'"),
            Self::Aborted { reason } => write!(f, "navigation aborted: {reason}"),
            Self::HookFailed { hook } => {
                write!(f, "hook '{hook}' finished without signalling its continuation")
            }
            Self::HookTimedOut { hook, timeout } => {
                write!(
                    f,
                    "hook '{hook}' did not signal within {}ms",
                    timeout.as_millis()
                )
            }
            Self::Superseded => write!(f, "navigation superseded by a newer attempt"),
            Self::RedirectLimitExceeded { limit } => {
                write!(f, "redirect limit of {limit} exceeded")
            }
            Self::ViewLoadFailed { route, source } => {
                write!(f, "view for route '{route}' failed to load: {source}")
            }
        }
    }
}

impl std::error::Error for NavigationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ViewLoadFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
