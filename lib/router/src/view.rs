//! Views and view loading.
//!
//! A view is the renderable unit of UI behind a route. Routes bind their
//! view either eagerly (the view exists when the route is declared) or
//! lazily through a [`ViewLoader`], mirroring dynamic chunk imports: the
//! loader runs the first time the route is activated, and the loaded view
//! is cached for the rest of the session.

use crate::error::ViewError;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// A renderable unit of UI associated with a route.
pub trait View: Send + Sync {
    /// Stable view name, used in logs and load-failure reports.
    fn name(&self) -> &str;

    /// Renders the view to markup.
    fn render(&self) -> String;
}

/// Shared handle to a loaded view.
#[derive(Clone)]
pub struct ViewHandle {
    inner: Arc<dyn View>,
}

impl ViewHandle {
    /// Wraps a view in a shared handle.
    pub fn new(view: impl View + 'static) -> Self {
        Self {
            inner: Arc::new(view),
        }
    }

    /// Returns the view's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Renders the view to markup.
    #[must_use]
    pub fn render(&self) -> String {
        self.inner.render()
    }
}

impl fmt::Debug for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ViewHandle").field(&self.name()).finish()
    }
}

/// Asynchronous view loader capability.
///
/// Implementations stand in for on-demand code loading; failures must be
/// reported through [`ViewError`] so the router can surface them as failed
/// navigations instead of partial renders.
#[async_trait]
pub trait ViewLoader: Send + Sync {
    /// Loads the view this loader is responsible for.
    async fn load(&self) -> Result<ViewHandle, ViewError>;
}

/// A deferred view: loads on first activation, then stays cached.
///
/// Clones share the cache cell, so route snapshots handed to hooks observe
/// the same load-once behavior as the registered route. A failed load does
/// not poison the cell; the next activation retries the loader.
#[derive(Clone)]
pub struct LazyView {
    loader: Arc<dyn ViewLoader>,
    cell: Arc<OnceCell<ViewHandle>>,
}

impl LazyView {
    /// Creates a deferred view around a loader.
    pub fn new(loader: Arc<dyn ViewLoader>) -> Self {
        Self {
            loader,
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// Returns true once the loader has completed successfully.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Returns the loaded view, running the loader on first use.
    pub async fn get_or_load(&self) -> Result<ViewHandle, ViewError> {
        self.cell
            .get_or_try_init(|| self.loader.load())
            .await
            .cloned()
    }
}

impl fmt::Debug for LazyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyView")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// How a route obtains its view.
#[derive(Debug, Clone)]
pub enum ViewBinding {
    /// View was supplied when the route was declared.
    Eager(ViewHandle),
    /// View is loaded on first activation.
    Lazy(LazyView),
}

impl ViewBinding {
    /// Binds an already-loaded view.
    pub fn eager(view: ViewHandle) -> Self {
        Self::Eager(view)
    }

    /// Binds a deferred view behind a loader.
    pub fn lazy(loader: Arc<dyn ViewLoader>) -> Self {
        Self::Lazy(LazyView::new(loader))
    }

    /// Returns true for deferred bindings.
    #[must_use]
    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }

    /// Returns true if the bound view is available without loading.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        match self {
            Self::Eager(_) => true,
            Self::Lazy(lazy) => lazy.is_loaded(),
        }
    }

    /// Resolves the bound view, loading it if necessary.
    pub async fn resolve(&self) -> Result<ViewHandle, ViewError> {
        match self {
            Self::Eager(view) => Ok(view.clone()),
            Self::Lazy(lazy) => lazy.get_or_load().await,
        }
    }
}
