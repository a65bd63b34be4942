//! The application shell.
//!
//! Composes the application root from an explicit, ordered list of
//! capabilities and mounts it into the host document. Initialization order
//! and side effects stay auditable: capabilities install exactly in the
//! order given, before mount, and the shell rejects mounting when the host
//! element is missing.

use crate::document::HostDocument;
use crate::error::ShellError;
use std::sync::Arc;
use zipfit_router::Router;
use zipfit_state::StateRegistry;

/// Services a capability can expose to the rest of the application.
#[derive(Default)]
pub struct AppContext {
    router: Option<Arc<Router>>,
    state: Option<Arc<StateRegistry>>,
}

impl AppContext {
    /// Exposes the router to the application.
    pub fn set_router(&mut self, router: Arc<Router>) {
        self.router = Some(router);
    }

    /// Exposes the state registry to the application.
    pub fn set_state(&mut self, state: Arc<StateRegistry>) {
        self.state = Some(state);
    }

    /// Returns the installed router, if any.
    #[must_use]
    pub fn router(&self) -> Option<Arc<Router>> {
        self.router.clone()
    }

    /// Returns the installed state registry, if any.
    #[must_use]
    pub fn state(&self) -> Option<Arc<StateRegistry>> {
        self.state.clone()
    }
}

/// A middleware-like extension installed into the shell before mount.
pub trait Capability {
    /// Capability name, used in logs and install-failure reports.
    fn name(&self) -> &str;

    /// Installs the capability into the application context.
    fn install(&self, ctx: &mut AppContext) -> Result<(), ShellError>;
}

/// Installs the router.
pub struct RouterCapability {
    router: Arc<Router>,
}

impl RouterCapability {
    /// Wraps a router for installation.
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }
}

impl Capability for RouterCapability {
    fn name(&self) -> &str {
        "router"
    }

    fn install(&self, ctx: &mut AppContext) -> Result<(), ShellError> {
        ctx.set_router(self.router.clone());
        Ok(())
    }
}

/// Installs the state registry.
pub struct StateCapability {
    registry: Arc<StateRegistry>,
}

impl StateCapability {
    /// Wraps a state registry for installation.
    pub fn new(registry: Arc<StateRegistry>) -> Self {
        Self { registry }
    }
}

impl Capability for StateCapability {
    fn name(&self) -> &str {
        "state"
    }

    fn install(&self, ctx: &mut AppContext) -> Result<(), ShellError> {
        ctx.set_state(self.registry.clone());
        Ok(())
    }
}

/// The application root.
pub struct App {
    document: Arc<HostDocument>,
    ctx: AppContext,
    mounted_at: Option<String>,
}

impl App {
    /// Composes the application from its capabilities, installing each in
    /// the order given.
    ///
    /// # Errors
    ///
    /// Returns an error when a capability fails to install.
    pub fn compose(
        document: Arc<HostDocument>,
        capabilities: Vec<Box<dyn Capability>>,
    ) -> Result<Self, ShellError> {
        let mut ctx = AppContext::default();
        for capability in &capabilities {
            tracing::info!(capability = capability.name(), "installing capability");
            capability.install(&mut ctx)?;
        }
        Ok(Self {
            document,
            ctx,
            mounted_at: None,
        })
    }

    /// Mounts the application into the host element.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::MountTargetMissing`] when the document has no
    /// element with the id. This is fatal at startup.
    pub fn mount(&mut self, element_id: &str) -> Result<(), ShellError> {
        if !self.document.has_element(element_id) {
            return Err(ShellError::MountTargetMissing {
                id: element_id.to_string(),
            });
        }
        tracing::info!(element = element_id, "application mounted");
        self.mounted_at = Some(element_id.to_string());
        Ok(())
    }

    /// Returns the id of the element the application is mounted into.
    #[must_use]
    pub fn mounted_at(&self) -> Option<&str> {
        self.mounted_at.as_deref()
    }

    /// Returns the installed router.
    ///
    /// # Errors
    ///
    /// Returns an error when no router capability was installed.
    pub fn router(&self) -> Result<Arc<Router>, ShellError> {
        self.ctx.router().ok_or(ShellError::RouterNotInstalled)
    }

    /// Returns the installed state registry, if any.
    #[must_use]
    pub fn state(&self) -> Option<Arc<StateRegistry>> {
        self.ctx.state()
    }

    /// Returns the host document.
    #[must_use]
    pub fn document(&self) -> &HostDocument {
        &self.document
    }
}
