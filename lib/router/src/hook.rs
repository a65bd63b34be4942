//! Navigation hooks.
//!
//! A hook observes every transition before the target view is activated and
//! decides its fate through a continuation callback. Hooks run strictly in
//! registration order; each must signal its [`Proceed`] before the next hook
//! or the final activation runs.

use crate::route::Route;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::oneshot;
use zipfit_core::NavigationId;

/// Decision a hook signals through its continuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookDecision {
    /// Let the transition proceed.
    Allow,
    /// Restart resolution at another path within the same attempt.
    Redirect { path: String },
    /// Fail the transition.
    Abort { reason: String },
}

/// An in-progress transition: the (to, from) pair handed to every hook.
#[derive(Debug, Clone)]
pub struct NavigationEvent {
    /// Identifier of the navigation attempt.
    pub id: NavigationId,
    /// Target route of the transition.
    pub to: Route,
    /// Route that was current when the attempt started, if any.
    pub from: Option<Route>,
    /// When the attempt was requested.
    pub requested_at: DateTime<Utc>,
}

/// The continuation callback of a hook.
///
/// Every signalling method consumes the value, so a hook can decide at most
/// once. Dropping a `Proceed` without signalling counts as a hook failure
/// and aborts the navigation.
#[derive(Debug)]
pub struct Proceed {
    tx: oneshot::Sender<HookDecision>,
}

impl Proceed {
    /// Creates a continuation and the receiver the engine awaits.
    pub(crate) fn channel() -> (Self, oneshot::Receiver<HookDecision>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// Lets the transition proceed.
    pub fn allow(self) {
        let _ = self.tx.send(HookDecision::Allow);
    }

    /// Redirects the attempt to another path.
    pub fn redirect(self, path: impl Into<String>) {
        let _ = self.tx.send(HookDecision::Redirect { path: path.into() });
    }

    /// Fails the transition.
    pub fn abort(self, reason: impl Into<String>) {
        let _ = self.tx.send(HookDecision::Abort {
            reason: reason.into(),
        });
    }
}

/// A function invoked on every route transition.
#[async_trait]
pub trait NavigationHook: Send + Sync {
    /// Hook name, used in timeout and failure reports.
    fn name(&self) -> &str;

    /// Observes a transition and signals its decision through `next`.
    async fn handle(&self, event: &NavigationEvent, next: Proceed);
}
