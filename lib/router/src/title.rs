//! Document title state and the title hook.
//!
//! The document title is the one piece of process-wide mutable state in the
//! navigation core. It has a single writer, the [`TitleHook`], and persists
//! between navigations; the host window/tab chrome reads it through the
//! shared [`DocumentTitle`] handle.

use crate::hook::{NavigationEvent, NavigationHook, Proceed};
use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};

/// Write seam for the document title, so tests and non-browser hosts can
/// substitute their own sink.
pub trait TitleSink: Send + Sync {
    /// Replaces the document title.
    fn set_title(&self, title: &str);
}

/// Process-wide document title state.
///
/// Clones share the same underlying string; the handle lives for the whole
/// application session.
#[derive(Debug, Clone)]
pub struct DocumentTitle {
    inner: Arc<RwLock<String>>,
}

impl DocumentTitle {
    /// Creates the title state with an initial value.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial.into())),
        }
    }

    /// Returns the current title.
    #[must_use]
    pub fn get(&self) -> String {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for DocumentTitle {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl TitleSink for DocumentTitle {
    fn set_title(&self, title: &str) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = title.to_string();
    }
}

/// Global hook that derives the per-route display title.
///
/// On every navigation attempt it applies the target route's `meta.title`
/// to the sink, an empty string verbatim, or the fixed fallback when no
/// title is declared. It then allows the transition unconditionally.
pub struct TitleHook {
    sink: Arc<dyn TitleSink>,
    fallback: String,
}

impl TitleHook {
    /// Creates the title hook.
    pub fn new(sink: Arc<dyn TitleSink>, fallback: impl Into<String>) -> Self {
        Self {
            sink,
            fallback: fallback.into(),
        }
    }
}

#[async_trait]
impl NavigationHook for TitleHook {
    fn name(&self) -> &str {
        "title"
    }

    async fn handle(&self, event: &NavigationEvent, next: Proceed) {
        let title = event.to.meta.title().unwrap_or(&self.fallback);
        tracing::debug!(route = %event.to.name, title, "applying document title");
        self.sink.set_title(title);
        next.allow();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hook::HookDecision;
    use crate::route::Route;
    use crate::view::{View, ViewHandle};
    use chrono::Utc;
    use zipfit_core::NavigationId;

    struct StubView;

    impl View for StubView {
        fn name(&self) -> &str {
            "stub"
        }

        fn render(&self) -> String {
            String::new()
        }
    }

    fn event_for(route: Route) -> NavigationEvent {
        NavigationEvent {
            id: NavigationId::new(),
            to: route,
            from: None,
            requested_at: Utc::now(),
        }
    }

    async fn run_hook(hook: &TitleHook, event: &NavigationEvent) -> HookDecision {
        let (proceed, rx) = Proceed::channel();
        hook.handle(event, proceed).await;
        rx.await.expect("title hook always signals")
    }

    #[tokio::test]
    async fn declared_title_is_applied_verbatim() {
        let title = DocumentTitle::default();
        let hook = TitleHook::new(Arc::new(title.clone()), "fallback");

        let route = Route::eager("ai", "/ai", ViewHandle::new(StubView))
            .expect("valid route")
            .with_title("AI 상담 - ZIP FIT");
        let decision = run_hook(&hook, &event_for(route)).await;

        assert_eq!(decision, HookDecision::Allow);
        assert_eq!(title.get(), "AI 상담 - ZIP FIT");
    }

    #[tokio::test]
    async fn missing_title_uses_fallback() {
        let title = DocumentTitle::new("previous");
        let hook = TitleHook::new(Arc::new(title.clone()), "ZIP FIT");

        let route = Route::eager("bare", "/bare", ViewHandle::new(StubView)).expect("valid route");
        run_hook(&hook, &event_for(route)).await;

        assert_eq!(title.get(), "ZIP FIT");
    }

    #[tokio::test]
    async fn empty_title_is_applied_not_replaced_by_fallback() {
        let title = DocumentTitle::new("previous");
        let hook = TitleHook::new(Arc::new(title.clone()), "ZIP FIT");

        let route = Route::eager("blank", "/blank", ViewHandle::new(StubView))
            .expect("valid route")
            .with_title("");
        run_hook(&hook, &event_for(route)).await;

        assert_eq!(title.get(), "");
    }

    #[test]
    fn clones_share_state() {
        let title = DocumentTitle::default();
        let clone = title.clone();
        title.set_title("shared");
        assert_eq!(clone.get(), "shared");
    }
}
