//! The navigator engine.
//!
//! Drives a navigation attempt through its states: idle → resolving →
//! hook-running → activating → idle. The terminal state is always reached:
//! hooks are bounded by a timeout, redirect chains by a limit, and stale
//! attempts are abandoned when a newer one starts.

use crate::error::NavigationError;
use crate::history::{EntryKind, History, HistoryEntry};
use crate::hook::{HookDecision, NavigationEvent, NavigationHook, Proceed};
use crate::route::{Route, normalize_request_path};
use crate::table::RouteTable;
use crate::view::ViewHandle;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;
use zipfit_core::NavigationId;

/// Hooks may redirect this many times within one attempt before the
/// attempt fails.
const MAX_REDIRECTS: usize = 8;

/// Hook timeout applied when none is configured.
const DEFAULT_HOOK_TIMEOUT: Duration = Duration::from_secs(5);

/// Result of a committed navigation.
#[derive(Debug, Clone)]
pub struct NavigationOutcome {
    /// Identifier of the attempt.
    pub id: NavigationId,
    /// The route that became current.
    pub route: Route,
    /// The activated view.
    pub view: ViewHandle,
}

/// Maps requested paths to registered routes, runs the global hook chain,
/// and activates the target view.
///
/// Navigation is cooperative and sequential: hooks run one at a time, each
/// signalling completion through its continuation. A `navigate` call issued
/// while a previous one is still in flight supersedes it; the superseded
/// attempt is abandoned at its next await point without committing.
pub struct Router {
    table: RouteTable,
    hooks: RwLock<Vec<Arc<dyn NavigationHook>>>,
    current: RwLock<Option<Route>>,
    history: Mutex<History>,
    epoch: AtomicU64,
    hook_timeout: Duration,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

impl Router {
    /// Creates a router over a route table.
    ///
    /// `base_path` is the application's deploy prefix (the build-time base
    /// URL); history hrefs are recorded under it.
    #[must_use]
    pub fn new(table: RouteTable, base_path: &str) -> Self {
        Self {
            table,
            hooks: RwLock::new(Vec::new()),
            current: RwLock::new(None),
            history: Mutex::new(History::new(base_path)),
            epoch: AtomicU64::new(0),
            hook_timeout: DEFAULT_HOOK_TIMEOUT,
        }
    }

    /// Sets the per-hook timeout. A hook that has not signalled its
    /// continuation when the timeout expires fails the navigation.
    #[must_use]
    pub fn with_hook_timeout(mut self, timeout: Duration) -> Self {
        self.hook_timeout = timeout;
        self
    }

    /// Installs a hook invoked on every navigation attempt, after all
    /// previously registered hooks.
    pub fn register_global_hook(&self, hook: Arc<dyn NavigationHook>) {
        tracing::debug!(hook = hook.name(), "registering global navigation hook");
        self.hooks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(hook);
    }

    /// Matches a requested path against the table, first match in
    /// registration order. The fallback route is not consulted.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<Route> {
        self.table.resolve(path).cloned()
    }

    /// Returns the route of the last committed navigation.
    #[must_use]
    pub fn current_route(&self) -> Option<Route> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the current location, if any navigation committed yet.
    #[must_use]
    pub fn current_location(&self) -> Option<HistoryEntry> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .current()
            .cloned()
    }

    /// Navigates to a path, pushing a history entry on success.
    pub async fn navigate(&self, path: &str) -> Result<NavigationOutcome, NavigationError> {
        self.start_attempt(path, EntryKind::Push).await
    }

    /// Navigates to a path, replacing the current history entry on success.
    pub async fn navigate_replace(
        &self,
        path: &str,
    ) -> Result<NavigationOutcome, NavigationError> {
        self.start_attempt(path, EntryKind::Replace).await
    }

    async fn start_attempt(
        &self,
        path: &str,
        kind: EntryKind,
    ) -> Result<NavigationOutcome, NavigationError> {
        // Claiming a new epoch supersedes any attempt still in flight.
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let id = NavigationId::new();

        let result = self.attempt(id, path, epoch, kind).await;
        match &result {
            Ok(outcome) => {
                tracing::info!(
                    navigation = %id,
                    route = %outcome.route.name,
                    view = outcome.view.name(),
                    "navigation committed"
                );
            }
            Err(err) => {
                tracing::warn!(navigation = %id, path, error = %err, "navigation failed");
            }
        }
        result
    }

    async fn attempt(
        &self,
        id: NavigationId,
        requested: &str,
        epoch: u64,
        kind: EntryKind,
    ) -> Result<NavigationOutcome, NavigationError> {
        let mut target = normalize_request_path(requested).to_string();
        let mut redirects = 0usize;

        loop {
            // Resolving.
            let route = match self.table.resolve_or_fallback(&target) {
                Some(route) => route.clone(),
                None => return Err(NavigationError::NotFound { path: target }),
            };
            let event = NavigationEvent {
                id,
                to: route.clone(),
                from: self.current_route(),
                requested_at: Utc::now(),
            };

            // Hook-running.
            match self.run_hooks(&event, epoch).await? {
                ChainOutcome::Allowed => {}
                ChainOutcome::Redirected { path } => {
                    redirects += 1;
                    if redirects > MAX_REDIRECTS {
                        return Err(NavigationError::RedirectLimitExceeded {
                            limit: MAX_REDIRECTS,
                        });
                    }
                    tracing::debug!(navigation = %id, from = %target, to = %path, "hook redirected");
                    target = normalize_request_path(&path).to_string();
                    continue;
                }
            }

            // Activating. A load failure leaves the previous view current.
            self.check_superseded(epoch)?;
            let view = route.binding().resolve().await.map_err(|source| {
                NavigationError::ViewLoadFailed {
                    route: route.name.to_string(),
                    source,
                }
            })?;
            self.check_superseded(epoch)?;

            // Commit.
            *self
                .current
                .write()
                .unwrap_or_else(PoisonError::into_inner) = Some(route.clone());
            {
                let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
                match kind {
                    EntryKind::Push => history.push(route.path.as_str()),
                    EntryKind::Replace => history.replace(route.path.as_str()),
                }
            }

            return Ok(NavigationOutcome { id, route, view });
        }
    }

    async fn run_hooks(
        &self,
        event: &NavigationEvent,
        epoch: u64,
    ) -> Result<ChainOutcome, NavigationError> {
        let hooks: Vec<Arc<dyn NavigationHook>> = self
            .hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        for hook in hooks {
            self.check_superseded(epoch)?;

            let (proceed, decision_rx) = Proceed::channel();
            let signalled = tokio::time::timeout(self.hook_timeout, async {
                hook.handle(event, proceed).await;
                decision_rx.await
            })
            .await;

            let decision = match signalled {
                Err(_elapsed) => {
                    return Err(NavigationError::HookTimedOut {
                        hook: hook.name().to_string(),
                        timeout: self.hook_timeout,
                    });
                }
                // The hook returned but dropped its continuation unsignalled.
                Ok(Err(_dropped)) => {
                    return Err(NavigationError::HookFailed {
                        hook: hook.name().to_string(),
                    });
                }
                Ok(Ok(decision)) => decision,
            };

            match decision {
                HookDecision::Allow => {}
                HookDecision::Abort { reason } => {
                    return Err(NavigationError::Aborted { reason });
                }
                HookDecision::Redirect { path } => {
                    return Ok(ChainOutcome::Redirected { path });
                }
            }
        }

        Ok(ChainOutcome::Allowed)
    }

    fn check_superseded(&self, epoch: u64) -> Result<(), NavigationError> {
        if self.epoch.load(Ordering::SeqCst) != epoch {
            return Err(NavigationError::Superseded);
        }
        Ok(())
    }
}

enum ChainOutcome {
    Allowed,
    Redirected { path: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewError;
    use crate::title::{DocumentTitle, TitleHook};
    use crate::view::{View, ViewLoader};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    struct StubView(&'static str);

    impl View for StubView {
        fn name(&self) -> &str {
            self.0
        }

        fn render(&self) -> String {
            format!("<section>{}</section>", self.0)
        }
    }

    struct CountingLoader {
        name: &'static str,
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingLoader {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing(name: &'static str) -> Self {
            Self {
                name,
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl ViewLoader for CountingLoader {
        async fn load(&self) -> Result<ViewHandle, ViewError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ViewError::LoadFailed {
                    view: self.name.to_string(),
                    reason: "simulated chunk fetch failure".to_string(),
                });
            }
            Ok(ViewHandle::new(StubView(self.name)))
        }
    }

    /// Hook recording the order it observed transitions in.
    struct RecordingHook {
        name: &'static str,
        seen: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl NavigationHook for RecordingHook {
        fn name(&self) -> &str {
            self.name
        }

        async fn handle(&self, event: &NavigationEvent, next: Proceed) {
            self.seen
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.name, event.to.name));
            next.allow();
        }
    }

    /// Hook that aborts a specific route.
    struct GateHook {
        blocked: &'static str,
    }

    #[async_trait]
    impl NavigationHook for GateHook {
        fn name(&self) -> &str {
            "gate"
        }

        async fn handle(&self, event: &NavigationEvent, next: Proceed) {
            if event.to.name.as_str() == self.blocked {
                next.abort("blocked by gate");
            } else {
                next.allow();
            }
        }
    }

    /// Hook that redirects one path to another.
    struct RedirectHook {
        from: &'static str,
        to: &'static str,
    }

    #[async_trait]
    impl NavigationHook for RedirectHook {
        fn name(&self) -> &str {
            "redirect"
        }

        async fn handle(&self, event: &NavigationEvent, next: Proceed) {
            if event.to.path.as_str() == self.from {
                next.redirect(self.to);
            } else {
                next.allow();
            }
        }
    }

    /// Hook that never signals its continuation.
    struct StalledHook;

    #[async_trait]
    impl NavigationHook for StalledHook {
        fn name(&self) -> &str {
            "stalled"
        }

        async fn handle(&self, _event: &NavigationEvent, next: Proceed) {
            // Hold the continuation past any reasonable timeout.
            tokio::time::sleep(Duration::from_secs(3600)).await;
            next.allow();
        }
    }

    /// Hook that returns without signalling.
    struct ForgetfulHook;

    #[async_trait]
    impl NavigationHook for ForgetfulHook {
        fn name(&self) -> &str {
            "forgetful"
        }

        async fn handle(&self, _event: &NavigationEvent, next: Proceed) {
            drop(next);
        }
    }

    /// Hook that delays a specific path before allowing it.
    struct SlowHook {
        path: &'static str,
        delay: Duration,
    }

    #[async_trait]
    impl NavigationHook for SlowHook {
        fn name(&self) -> &str {
            "slow"
        }

        async fn handle(&self, event: &NavigationEvent, next: Proceed) {
            if event.to.path.as_str() == self.path {
                tokio::time::sleep(self.delay).await;
            }
            next.allow();
        }
    }

    fn eager(name: &'static str, path: &str) -> Route {
        Route::eager(name, path, ViewHandle::new(StubView(name))).expect("valid route")
    }

    fn three_route_table(lazy_loader: Arc<CountingLoader>) -> RouteTable {
        RouteTable::builder()
            .route(eager("home", "/").with_title("Home"))
            .and_then(|b| {
                b.route(
                    Route::lazy("deferred", "/deferred", lazy_loader)
                        .expect("valid route")
                        .with_title("Deferred"),
                )
            })
            .and_then(|b| b.route(eager("bare", "/bare")))
            .expect("valid table")
            .build()
    }

    fn titled_router(loader: Arc<CountingLoader>) -> (Router, DocumentTitle) {
        let router = Router::new(three_route_table(loader), "");
        let title = DocumentTitle::default();
        router.register_global_hook(Arc::new(TitleHook::new(
            Arc::new(title.clone()),
            "Fallback",
        )));
        (router, title)
    }

    #[tokio::test]
    async fn navigate_commits_route_view_and_title() {
        let (router, title) = titled_router(Arc::new(CountingLoader::new("deferred")));

        let outcome = router.navigate("/").await.expect("should navigate");
        assert_eq!(outcome.route.name.as_str(), "home");
        assert_eq!(outcome.view.name(), "home");
        assert_eq!(title.get(), "Home");
        assert_eq!(
            router.current_route().expect("current").name.as_str(),
            "home"
        );
        assert_eq!(router.current_location().expect("location").href, "/");
    }

    #[tokio::test]
    async fn unknown_path_fails_without_touching_state() {
        let (router, title) = titled_router(Arc::new(CountingLoader::new("deferred")));
        router.navigate("/").await.expect("should navigate");

        let err = router.navigate("/does-not-exist").await.unwrap_err();
        assert!(matches!(err, NavigationError::NotFound { .. }));

        // Previous route and title survive a not-found result.
        assert_eq!(
            router.current_route().expect("current").name.as_str(),
            "home"
        );
        assert_eq!(title.get(), "Home");
    }

    #[tokio::test]
    async fn repeated_navigation_is_idempotent_for_the_title() {
        let (router, title) = titled_router(Arc::new(CountingLoader::new("deferred")));

        router.navigate("/deferred").await.expect("first");
        assert_eq!(title.get(), "Deferred");
        router.navigate("/deferred").await.expect("second");
        assert_eq!(title.get(), "Deferred");
    }

    #[tokio::test]
    async fn missing_title_applies_fallback() {
        let (router, title) = titled_router(Arc::new(CountingLoader::new("deferred")));

        router.navigate("/bare").await.expect("should navigate");
        assert_eq!(title.get(), "Fallback");
    }

    #[tokio::test]
    async fn lazy_view_loads_on_first_activation_only() {
        let loader = Arc::new(CountingLoader::new("deferred"));
        let (router, _title) = titled_router(loader.clone());

        router.navigate("/").await.expect("should navigate");
        assert_eq!(loader.calls.load(Ordering::SeqCst), 0);

        router.navigate("/deferred").await.expect("should navigate");
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);

        router.navigate("/deferred").await.expect("should navigate");
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn lazy_load_failure_keeps_previous_route_current() {
        let loader = Arc::new(CountingLoader::failing("deferred"));
        let (router, _title) = titled_router(loader);

        router.navigate("/").await.expect("should navigate");
        let err = router.navigate("/deferred").await.unwrap_err();
        assert!(matches!(err, NavigationError::ViewLoadFailed { .. }));

        assert_eq!(
            router.current_route().expect("current").name.as_str(),
            "home"
        );
        assert_eq!(router.current_location().expect("location").href, "/");
    }

    #[tokio::test]
    async fn hooks_run_in_registration_order() {
        let router = Router::new(three_route_table(Arc::new(CountingLoader::new("deferred"))), "");
        let seen = Arc::new(Mutex::new(Vec::new()));
        router.register_global_hook(Arc::new(RecordingHook {
            name: "first",
            seen: seen.clone(),
        }));
        router.register_global_hook(Arc::new(RecordingHook {
            name: "second",
            seen: seen.clone(),
        }));

        router.navigate("/").await.expect("should navigate");

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["first:home".to_string(), "second:home".to_string()]
        );
    }

    #[tokio::test]
    async fn aborting_hook_fails_the_navigation() {
        let router = Router::new(three_route_table(Arc::new(CountingLoader::new("deferred"))), "");
        router.register_global_hook(Arc::new(GateHook { blocked: "bare" }));

        router.navigate("/").await.expect("should navigate");
        let err = router.navigate("/bare").await.unwrap_err();
        assert_eq!(
            err,
            NavigationError::Aborted {
                reason: "blocked by gate".to_string()
            }
        );
        assert_eq!(
            router.current_route().expect("current").name.as_str(),
            "home"
        );
    }

    #[tokio::test]
    async fn redirecting_hook_restarts_resolution() {
        let router = Router::new(three_route_table(Arc::new(CountingLoader::new("deferred"))), "");
        router.register_global_hook(Arc::new(RedirectHook {
            from: "/bare",
            to: "/",
        }));

        let outcome = router.navigate("/bare").await.expect("should navigate");
        assert_eq!(outcome.route.name.as_str(), "home");
    }

    #[tokio::test]
    async fn redirect_loop_hits_the_limit() {
        let table = RouteTable::builder()
            .route(eager("ping", "/ping"))
            .and_then(|b| b.route(eager("pong", "/pong")))
            .expect("valid table")
            .build();
        let router = Router::new(table, "");
        router.register_global_hook(Arc::new(RedirectHook {
            from: "/ping",
            to: "/pong",
        }));
        router.register_global_hook(Arc::new(RedirectHook {
            from: "/pong",
            to: "/ping",
        }));

        let err = router.navigate("/ping").await.unwrap_err();
        assert!(matches!(err, NavigationError::RedirectLimitExceeded { .. }));
    }

    #[tokio::test]
    async fn stalled_hook_times_out() {
        let router = Router::new(three_route_table(Arc::new(CountingLoader::new("deferred"))), "")
            .with_hook_timeout(Duration::from_millis(50));
        router.register_global_hook(Arc::new(StalledHook));

        let err = router.navigate("/").await.unwrap_err();
        assert!(matches!(err, NavigationError::HookTimedOut { .. }));
    }

    #[tokio::test]
    async fn hook_dropping_its_continuation_fails_the_navigation() {
        let router = Router::new(three_route_table(Arc::new(CountingLoader::new("deferred"))), "");
        router.register_global_hook(Arc::new(ForgetfulHook));

        let err = router.navigate("/").await.unwrap_err();
        assert_eq!(
            err,
            NavigationError::HookFailed {
                hook: "forgetful".to_string()
            }
        );
    }

    #[tokio::test]
    async fn newer_navigation_supersedes_an_in_flight_one() {
        let router = Arc::new(Router::new(
            three_route_table(Arc::new(CountingLoader::new("deferred"))),
            "",
        ));
        router.register_global_hook(Arc::new(SlowHook {
            path: "/bare",
            delay: Duration::from_millis(100),
        }));

        let slow = {
            let router = router.clone();
            tokio::spawn(async move { router.navigate("/bare").await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        let fast = router.navigate("/").await.expect("should navigate");
        assert_eq!(fast.route.name.as_str(), "home");

        let err = slow.await.expect("task").unwrap_err();
        assert_eq!(err, NavigationError::Superseded);
        assert_eq!(
            router.current_route().expect("current").name.as_str(),
            "home"
        );
    }

    #[tokio::test]
    async fn fallback_route_catches_unmatched_paths_when_registered() {
        let table = RouteTable::builder()
            .route(eager("home", "/").with_title("Home"))
            .and_then(|b| b.fallback(eager("not-found", "/404").with_title("Not Found")))
            .expect("valid table")
            .build();
        let router = Router::new(table, "");
        let title = DocumentTitle::default();
        router.register_global_hook(Arc::new(TitleHook::new(
            Arc::new(title.clone()),
            "Fallback",
        )));

        let outcome = router.navigate("/missing").await.expect("fallback");
        assert_eq!(outcome.route.name.as_str(), "not-found");
        assert_eq!(title.get(), "Not Found");
    }

    #[tokio::test]
    async fn replace_does_not_grow_the_history() {
        let (router, _title) = titled_router(Arc::new(CountingLoader::new("deferred")));

        router.navigate("/").await.expect("push");
        router.navigate_replace("/bare").await.expect("replace");

        let location = router.current_location().expect("location");
        assert_eq!(location.href, "/bare");
        assert_eq!(location.kind, EntryKind::Replace);
    }

    #[tokio::test]
    async fn resolve_is_exposed_without_side_effects() {
        let (router, title) = titled_router(Arc::new(CountingLoader::new("deferred")));

        let route = router.resolve("/deferred").expect("match");
        assert_eq!(route.name.as_str(), "deferred");
        // Resolution alone neither navigates nor titles.
        assert!(router.current_route().is_none());
        assert_eq!(title.get(), "");
    }
}
