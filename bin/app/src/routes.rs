//! The declarative ZIP FIT route table and router assembly.
//!
//! Three navigable views: the home page (eagerly bound), the AI
//! consultation, and the listing board (both deferred). Each route carries
//! its display title in `meta.title`; the title hook is the single global
//! hook and applies it before every transition completes.
//!
//! No catch-all route is registered: an unmatched path surfaces a
//! not-found navigation error and leaves the title untouched.

use crate::config::AppConfig;
use crate::pages::{AiViewLoader, HomeView, ListViewLoader};
use rootcause::prelude::Report;
use std::sync::Arc;
use std::time::Duration;
use zipfit_router::{
    DocumentTitle, Route, RouteTable, RouteTableError, Router, TitleHook, ViewHandle,
};
use zipfit_state::StateRegistry;

/// Builds the ZIP FIT route table.
///
/// # Errors
///
/// Returns an error when the declarations collide; with this fixed table
/// that indicates a programming error.
pub fn route_table(state: Arc<StateRegistry>) -> Result<RouteTable, RouteTableError> {
    let table = RouteTable::builder()
        .route(
            Route::eager("home", "/", ViewHandle::new(HomeView))?.with_title("홈 - ZIP FIT"),
        )?
        .route(Route::lazy("ai", "/ai", Arc::new(AiViewLoader))?.with_title("AI 상담 - ZIP FIT"))?
        .route(
            Route::lazy("list", "/list", Arc::new(ListViewLoader::new(state)))?
                .with_title("공고 목록 - ZIP FIT"),
        )?
        .build();
    Ok(table)
}

/// Assembles the router: route table, base path, hook timeout, and the
/// title hook writing into the shared document title.
///
/// # Errors
///
/// Returns an error when the route table cannot be built.
pub fn build_router(
    config: &AppConfig,
    title: DocumentTitle,
    state: Arc<StateRegistry>,
) -> zipfit_core::Result<Arc<Router>, RouteTableError> {
    let table = route_table(state).map_err(Report::from)?;
    let router = Router::new(table, &config.base_path)
        .with_hook_timeout(Duration::from_millis(config.hook_timeout_ms));
    router.register_global_hook(Arc::new(TitleHook::new(
        Arc::new(title),
        config.fallback_title.clone(),
    )));
    Ok(Arc::new(router))
}
