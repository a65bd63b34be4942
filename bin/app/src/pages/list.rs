//! Listing-board page view.

use async_trait::async_trait;
use std::sync::Arc;
use zipfit_router::{View, ViewError, ViewHandle, ViewLoader};
use zipfit_state::StateRegistry;

/// Store consulted for saved listing filters.
const LISTING_STORE: &str = "listing";

/// The public-housing listing board.
pub struct ListView {
    state: Arc<StateRegistry>,
}

impl ListView {
    /// Creates the listing view over the shared state registry.
    pub fn new(state: Arc<StateRegistry>) -> Self {
        Self { state }
    }
}

impl View for ListView {
    fn name(&self) -> &str {
        "list"
    }

    fn render(&self) -> String {
        let region = self
            .state
            .store(LISTING_STORE)
            .get("region")
            .and_then(|v| v.as_str().map(str::to_string));

        let heading = match region {
            Some(region) => format!("<h1>공고 목록 — {region}</h1>"),
            None => "<h1>공고 목록</h1>".to_string(),
        };
        format!(
            "<main class=\"list\">{heading}<p>모집 중인 공고를 확인하세요.</p></main>"
        )
    }
}

/// Deferred loader for the listing board.
pub struct ListViewLoader {
    state: Arc<StateRegistry>,
}

impl ListViewLoader {
    /// Creates the loader over the shared state registry.
    pub fn new(state: Arc<StateRegistry>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl ViewLoader for ListViewLoader {
    async fn load(&self) -> Result<ViewHandle, ViewError> {
        tracing::debug!(view = "list", "loading deferred page view");
        tokio::task::yield_now().await;
        Ok(ViewHandle::new(ListView::new(self.state.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn loader_produces_the_list_view() {
        let state = Arc::new(StateRegistry::new());
        let view = ListViewLoader::new(state).load().await.expect("should load");
        assert_eq!(view.name(), "list");
    }

    #[test]
    fn render_reflects_saved_region_filter() {
        let state = Arc::new(StateRegistry::new());
        let view = ListView::new(state.clone());
        assert!(view.render().contains("공고 목록</h1>"));

        state.store(LISTING_STORE).set("region", json!("서울"));
        assert!(view.render().contains("공고 목록 — 서울"));
    }
}
