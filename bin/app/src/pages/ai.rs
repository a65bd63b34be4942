//! AI-consultation page view.

use async_trait::async_trait;
use zipfit_router::{View, ViewError, ViewHandle, ViewLoader};

/// The AI housing-consultation page.
pub struct AiView;

impl View for AiView {
    fn name(&self) -> &str {
        "ai"
    }

    fn render(&self) -> String {
        concat!(
            "<main class=\"ai\">",
            "<h1>AI 상담</h1>",
            "<p>조건을 입력하면 맞춤 공고를 추천해 드립니다.</p>",
            "</main>"
        )
        .to_string()
    }
}

/// Deferred loader for the AI-consultation page.
pub struct AiViewLoader;

#[async_trait]
impl ViewLoader for AiViewLoader {
    async fn load(&self) -> Result<ViewHandle, ViewError> {
        tracing::debug!(view = "ai", "loading deferred page view");
        // Chunk fetch seam; the in-process page is available immediately.
        tokio::task::yield_now().await;
        Ok(ViewHandle::new(AiView))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loader_produces_the_ai_view() {
        let view = AiViewLoader.load().await.expect("should load");
        assert_eq!(view.name(), "ai");
        assert!(view.render().contains("AI 상담"));
    }
}
