//! Home page view.

use zipfit_router::View;

/// The ZIP FIT landing page.
pub struct HomeView;

impl View for HomeView {
    fn name(&self) -> &str {
        "home"
    }

    fn render(&self) -> String {
        concat!(
            "<main class=\"home\">",
            "<h1>ZIP FIT</h1>",
            "<p>내게 맞는 주거 공고를 찾아보세요.</p>",
            "<nav><a href=\"/ai\">AI 상담</a> <a href=\"/list\">공고 목록</a></nav>",
            "</main>"
        )
        .to_string()
    }
}
