use axum::response::Html;

const INDEX_HTML: &str = include_str!("../templates/index.html");

/// Render the landing page, injecting the served site directory.
pub fn render_index(site_dir: &str) -> Html<String> {
    let html = INDEX_HTML.replace("{{ site_dir }}", site_dir);
    Html(html)
}
