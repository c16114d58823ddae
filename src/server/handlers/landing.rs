//! Landing page handler.

use axum::response::Html;

const LANDING_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Page Meta Proxy</title>
</head>
<body>
<h1>Page Meta Proxy</h1>
<p>Fetches a page and returns the metadata in its <code>&lt;head&gt;</code> as JSON:
title, description, canonical URL, icons, alternates, Open Graph and Twitter Card tags.</p>
<pre>GET /meta?url=https://example.com</pre>
<p>See <a href="/doc">/doc</a> for the OpenAPI description and <a href="/status">/status</a> for request counters.</p>
</body>
</html>
"#;

pub async fn landing_handler() -> Html<&'static str> {
    Html(LANDING_PAGE)
}
