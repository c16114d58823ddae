//! End-to-end extraction tests over in-memory documents.

use super::*;

fn facts(url: &str) -> RequestFacts {
    RequestFacts {
        requested_url: url.to_string(),
        final_url: None,
        status: 200,
        content_type: Some("text/html".to_string()),
    }
}

fn extract(url: &str, html: &str) -> MetaExtractionResult {
    extract_from_html(facts(url), html.as_bytes()).expect("base url should parse")
}

const RICH_PAGE: &str = r##"<!doctype html>
<html lang="en-US">
<head>
<meta charset="UTF-8">
<meta http-equiv="X-UA-Compatible" content="IE=edge">
<title>
  GitHub: Let's build from here
</title>
<meta name="description" content="GitHub is where over 100 million developers shape the future of software.">
<meta property="og:title" content="GitHub: Let's build from here">
<meta property="og:image" content="../images/og.png">
<meta property="og:description" content="Join the world's most widely adopted developer platform.">
<meta name="twitter:card" content="summary_large_image">
<meta name="twitter:site" content="@github">
<meta name="theme-color" content="#1e2327">
<link rel="canonical" href="/page">
<link rel="icon" href="favicon.ico" type="image/x-icon">
<link rel="apple-touch-icon" href="/apple-touch-icon.png" sizes="180x180">
<link rel="alternate" hreflang="ja" href="https://example.com/ja/">
<link rel="alternate" type="application/rss+xml" title="RSS Feed" href="/feed.xml">
<link rel="stylesheet" href="/main.css">
</head>
<body><h1>Body is never inspected</h1></body>
</html>"##;

#[test]
fn test_rich_page() {
    let result = extract("https://example.com/page", RICH_PAGE);

    assert_eq!(result.lang.as_deref(), Some("en-US"));
    assert_eq!(result.title.as_deref(), Some("GitHub: Let's build from here"));
    assert_eq!(result.charset.as_deref(), Some("UTF-8"));
    assert_eq!(
        result.description.as_deref(),
        Some("GitHub is where over 100 million developers shape the future of software.")
    );
    assert_eq!(result.theme_color.as_deref(), Some("#1e2327"));
    assert_eq!(result.canonical.as_deref(), Some("https://example.com/page"));
    assert_eq!(
        result.favicon.as_deref(),
        Some("https://example.com/favicon.ico")
    );
    assert_eq!(result.og.get("image").map(String::as_str), Some("../images/og.png"));
    assert_eq!(
        result.twitter.get("card").map(String::as_str),
        Some("summary_large_image")
    );
    assert_eq!(result.meta_tags.len(), 9);
    assert_eq!(result.meta_tags[1].http_equiv.as_deref(), Some("X-UA-Compatible"));
    assert_eq!(result.link_tags.len(), 6);
    assert_eq!(result.icons.len(), 2);

    assert_eq!(result.alternates.len(), 2);
    assert_eq!(result.alternates[0].hreflang.as_deref(), Some("ja"));
    assert_eq!(result.alternates[0].href, "https://example.com/ja/");
    assert_eq!(result.alternates[1].hreflang, None);
    assert_eq!(result.alternates[1].title.as_deref(), Some("RSS Feed"));
    assert_eq!(result.alternates[1].href, "https://example.com/feed.xml");
}

#[test]
fn test_single_description_without_og() {
    let result = extract(
        "https://example.com/",
        r#"<html><head><meta name="description" content="X"></head></html>"#,
    );
    assert_eq!(result.description.as_deref(), Some("X"));
}

#[test]
fn test_duplicate_html_tag_keeps_first_lang() {
    let result = extract(
        "https://example.com/",
        r#"<html lang="en"><head></head><html lang="fr"><body></body></html>"#,
    );
    assert_eq!(result.lang.as_deref(), Some("en"));
}

#[test]
fn test_relative_hrefs_resolve_against_final_url() {
    let mut request = facts("http://example.com/start");
    request.final_url = Some("https://www.example.com/blog/post".to_string());
    let result = extract_from_html(
        request,
        br#"<html><head><link rel="canonical" href="../about"><link rel="icon" href="i.png"></head>"#,
    )
    .unwrap();
    assert_eq!(result.requested_url, "http://example.com/start");
    assert_eq!(result.final_url, "https://www.example.com/blog/post");
    assert_eq!(result.canonical.as_deref(), Some("https://www.example.com/about"));
    assert_eq!(
        result.favicon.as_deref(),
        Some("https://www.example.com/blog/i.png")
    );
}

#[test]
fn test_page_without_head_metadata() {
    let result = extract("https://example.com/", "<p>just text</p>");
    assert_eq!(result.title, None);
    assert!(result.meta_tags.is_empty());
    assert!(result.link_tags.is_empty());
    assert!(result.og.is_empty());
}

#[test]
fn test_identical_input_yields_identical_json() {
    let first = serde_json::to_string(&extract("https://example.com/page", RICH_PAGE)).unwrap();
    let second = serde_json::to_string(&extract("https://example.com/page", RICH_PAGE)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_invalid_base_url_is_rejected() {
    assert!(extract_from_html(facts("not a url"), b"<html></html>").is_none());
}
