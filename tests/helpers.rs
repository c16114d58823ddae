// Shared test helpers for running the proxy against mock upstream pages.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use page_meta_proxy::initialization::init_client;
use page_meta_proxy::{serve, AppState, Config};

/// A proxy instance bound to an ephemeral port.
#[allow(dead_code)] // Used by other test files
pub struct TestProxy {
    pub addr: SocketAddr,
    pub state: AppState,
    pub cancel: CancellationToken,
    pub handle: JoinHandle<Result<(), anyhow::Error>>,
}

#[allow(dead_code)]
impl TestProxy {
    /// Full URL of `/meta` for `target`, with the query value percent-encoded.
    pub fn meta_url(&self, target: &str) -> String {
        let mut url = url::Url::parse(&format!("http://{}/meta", self.addr)).unwrap();
        url.query_pairs_mut().append_pair("url", target);
        url.to_string()
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Stops the server and waits for it to drain.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        self.handle
            .await
            .expect("server task panicked")
            .expect("server returned an error");
    }
}

/// Starts a proxy on `127.0.0.1:0` with the given configuration.
#[allow(dead_code)]
pub async fn spawn_proxy_with(config: Config) -> TestProxy {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no address");
    let client = init_client(&config).expect("Failed to create HTTP client");
    let state = AppState::new(client, config.cache_max_age);
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(serve(listener, state.clone(), cancel.clone()));
    TestProxy {
        addr,
        state,
        cancel,
        handle,
    }
}

/// Starts a proxy with default configuration.
#[allow(dead_code)]
pub async fn spawn_proxy() -> TestProxy {
    spawn_proxy_with(Config::default()).await
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    listener.local_addr().expect("listener has no address")
}

#[allow(dead_code)]
pub const ARTICLE_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Example Domain</title>
  <meta name="description" content="An example page">
  <meta property="og:title" content="Example OG">
  <meta property="og:image" content="https://cdn.example.com/og.png">
  <meta name="twitter:card" content="summary">
  <link rel="canonical" href="/article">
  <link rel="icon" href="/favicon.ico" sizes="32x32">
  <link rel="alternate" hreflang="fr" href="/fr/article">
</head>
<body>
  <script>document.title = "<title>not this</title>";</script>
  <p>Content</p>
</body>
</html>"#;
