//! Integration tests for HC Burgers.
//!
//! Each test boots the real storefront router on an ephemeral port and
//! drives it over HTTP with a cookie-keeping client, the way a browser tab
//! would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p hc-integration-tests
//! ```

#![allow(clippy::missing_panics_doc)]

use std::path::PathBuf;
use std::sync::Arc;

use hc_storefront::{app, config::StorefrontConfig, state::AppState};
use reqwest::{Client, Response, cookie::Jar, redirect::Policy};
use tokio::{net::TcpListener, task::JoinHandle};

/// A running storefront plus one visitor's browser.
pub struct TestServer {
    base_url: String,
    /// Follows redirects, like a browser submitting a form.
    client: Client,
    /// Shares cookies with `client` but stops at the first response.
    raw: Client,
    handle: JoinHandle<()>,
}

/// Test configuration: defaults plus the real static directory.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/static"),
        ..StorefrontConfig::default()
    }
}

impl TestServer {
    /// Start a storefront with the test configuration.
    pub async fn start() -> Self {
        Self::start_with(test_config()).await
    }

    /// Start a storefront with a custom configuration.
    pub async fn start_with(config: StorefrontConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local address");
        let router = app(AppState::new(config));

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve storefront");
        });

        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()
            .expect("build client");
        let raw = Client::builder()
            .cookie_provider(jar)
            .redirect(Policy::none())
            .build()
            .expect("build client");

        Self {
            base_url: format!("http://{addr}"),
            client,
            raw,
            handle,
        }
    }

    /// Absolute URL for a site path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a page and return its body.
    pub async fn page(&self, path: &str) -> String {
        let response = self.get(path).await;
        assert!(response.status().is_success(), "GET {path}: {}", response.status());
        response.text().await.expect("read body")
    }

    /// GET a path and return the response.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("send request")
    }

    /// Submit a form and return the page it redirects to.
    pub async fn submit(&self, path: &str, fields: &[(&str, &str)]) -> String {
        let response = self
            .client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .expect("send form");
        assert!(response.status().is_success(), "POST {path}: {}", response.status());
        response.text().await.expect("read body")
    }

    /// Submit a form without following the redirect.
    pub async fn submit_raw(&self, path: &str, fields: &[(&str, &str)]) -> Response {
        self.raw
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .expect("send form")
    }

    /// Add one unit of a dish the way the menu card does.
    pub async fn add(&self, name: &str, price: &str) -> String {
        self.submit(
            "/pedido/adicionar",
            &[("name", name), ("price", price), ("return_to", "/pedido")],
        )
        .await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Text of the toast in a rendered page, if one is shown.
#[must_use]
pub fn toast_text(html: &str) -> Option<&str> {
    let start = html.find(r#"class="toast""#)?;
    let open = start + html.get(start..)?.find('>')? + 1;
    let close = open + html.get(open..)?.find("</div>")?;
    html.get(open..close)
}

/// Number shown in the header cart badge.
#[must_use]
pub fn badge_text(html: &str) -> Option<&str> {
    let start = html.find(r#"class="cart-count""#)?;
    let open = start + html.get(start..)?.find('>')? + 1;
    let close = open + html.get(open..)?.find("</span>")?;
    html.get(open..close)
}
