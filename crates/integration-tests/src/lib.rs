//! Integration tests for the storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p eliminator-integration-tests
//! ```
//!
//! Tests drive the real router in-process; no server or network is
//! needed. [`TestClient`] plays the browser: it keeps cookies between
//! requests so the page session and the remembered visitor survive across
//! calls the same way they do for a visitor.

use std::collections::BTreeMap;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use tower::ServiceExt;

use eliminator_storefront::{
    app, catalog::Catalog, config::StorefrontConfig, state::AppState,
};

/// Response captured by [`TestClient`].
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// All `Set-Cookie` header values.
    #[must_use]
    pub fn set_cookies(&self) -> Vec<&str> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    /// Whether a `Set-Cookie` header starts with `prefix`.
    #[must_use]
    pub fn sets_cookie(&self, prefix: &str) -> bool {
        self.set_cookies().iter().any(|c| c.starts_with(prefix))
    }
}

/// In-process browser stand-in with a cookie jar.
pub struct TestClient {
    app: Router,
    cookies: BTreeMap<String, String>,
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClient {
    /// Client for a storefront with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StorefrontConfig::default())
    }

    /// Client for a storefront with the given configuration.
    #[must_use]
    pub fn with_config(config: StorefrontConfig) -> Self {
        Self {
            app: app(AppState::new(config, Catalog::builtin())),
            cookies: BTreeMap::new(),
        }
    }

    /// Put a cookie in the jar, as if stored by an earlier visit.
    pub fn set_cookie(&mut self, name: &str, value: &str) {
        self.cookies.insert(name.to_owned(), value.to_owned());
    }

    /// Read a cookie from the jar.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Send a GET request.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = self.request("GET", path).body(Body::empty());
        self.send(request).await
    }

    /// Send a form-encoded POST request.
    pub async fn post_form(&mut self, path: &str, form: &str) -> TestResponse {
        let request = self
            .request("POST", path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_owned()));
        self.send(request).await
    }

    /// Send the same form-encoded POST `times` times at once, all with the
    /// current cookies.
    pub async fn post_form_concurrently(
        &mut self,
        path: &str,
        form: &str,
        times: usize,
    ) -> Vec<TestResponse> {
        let mut tasks = Vec::with_capacity(times);
        for _ in 0..times {
            let request = self
                .request("POST", path)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_owned()))
                .expect("valid test request");
            let app = self.app.clone();
            tasks.push(tokio::spawn(async move {
                let response = match app.oneshot(request).await {
                    Ok(response) => response,
                    Err(never) => match never {},
                };
                read_response(response).await
            }));
        }

        let mut responses = Vec::with_capacity(times);
        for task in tasks {
            let response = task.await.expect("request task completed");
            self.store_cookies(&response);
            responses.push(response);
        }
        responses
    }

    fn request(&self, method: &str, path: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(path);
        if self.cookies.is_empty() {
            return builder;
        }
        let cookie_header = self
            .cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        builder.header(header::COOKIE, cookie_header)
    }

    async fn send(
        &mut self,
        request: Result<Request<Body>, axum::http::Error>,
    ) -> TestResponse {
        let request = request.expect("valid test request");
        let response = match self.app.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        let response = read_response(response).await;
        self.store_cookies(&response);
        response
    }

    fn store_cookies(&mut self, response: &TestResponse) {
        for set_cookie in response.set_cookies() {
            let mut attributes = set_cookie.split(';').map(str::trim);
            let Some((name, value)) = attributes.next().and_then(|pair| pair.split_once('='))
            else {
                continue;
            };
            if attributes.any(|attr| attr.eq_ignore_ascii_case("Max-Age=0")) {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_owned(), value.to_owned());
            }
        }
    }
}

async fn read_response(response: axum::response::Response) -> TestResponse {
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");

    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}
