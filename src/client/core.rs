// File: src/client/core.rs
//! Thin JSON-over-HTTPS client shared by the task providers.
use crate::client::auth::BearerAuthLayer;

use anyhow::{Context, Result, anyhow};
use http::{HeaderValue, Method, Request, header};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tower::{ServiceBuilder, ServiceExt};

/// Upper bound for one request/response exchange.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("todo-snapshot/", env!("CARGO_PKG_VERSION"));
const ERROR_EXCERPT_CHARS: usize = 200;

type HttpsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, String>;

#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: HttpsClient,
}

impl HttpClient {
    pub fn new() -> Self {
        let mut root_store = rustls::RootCertStore::empty();
        let result = rustls_native_certs::load_native_certs();
        for err in &result.errors {
            log::warn!("Skipping unreadable system certificate: {}", err);
        }
        root_store.add_parsable_certificates(result.certs);
        if root_store.is_empty() {
            log::warn!("No valid system certificates found; HTTPS requests will fail");
        }

        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let https_connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls_config)
            .https_or_http()
            .enable_http1()
            .build();

        Self {
            inner: Client::builder(TokioExecutor::new()).build(https_connector),
        }
    }

    /// GET `url` with bearer auth and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, token: &str) -> Result<T> {
        let req = Request::builder()
            .method(Method::GET)
            .uri(url)
            .header(header::ACCEPT, "application/json")
            .body(String::new())
            .with_context(|| format!("Invalid request URL '{}'", url))?;
        let body = self.send(req, Some(token)).await?;
        serde_json::from_slice(&body).with_context(|| format!("Unexpected response from {}", url))
    }

    /// POST an `application/x-www-form-urlencoded` body and decode the JSON reply.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<T> {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(form)
            .finish();
        let req = Request::builder()
            .method(Method::POST)
            .uri(url)
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(encoded)
            .with_context(|| format!("Invalid request URL '{}'", url))?;
        let body = self.send(req, None).await?;
        serde_json::from_slice(&body).with_context(|| format!("Unexpected response from {}", url))
    }

    async fn send(&self, mut req: Request<String>, token: Option<&str>) -> Result<Vec<u8>> {
        req.headers_mut()
            .insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        let target = format!("{} {}", req.method(), req.uri());
        log::debug!("{}", target);

        let service = ServiceBuilder::new()
            .layer(BearerAuthLayer::new(token))
            .service(self.inner.clone());

        let exchange = async {
            let response = service.oneshot(req).await?;
            let status = response.status();
            let body = response.into_body().collect().await?.to_bytes().to_vec();
            Ok::<_, anyhow::Error>((status, body))
        };

        let (status, body) = tokio::time::timeout(REQUEST_TIMEOUT, exchange)
            .await
            .map_err(|_| {
                anyhow!(
                    "{} timed out after {}s",
                    target,
                    REQUEST_TIMEOUT.as_secs()
                )
            })?
            .with_context(|| format!("{} failed", target))?;

        log::debug!("{} -> {}", target, status);
        if !status.is_success() {
            let detail = excerpt(&body);
            if detail.is_empty() {
                return Err(anyhow!("HTTP {}", status));
            }
            return Err(anyhow!("HTTP {}: {}", status, detail));
        }
        Ok(body)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

/// First characters of an error body, collapsed to one line.
fn excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > ERROR_EXCERPT_CHARS {
        let cut: String = flat.chars().take(ERROR_EXCERPT_CHARS).collect();
        format!("{}...", cut)
    } else {
        flat
    }
}
