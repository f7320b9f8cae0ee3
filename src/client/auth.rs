// File: ./src/client/auth.rs
//! Tower middleware that attaches an OAuth-style bearer token.
use http::{HeaderValue, Request};
use std::task::{Context, Poll};
use tower_layer::Layer;
use tower_service::Service;

#[derive(Clone, Debug, Default)]
pub struct BearerAuthLayer {
    token: Option<String>,
}

impl BearerAuthLayer {
    /// `None` leaves requests untouched (e.g. the token exchange itself).
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: token.map(str::to_string),
        }
    }
}

impl<S> Layer<S> for BearerAuthLayer {
    type Service = BearerAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BearerAuthService {
            inner,
            token: self.token.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BearerAuthService<S> {
    inner: S,
    token: Option<String>,
}

impl<S, ReqBody> Service<Request<ReqBody>> for BearerAuthService<S>
where
    S: Service<Request<ReqBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        if let Some(token) = &self.token {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(mut val) => {
                    val.set_sensitive(true);
                    req.headers_mut().insert(http::header::AUTHORIZATION, val);
                }
                // The server will answer 401, which is reported to the user.
                Err(_) => log::warn!("Bearer token contains invalid header characters"),
            }
        }
        self.inner.call(req)
    }
}
