//! HTTP implementation of the REST transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;
use tracing::debug;

use super::{routes, Method, Request, RestError};

/// REST transport over HTTP with bot-token authentication.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport against the default API base URL.
    pub fn new(token: &str) -> Result<Self, RestError> {
        Self::with_base_url(token, routes::API_BASE_URL)
    }

    /// Build a transport against a custom base URL (proxies, tests).
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self, RestError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bot {token}"))
            .map_err(|_| RestError::Status {
                status: 0,
                message: "bot token contains invalid header characters".into(),
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Patch => Self::PATCH,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

#[async_trait]
impl super::Transport for HttpTransport {
    async fn execute(&self, request: Request) -> Result<Value, RestError> {
        let url = format!("{}/{}", self.base_url, request.route);
        debug!(method = %request.method, route = %request.route, "Executing API request");

        let mut builder = self.http.request(request.method.into(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RestError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
