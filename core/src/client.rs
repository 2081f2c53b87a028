//! Blocking HTTP client bound to one base URL.
//!
//! # Design
//! `ApiClient` owns a single `ureq::Agent` created at construction. The agent
//! keeps the connection pool and cookie jar, so consecutive calls on the same
//! client share keep-alive connections and session cookies. The agent is never
//! handed out or cloned; it lives and dies with its client.
//!
//! The verb methods only assemble an `ApiRequest` and pass it to `send`, the
//! one place that joins the URL, applies params, headers and body, and maps
//! transport failures. Status codes are never interpreted here.

use std::fmt;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, warn};
use ureq::http::Response;
use ureq::typestate::{WithBody, WithoutBody};
use ureq::{Agent, Body, RequestBuilder};

use crate::config::{ClientConfig, DEFAULT_TIMEOUT};
use crate::error::ApiError;
use crate::http::{ApiRequest, ApiResponse, Form, Headers, HttpMethod, Params, Payload};

/// Synchronous client for one API host.
///
/// Every request is bounded by the client's timeout. Any HTTP status comes
/// back as `Ok(ApiResponse)`; only transport failures are errors.
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
    agent: Agent,
}

/// Request body after JSON serialization.
enum Encoded<'a> {
    Json(Vec<u8>),
    Form(&'a Form),
}

impl ApiClient {
    /// Client with the default 30 second timeout.
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            agent,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_timeout(&config.base_url, config.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Join `endpoint` onto the base URL with exactly one slash between them.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    pub fn get(
        &self,
        endpoint: &str,
        params: Option<Params>,
        headers: Option<Headers>,
    ) -> Result<ApiResponse, ApiError> {
        self.send(&ApiRequest {
            params,
            headers,
            ..ApiRequest::new(HttpMethod::Get, endpoint)
        })
    }

    pub fn post(
        &self,
        endpoint: &str,
        data: Option<Form>,
        json: Option<Value>,
        headers: Option<Headers>,
    ) -> Result<ApiResponse, ApiError> {
        self.send(&ApiRequest {
            data,
            json,
            headers,
            ..ApiRequest::new(HttpMethod::Post, endpoint)
        })
    }

    pub fn put(
        &self,
        endpoint: &str,
        data: Option<Form>,
        json: Option<Value>,
        headers: Option<Headers>,
    ) -> Result<ApiResponse, ApiError> {
        self.send(&ApiRequest {
            data,
            json,
            headers,
            ..ApiRequest::new(HttpMethod::Put, endpoint)
        })
    }

    pub fn delete(&self, endpoint: &str, headers: Option<Headers>) -> Result<ApiResponse, ApiError> {
        self.send(&ApiRequest {
            headers,
            ..ApiRequest::new(HttpMethod::Delete, endpoint)
        })
    }

    /// Execute `request` and return the response whatever its status.
    pub fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url(&request.endpoint);
        let body = match request.payload() {
            Some(Payload::Json(value)) => {
                Some(Encoded::Json(serde_json::to_vec(value).map_err(ApiError::Serialization)?))
            }
            Some(Payload::Form(form)) => Some(Encoded::Form(form)),
            None => None,
        };

        debug!(method = %request.method, %url, "sending request");
        let started = Instant::now();

        let mut response = self
            .dispatch(&url, request, body)
            .map_err(|e| self.transport_error(&url, e))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // No size cap: an oversized body is still a valid response.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| self.transport_error(&url, e))?;

        debug!(
            method = %request.method,
            %url,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "received response"
        );
        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }

    fn dispatch(
        &self,
        url: &str,
        request: &ApiRequest,
        body: Option<Encoded<'_>>,
    ) -> Result<Response<Body>, ureq::Error> {
        match request.method {
            HttpMethod::Get => send_without_body(decorate(self.agent.get(url), request), body),
            HttpMethod::Delete => send_without_body(decorate(self.agent.delete(url), request), body),
            HttpMethod::Post => send_with_body(decorate(self.agent.post(url), request), body),
            HttpMethod::Put => send_with_body(decorate(self.agent.put(url), request), body),
        }
    }

    fn transport_error(&self, url: &str, source: ureq::Error) -> ApiError {
        warn!(%url, error = %source, "request failed");
        match source {
            ureq::Error::Timeout(_) => ApiError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            },
            source => ApiError::Transport {
                url: url.to_string(),
                source,
            },
        }
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn decorate<B>(mut builder: RequestBuilder<B>, request: &ApiRequest) -> RequestBuilder<B> {
    for (key, value) in request.params.iter().flatten() {
        builder = builder.query(key, value);
    }
    for (name, value) in request.headers.iter().flatten() {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send_without_body(
    builder: RequestBuilder<WithoutBody>,
    body: Option<Encoded<'_>>,
) -> Result<Response<Body>, ureq::Error> {
    match body {
        None => builder.call(),
        Some(body) => send_with_body(builder.force_send_body(), Some(body)),
    }
}

fn send_with_body(
    builder: RequestBuilder<WithBody>,
    body: Option<Encoded<'_>>,
) -> Result<Response<Body>, ureq::Error> {
    match body {
        None => builder.send_empty(),
        Some(Encoded::Json(bytes)) => builder.content_type("application/json").send(&bytes[..]),
        Some(Encoded::Form(form)) => {
            builder.send_form(form.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        }
    }
}
