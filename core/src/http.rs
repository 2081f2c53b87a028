//! Request descriptor and response types for `ApiClient`.
//!
//! # Design
//! `ApiRequest` describes one call as plain data: verb, endpoint and the
//! optional query, form, JSON and header maps. It is built per call and never
//! stored. `ApiResponse` carries the status, headers and raw body exactly as
//! received; the structured body is only parsed when the caller asks for it,
//! so a malformed JSON body is reported at that point and nowhere earlier.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Query string parameters. Primitive values are stringified by the caller.
pub type Params = BTreeMap<String, String>;

/// Form-encoded body fields.
pub type Form = BTreeMap<String, String>;

/// Request headers.
pub type Headers = BTreeMap<String, String>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One HTTP call described as plain data.
///
/// `data` and `json` are alternative body encodings. Both may be set, but
/// the transport accepts a single body per request, so only the JSON one is
/// sent when both are present (see [`ApiRequest::payload`]).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub endpoint: String,
    pub params: Option<Params>,
    pub data: Option<Form>,
    pub json: Option<Value>,
    pub headers: Option<Headers>,
}

/// The body actually put on the wire for an `ApiRequest`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload<'a> {
    Json(&'a Value),
    Form(&'a Form),
}

impl ApiRequest {
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            params: None,
            data: None,
            json: None,
            headers: None,
        }
    }

    pub fn params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    pub fn data(mut self, data: Form) -> Self {
        self.data = Some(data);
        self
    }

    pub fn json(mut self, json: Value) -> Self {
        self.json = Some(json);
        self
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Resolve which body encoding is sent. JSON wins over form data.
    pub fn payload(&self) -> Option<Payload<'_>> {
        match (&self.json, &self.data) {
            (Some(json), _) => Some(Payload::Json(json)),
            (None, Some(form)) => Some(Payload::Form(form)),
            (None, None) => None,
        }
    }
}

/// An HTTP response as received, whatever its status code.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    /// Header names are lowercase.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First value of the header `name`, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The body as text. Invalid UTF-8 sequences are replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Parse the body as JSON into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(ApiError::Deserialization)
    }

    pub fn json_value(&self) -> Result<Value, ApiError> {
        self.json()
    }
}
