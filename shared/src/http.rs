//! HTTP envelope for the schedule Lambda.
//!
//! `ScheduleRequest`/`ScheduleResponse` are the normalized shapes the
//! dispatcher works with; the conversions here are the only place that
//! knows about `lambda_http`.

use lambda_http::{Body, Request, RequestExt, Response};
use serde::Serialize;
use std::collections::HashMap;

use crate::Error;

/// Headers attached to every response, including errors and preflight.
pub const CORS_HEADERS: [(&str, &str); 5] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type, X-User-Id"),
    ("Access-Control-Max-Age", "86400"),
];

/// Normalized inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub method: String,
    pub path: String,
    /// Raw body bytes; decoded only by routes that read a body.
    pub body: Option<Vec<u8>>,
    pub query: HashMap<String, String>,
}

impl ScheduleRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into().into_bytes());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Build from a Lambda HTTP event. Multi-valued query parameters keep their first value.
    pub fn from_lambda(event: &Request) -> Self {
        let mut query = HashMap::new();
        for (key, value) in event.query_string_parameters().iter() {
            query
                .entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }

        let body: &[u8] = event.body().as_ref();

        Self {
            method: event.method().as_str().to_string(),
            path: event.uri().path().to_string(),
            body: (!body.is_empty()).then(|| body.to_vec()),
            query,
        }
    }

    /// The request body as text, with an absent or blank body read as `{}`.
    ///
    /// A body that is not UTF-8 is rejected rather than read as empty.
    pub fn body_or_empty_object(&self) -> Result<&str, Error> {
        let Some(raw) = self.body.as_deref() else {
            return Ok("{}");
        };
        let body = std::str::from_utf8(raw)
            .map_err(|e| Error::InvalidParameter(format!("request body is not UTF-8: {}", e)))?;
        Ok(if body.trim().is_empty() { "{}" } else { body })
    }

    /// Query parameter lookup.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

/// Normalized outbound response; headers are fixed and applied on conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleResponse {
    pub status_code: u16,
    pub body: String,
}

impl ScheduleResponse {
    /// JSON response with the given status code.
    pub fn json<T: Serialize>(status: u16, data: &T) -> Result<Self, Error> {
        Ok(Self {
            status_code: status,
            body: serde_json::to_string(data)?,
        })
    }

    /// CORS preflight answer: 200 with an empty body.
    pub fn preflight() -> Self {
        Self {
            status_code: 200,
            body: String::new(),
        }
    }

    /// `{"error": "<message>"}` with the error's status code.
    pub fn from_error(error: &Error) -> Self {
        Self {
            status_code: error.status_code(),
            body: serde_json::json!({ "error": error.to_string() }).to_string(),
        }
    }

    /// Convert into a Lambda HTTP response carrying the CORS headers.
    pub fn into_lambda(self) -> Result<Response<Body>, lambda_http::Error> {
        let mut builder = Response::builder().status(self.status_code);
        for (name, value) in CORS_HEADERS {
            builder = builder.header(name, value);
        }
        Ok(builder.body(Body::from(self.body))?)
    }
}
