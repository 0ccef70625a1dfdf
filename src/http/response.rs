//! HTTP response building module
//!
//! Frames a dispatch outcome as a hyper response. Every response is JSON
//! with an open CORS origin; preflight responses also list the allowed
//! methods and headers.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE";
pub const ALLOWED_HEADERS: &str = "X-Requested-With, Content-Type, Accept";

/// Status code and serialized body produced by the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOutcome {
    pub status: StatusCode,
    pub body: String,
    /// CORS preflight answer, framed with the extra `Access-Control-Allow-*` headers
    pub preflight: bool,
}

impl HttpOutcome {
    pub const fn new(status: StatusCode, body: String) -> Self {
        Self {
            status,
            body,
            preflight: false,
        }
    }

    pub const fn empty(status: StatusCode) -> Self {
        Self::new(status, String::new())
    }

    /// Fixed answer to an OPTIONS request
    pub const fn preflight() -> Self {
        Self {
            status: StatusCode::OK,
            body: String::new(),
            preflight: true,
        }
    }
}

/// Build the response for a dispatch outcome
pub fn write_outcome(outcome: HttpOutcome) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(outcome.status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*");

    if outcome.preflight {
        builder = builder
            .header("Access-Control-Allow-Methods", ALLOWED_METHODS)
            .header("Access-Control-Allow-Headers", ALLOWED_HEADERS);
    }

    builder
        .body(Full::new(Bytes::from(outcome.body)))
        .unwrap_or_else(|e| {
            log_build_error(outcome.status, &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
