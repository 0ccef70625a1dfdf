//! Request entry module
//!
//! Entry point for HTTP request processing: reads the body, parses the target,
//! dispatches and frames the response, then writes the access log line.

use crate::config::AppState;
use crate::handler::dispatcher::{dispatch, DispatchError};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderMap, CONTENT_LENGTH, REFERER, USER_AGENT};
use hyper::{Request, Response, Version};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// Returning an error makes hyper drop the connection without a response,
/// which is how a malformed JSON body is answered.
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, DispatchError> {
    let started = Instant::now();

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let version = req.version();
    let referer = header_value(req.headers(), REFERER.as_str());
    let user_agent = header_value(req.headers(), USER_AGENT.as_str());
    let content_length = declared_content_length(req.headers());

    let body = read_body(req.into_body(), content_length)
        .await
        .inspect_err(|e| logger::log_error(&format!("{method} {path}: {e}")))?;

    let parsed = routing::parse(&path, query.as_deref());
    let outcome = dispatch(&state.registry, &method, &parsed, &body).inspect_err(|e| {
        logger::log_error(&format!("{method} {path}: {e}, closing connection"));
    })?;

    let status = outcome.status;
    let body_bytes = outcome.body.len();
    let response = http::write_outcome(outcome);

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), path);
        entry.query = query;
        entry.http_version = version_label(version).to_string();
        entry.status = status.as_u16();
        entry.body_bytes = body_bytes;
        entry.referer = referer;
        entry.user_agent = user_agent;
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Number of body bytes to use; an absent or unparseable `Content-Length` counts as 0
fn declared_content_length(headers: &HeaderMap) -> usize {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

/// Read at most `content_length` bytes of the body
async fn read_body(body: Incoming, content_length: usize) -> Result<Bytes, DispatchError> {
    if content_length == 0 {
        return Ok(Bytes::new());
    }

    let mut bytes = body
        .collect()
        .await
        .map_err(DispatchError::BodyRead)?
        .to_bytes();
    bytes.truncate(content_length);
    Ok(bytes)
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderValue;

    fn headers_with_length(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_missing_content_length_is_zero() {
        assert_eq!(declared_content_length(&HeaderMap::new()), 0);
    }

    #[test]
    fn test_valid_content_length() {
        assert_eq!(declared_content_length(&headers_with_length("17")), 17);
    }

    #[test]
    fn test_malformed_content_length_is_zero() {
        assert_eq!(declared_content_length(&headers_with_length("abc")), 0);
        assert_eq!(declared_content_length(&headers_with_length("-4")), 0);
    }

    #[test]
    fn test_header_value() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("curl/8.0"));
        assert_eq!(header_value(&headers, "user-agent").as_deref(), Some("curl/8.0"));
        assert_eq!(header_value(&headers, "referer"), None);
    }

    #[test]
    fn test_version_label() {
        assert_eq!(version_label(Version::HTTP_11), "1.1");
        assert_eq!(version_label(Version::HTTP_10), "1.0");
    }
}
