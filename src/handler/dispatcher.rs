//! Request dispatch module
//!
//! Selects the registry entry for a method and parsed request target, runs it
//! and produces the outcome handed to the response writer.
//!
//! Dispatch is permissive:
//! - the status code depends only on the method, never on the lookup result
//! - unknown resources and unrecognized filters yield an empty body
//! - only an unreadable or malformed JSON body is an error, and it aborts the
//!   request without a response

use hyper::{Method, StatusCode};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::http::HttpOutcome;
use crate::logger;
use crate::routing::{Operation, ParsedRequest, Registry, ResourceName, Route};

/// Failures that abort a request
#[derive(Debug)]
pub enum DispatchError {
    /// The request body could not be read from the connection
    BodyRead(hyper::Error),
    /// POST or PUT body is not a JSON payload the resource accepts
    MalformedBody(serde_json::Error),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BodyRead(e) => write!(f, "failed to read request body: {e}"),
            Self::MalformedBody(e) => write!(f, "malformed JSON body: {e}"),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BodyRead(e) => Some(e),
            Self::MalformedBody(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for DispatchError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedBody(e)
    }
}

/// Dispatch one request
///
/// # Arguments
///
/// * `registry` - Resource registry holding the collections
/// * `method` - HTTP method of the request
/// * `request` - Parsed request target
/// * `body` - Raw request body (already cut to `Content-Length`)
pub fn dispatch(
    registry: &Registry,
    method: &Method,
    request: &ParsedRequest,
    body: &[u8],
) -> Result<HttpOutcome, DispatchError> {
    if *method == Method::OPTIONS {
        return Ok(HttpOutcome::preflight());
    }

    let Some(operation) = Operation::for_method(method) else {
        logger::log_warning(&format!("Method not implemented: {method}"));
        return Ok(HttpOutcome::empty(StatusCode::NOT_IMPLEMENTED));
    };

    // Fixed before the registry lookup: a miss still reports this status
    let status = operation.status();

    let payload = if operation.takes_payload() {
        Some(serde_json::from_slice::<Value>(body)?)
    } else {
        None
    };

    let Some(route) = registry.lookup(&request.resource, operation) else {
        logger::log_dispatch(&format!(
            "No resource '{}' for {method}, empty response",
            request.resource
        ));
        return Ok(HttpOutcome::empty(status));
    };

    let body = match (route.operation, payload) {
        (Operation::Read, _) => read(&route, request, registry),
        (Operation::Create, Some(payload)) => route.repository.create(payload)?.to_string(),
        (Operation::Update, Some(payload)) => {
            update_then_create_echo(&route, request.id, payload)?
        }
        (Operation::Delete, _) => {
            if let Some(id) = request.id {
                route.repository.delete(id);
            }
            String::new()
        }
        (Operation::Create | Operation::Update, None) => String::new(),
    };

    Ok(HttpOutcome::new(status, body))
}

/// GET: filter query, single entity or whole collection
fn read(route: &Route<'_>, request: &ParsedRequest, registry: &Registry) -> String {
    if !request.filters.is_empty() {
        return apply_filters(route.resource, &request.filters, registry);
    }

    let value = match request.id {
        Some(id) => route.repository.get(id),
        None => route.repository.list(),
    };
    value.to_string()
}

/// Run every recognized filter present in the query; the last one in
/// evaluation order supplies the body. No recognized key means an empty body.
fn apply_filters(
    resource: ResourceName,
    filters: &HashMap<String, String>,
    registry: &Registry,
) -> String {
    Registry::filter_routes(resource)
        .filter_map(|route| {
            filters
                .get(route.key)
                .map(|value| route.apply(registry, value))
        })
        .last()
        .map(|value| value.to_string())
        .unwrap_or_default()
}

/// PUT: update the entity, then answer with what a create of the same payload returns
///
/// The response body is the create echo, not the updated entity, and the
/// create really runs, so the collection gains a new row as well.
fn update_then_create_echo(
    route: &Route<'_>,
    id: Option<u64>,
    payload: Value,
) -> Result<String, DispatchError> {
    if let Some(id) = id {
        route.repository.update(id, payload.clone())?;
    }
    Ok(route.repository.create(payload)?.to_string())
}
