//! URL parsing module
//!
//! Turns a request path and query string into the resource name, an optional
//! numeric id and optional query filters. Parsing never fails: anything that
//! does not look like an id or a filter is simply treated as absent.

use std::collections::HashMap;
use url::form_urlencoded;

/// Structured form of a request target
///
/// At most one of `id` and `filters` is populated. Both empty means the
/// request targets the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRequest {
    pub resource: String,
    pub id: Option<u64>,
    pub filters: HashMap<String, String>,
}

/// Parse `path` (`/{resource}/{id}`) and the raw query string
///
/// A non-empty query string always wins over a positional id, so
/// `/animals/3?status=x` carries filters and no id.
///
/// # Examples
/// ```ignore
/// let req = parse("/animals/3", None);
/// assert_eq!(req.id, Some(3));
/// ```
pub fn parse(path: &str, query: Option<&str>) -> ParsedRequest {
    let mut segments = path.split('/');
    let resource = segments.nth(1).unwrap_or_default().to_string();

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        return ParsedRequest {
            resource,
            id: None,
            filters: parse_filters(query),
        };
    }

    ParsedRequest {
        resource,
        id: segments.next().and_then(|segment| segment.parse().ok()),
        filters: HashMap::new(),
    }
}

/// Decode `key=value` pairs; blank values are dropped and the first value of a repeated key wins
fn parse_filters(query: &str) -> HashMap<String, String> {
    let mut filters = HashMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        filters
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    filters
}
