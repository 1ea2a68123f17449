//! Combines the built collections into one outbound request descriptor.

use crate::builder::{self, BodyMode};
use crate::request_item::RequestItem;
use ajpq::{HeaderSet, QueryParams, RequestAttribute, RequestBody, Target};

/// Everything the dispatcher needs for one invocation. Assembled once,
/// never mutated afterwards; method support is checked at dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: String,
    pub url: String,
    pub target: Target,
    pub headers: HeaderSet,
    pub query: QueryParams,
    pub body: Option<RequestBody>,
    pub attributes: Vec<RequestAttribute>,
}

/// Runs the field builders and appends the synthesized `query_string`
/// attribute when query parameters exist, so the executor can put it on the
/// wire wherever the protocol wants it.
pub fn assemble(
    method: &str,
    url: &str,
    target: Target,
    items: &[RequestItem],
    mode: BodyMode,
) -> RequestDescriptor {
    let headers = builder::build_headers(items);
    let query = builder::build_query(items);
    let body = builder::build_body(items, mode);
    let mut attributes = builder::build_attributes(items);
    if !query.is_empty() {
        attributes.push(RequestAttribute::QueryString(query.to_query_string()));
    }

    RequestDescriptor {
        method: method.to_string(),
        url: url.to_string(),
        target,
        headers,
        query,
        body,
        attributes,
    }
}
