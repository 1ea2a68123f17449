//! Outbound request model: header and query collections, body encodings,
//! protocol attributes, and the forward-request packet.

use crate::error::AjpError;
use crate::types::{AjpMethod, AjpRequestHeader};
use crate::wire;
use std::fmt;

/// Where the request goes: host, port, and the request URI path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl Target {
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// HEADERS
// =============================================================================

/// A request header key, resolved once at build time.
///
/// A coded header and a literal header with the same text are distinct keys;
/// only the coded form is packed as a two-byte code on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderName {
    Known(AjpRequestHeader),
    Custom(String),
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderName::Known(h) => f.write_str(h.display_name()),
            HeaderName::Custom(name) => f.write_str(name),
        }
    }
}

/// Ordered header collection. Keys are unique; inserting an existing key
/// overwrites its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderSet {
    entries: Vec<(HeaderName, String)>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: HeaderName, value: String) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &HeaderName) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &HeaderName) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &str)> {
        self.entries.iter().map(|(n, v)| (n, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// QUERY PARAMETERS
// =============================================================================

/// One query parameter value: single until the name repeats, then an
/// ordered list.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Single(String),
    Many(Vec<String>),
}

impl ParamValue {
    fn push(&mut self, value: String) {
        match self {
            ParamValue::Single(first) => {
                *self = ParamValue::Many(vec![std::mem::take(first), value]);
            }
            ParamValue::Many(values) => values.push(value),
        }
    }

    pub fn values(&self) -> &[String] {
        match self {
            ParamValue::Single(v) => std::slice::from_ref(v),
            ParamValue::Many(vs) => vs,
        }
    }
}

/// Query parameters in first-seen name order; repeated names accumulate
/// their values in encounter order. Values pass through unencoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, ParamValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: String, value: String) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => existing.push(value),
            None => self.entries.push((name, ParamValue::Single(value))),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes as `name=value` pairs joined with `&`, repeating the name
    /// once per value for multi-valued parameters.
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        for (name, value) in self.iter() {
            for v in value.values() {
                pairs.push(format!("{name}={v}"));
            }
        }
        pairs.join("&")
    }
}

// =============================================================================
// BODY
// =============================================================================

/// Request body in one of the two mutually exclusive encodings.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Percent-encoded `name=value` pairs joined with `&`.
    Form(String),
    /// String-valued JSON object, serialized when the body is sent.
    Json(serde_json::Map<String, serde_json::Value>),
}

impl RequestBody {
    pub fn content_type(&self) -> &'static str {
        match self {
            RequestBody::Form(_) => "application/x-www-form-urlencoded",
            RequestBody::Json(_) => "application/json",
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, AjpError> {
        match self {
            RequestBody::Form(encoded) => Ok(encoded.clone().into_bytes()),
            RequestBody::Json(map) => serde_json::to_vec(map).map_err(|e| {
                AjpError::Serialization {
                    context: "request body".to_string(),
                    details: e.to_string(),
                }
            }),
        }
    }
}

// =============================================================================
// ATTRIBUTES
// =============================================================================

/// One protocol attribute of the forward request, in send order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestAttribute {
    /// The well-known `query_string` attribute.
    QueryString(String),
    /// A generic `req_attribute` name/value pair.
    Named { name: String, value: String },
}

impl RequestAttribute {
    pub fn named(name: impl Into<String>, value: impl Into<String>) -> Self {
        RequestAttribute::Named {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            RequestAttribute::QueryString(_) => 0x05,
            RequestAttribute::Named { .. } => 0x0A,
        }
    }
}

// =============================================================================
// FORWARD REQUEST
// =============================================================================

/// The request as sent to the container, echoed back on the response.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardRequest {
    pub method: AjpMethod,
    pub protocol: String,
    pub req_uri: String,
    pub remote_addr: Option<String>,
    pub remote_host: Option<String>,
    pub server_name: String,
    pub server_port: u16,
    pub is_ssl: bool,
    pub headers: HeaderSet,
    pub attributes: Vec<RequestAttribute>,
}

impl ForwardRequest {
    /// Serializes the complete forward-request packet, header included.
    pub fn to_packet(&self) -> Vec<u8> {
        let mut payload = vec![wire::FORWARD_REQUEST, self.method.code()];
        wire::put_string(&mut payload, Some(&self.protocol));
        wire::put_string(&mut payload, Some(&self.req_uri));
        wire::put_string(&mut payload, self.remote_addr.as_deref());
        wire::put_string(&mut payload, self.remote_host.as_deref());
        wire::put_string(&mut payload, Some(&self.server_name));
        wire::put_u16(&mut payload, self.server_port);
        payload.push(u8::from(self.is_ssl));

        wire::put_u16(&mut payload, self.headers.len() as u16);
        for (name, value) in self.headers.iter() {
            match name {
                HeaderName::Known(h) => wire::put_u16(&mut payload, h.code()),
                HeaderName::Custom(n) => wire::put_string(&mut payload, Some(n)),
            }
            wire::put_string(&mut payload, Some(value));
        }

        for attribute in &self.attributes {
            payload.push(attribute.code());
            match attribute {
                RequestAttribute::QueryString(qs) => {
                    wire::put_string(&mut payload, Some(qs));
                }
                RequestAttribute::Named { name, value } => {
                    wire::put_string(&mut payload, Some(name));
                    wire::put_string(&mut payload, Some(value));
                }
            }
        }
        payload.push(wire::ATTRIBUTES_DONE);

        wire::frame(&payload)
    }
}
