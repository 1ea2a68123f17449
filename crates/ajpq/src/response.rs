//! Response model returned by the executor.

use crate::request::ForwardRequest;
use std::borrow::Cow;

/// A completed exchange with the container.
#[derive(Debug, Clone, PartialEq)]
pub struct AjpResponse {
    /// The request as it went out, for echo-printing.
    pub request: ForwardRequest,
    pub status_code: u16,
    pub status_msg: String,
    /// Response headers in the order the container sent them.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl AjpResponse {
    /// Response body as text, replacing invalid UTF-8.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn status_line(&self) -> String {
        format!("{} {} {}", self.request.protocol, self.status_code, self.status_msg)
    }
}
