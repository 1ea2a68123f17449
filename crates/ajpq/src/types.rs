//! AJP/1.3 protocol enumerations.
//!
//! Codes follow the connector reference at
//! <https://tomcat.apache.org/connectors-doc/ajp/ajpv13a.html>.

use std::fmt;

pub const DEFAULT_AJP_PORT: u16 = 8009;

// =============================================================================
// METHODS
// =============================================================================

/// Request methods the client dispatches on.
///
/// The protocol defines many more method codes; only the ones the CLI
/// dispatches to carry variants here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AjpMethod {
    Options,
    Get,
    Head,
    Post,
    Put,
    Delete,
    Copy,
}

impl AjpMethod {
    /// Wire code for the forward-request packet.
    pub fn code(self) -> u8 {
        match self {
            AjpMethod::Options => 0x01,
            AjpMethod::Get => 0x02,
            AjpMethod::Head => 0x03,
            AjpMethod::Post => 0x04,
            AjpMethod::Put => 0x05,
            AjpMethod::Delete => 0x06,
            AjpMethod::Copy => 0x0B,
        }
    }

    /// Case-insensitive lookup by method name. Returns `None` for any
    /// name outside the supported set, including valid HTTP methods the
    /// dispatcher does not handle.
    pub fn from_name(name: &str) -> Option<AjpMethod> {
        match name.to_ascii_uppercase().as_str() {
            "OPTIONS" => Some(AjpMethod::Options),
            "GET" => Some(AjpMethod::Get),
            "HEAD" => Some(AjpMethod::Head),
            "POST" => Some(AjpMethod::Post),
            "PUT" => Some(AjpMethod::Put),
            "DELETE" => Some(AjpMethod::Delete),
            "COPY" => Some(AjpMethod::Copy),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AjpMethod::Options => "OPTIONS",
            AjpMethod::Get => "GET",
            AjpMethod::Head => "HEAD",
            AjpMethod::Post => "POST",
            AjpMethod::Put => "PUT",
            AjpMethod::Delete => "DELETE",
            AjpMethod::Copy => "COPY",
        }
    }

    /// POST and PUT carry a request body; the rest do not.
    pub fn carries_body(self) -> bool {
        matches!(self, AjpMethod::Post | AjpMethod::Put)
    }
}

impl fmt::Display for AjpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// REQUEST HEADERS
// =============================================================================

/// Request header names with a dedicated two-byte code on the wire.
///
/// Anything outside this set is sent as a literal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AjpRequestHeader {
    Accept,
    AcceptCharset,
    AcceptEncoding,
    AcceptLanguage,
    Authorization,
    Connection,
    ContentType,
    ContentLength,
    Cookie,
    Cookie2,
    Host,
    Pragma,
    Referer,
    UserAgent,
}

impl AjpRequestHeader {
    pub fn code(self) -> u16 {
        match self {
            AjpRequestHeader::Accept => 0xA001,
            AjpRequestHeader::AcceptCharset => 0xA002,
            AjpRequestHeader::AcceptEncoding => 0xA003,
            AjpRequestHeader::AcceptLanguage => 0xA004,
            AjpRequestHeader::Authorization => 0xA005,
            AjpRequestHeader::Connection => 0xA006,
            AjpRequestHeader::ContentType => 0xA007,
            AjpRequestHeader::ContentLength => 0xA008,
            AjpRequestHeader::Cookie => 0xA009,
            AjpRequestHeader::Cookie2 => 0xA00A,
            AjpRequestHeader::Host => 0xA00B,
            AjpRequestHeader::Pragma => 0xA00C,
            AjpRequestHeader::Referer => 0xA00D,
            AjpRequestHeader::UserAgent => 0xA00E,
        }
    }

    /// Exact match against the `SC_REQ_*` token names used on the command
    /// line. This is how a request item names a coded header.
    pub fn from_sc_name(name: &str) -> Option<AjpRequestHeader> {
        match name {
            "SC_REQ_ACCEPT" => Some(AjpRequestHeader::Accept),
            "SC_REQ_ACCEPT_CHARSET" => Some(AjpRequestHeader::AcceptCharset),
            "SC_REQ_ACCEPT_ENCODING" => Some(AjpRequestHeader::AcceptEncoding),
            "SC_REQ_ACCEPT_LANGUAGE" => Some(AjpRequestHeader::AcceptLanguage),
            "SC_REQ_AUTHORIZATION" => Some(AjpRequestHeader::Authorization),
            "SC_REQ_CONNECTION" => Some(AjpRequestHeader::Connection),
            "SC_REQ_CONTENT_TYPE" => Some(AjpRequestHeader::ContentType),
            "SC_REQ_CONTENT_LENGTH" => Some(AjpRequestHeader::ContentLength),
            "SC_REQ_COOKIE" => Some(AjpRequestHeader::Cookie),
            "SC_REQ_COOKIE2" => Some(AjpRequestHeader::Cookie2),
            "SC_REQ_HOST" => Some(AjpRequestHeader::Host),
            "SC_REQ_PRAGMA" => Some(AjpRequestHeader::Pragma),
            "SC_REQ_REFERER" => Some(AjpRequestHeader::Referer),
            "SC_REQ_USER_AGENT" => Some(AjpRequestHeader::UserAgent),
            _ => None,
        }
    }

    pub fn sc_name(self) -> &'static str {
        match self {
            AjpRequestHeader::Accept => "SC_REQ_ACCEPT",
            AjpRequestHeader::AcceptCharset => "SC_REQ_ACCEPT_CHARSET",
            AjpRequestHeader::AcceptEncoding => "SC_REQ_ACCEPT_ENCODING",
            AjpRequestHeader::AcceptLanguage => "SC_REQ_ACCEPT_LANGUAGE",
            AjpRequestHeader::Authorization => "SC_REQ_AUTHORIZATION",
            AjpRequestHeader::Connection => "SC_REQ_CONNECTION",
            AjpRequestHeader::ContentType => "SC_REQ_CONTENT_TYPE",
            AjpRequestHeader::ContentLength => "SC_REQ_CONTENT_LENGTH",
            AjpRequestHeader::Cookie => "SC_REQ_COOKIE",
            AjpRequestHeader::Cookie2 => "SC_REQ_COOKIE2",
            AjpRequestHeader::Host => "SC_REQ_HOST",
            AjpRequestHeader::Pragma => "SC_REQ_PRAGMA",
            AjpRequestHeader::Referer => "SC_REQ_REFERER",
            AjpRequestHeader::UserAgent => "SC_REQ_USER_AGENT",
        }
    }

    /// Conventional `Header-Case` rendering, used when echoing the request.
    pub fn display_name(self) -> &'static str {
        match self {
            AjpRequestHeader::Accept => "Accept",
            AjpRequestHeader::AcceptCharset => "Accept-Charset",
            AjpRequestHeader::AcceptEncoding => "Accept-Encoding",
            AjpRequestHeader::AcceptLanguage => "Accept-Language",
            AjpRequestHeader::Authorization => "Authorization",
            AjpRequestHeader::Connection => "Connection",
            AjpRequestHeader::ContentType => "Content-Type",
            AjpRequestHeader::ContentLength => "Content-Length",
            AjpRequestHeader::Cookie => "Cookie",
            AjpRequestHeader::Cookie2 => "Cookie2",
            AjpRequestHeader::Host => "Host",
            AjpRequestHeader::Pragma => "Pragma",
            AjpRequestHeader::Referer => "Referer",
            AjpRequestHeader::UserAgent => "User-Agent",
        }
    }
}

// =============================================================================
// RESPONSE HEADERS
// =============================================================================

/// Resolves a coded response header to its `Header-Case` name.
///
/// The container sends either a two-byte code or a literal string; codes
/// outside the known range are a framing error handled by the caller.
pub fn response_header_name(code: u16) -> Option<&'static str> {
    match code {
        0xA001 => Some("Content-Type"),
        0xA002 => Some("Content-Language"),
        0xA003 => Some("Content-Length"),
        0xA004 => Some("Date"),
        0xA005 => Some("Last-Modified"),
        0xA006 => Some("Location"),
        0xA007 => Some("Set-Cookie"),
        0xA008 => Some("Set-Cookie2"),
        0xA009 => Some("Servlet-Engine"),
        0xA00A => Some("Status"),
        0xA00B => Some("WWW-Authenticate"),
        _ => None,
    }
}

// =============================================================================
// STATUS DESCRIPTIONS
// =============================================================================

/// Standard reason phrase for an HTTP status code.
///
/// Some containers echo the numeric code as the status message; the client
/// substitutes the canonical phrase in that case.
pub fn status_description(code: u16) -> &'static str {
    match code {
        100 => "Continue",
        101 => "Switching Protocols",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        203 => "Non-authoritative Information",
        204 => "No Content",
        205 => "Reset Content",
        206 => "Partial Content",
        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        305 => "Use Proxy",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        407 => "Proxy Authentication Required",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        412 => "Precondition Failed",
        413 => "Payload Too Large",
        414 => "Request-URI Too Long",
        415 => "Unsupported Media Type",
        416 => "Requested Range Not Satisfiable",
        417 => "Expectation Failed",
        421 => "Misdirected Request",
        422 => "Unprocessable Entity",
        426 => "Upgrade Required",
        428 => "Precondition Required",
        429 => "Too Many Requests",
        431 => "Request Header Fields Too Large",
        451 => "Unavailable For Legal Reasons",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        505 => "HTTP Version Not Supported",
        507 => "Insufficient Storage",
        511 => "Network Authentication Required",
        _ => "Unknown Status",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_method_names_case_insensitively() {
        assert_eq!(AjpMethod::from_name("get"), Some(AjpMethod::Get));
        assert_eq!(AjpMethod::from_name("Delete"), Some(AjpMethod::Delete));
        assert_eq!(AjpMethod::from_name("COPY"), Some(AjpMethod::Copy));
        assert_eq!(AjpMethod::from_name("PATCH"), None);
        assert_eq!(AjpMethod::from_name(""), None);
    }

    #[test]
    fn method_codes_match_the_connector_reference() {
        assert_eq!(AjpMethod::Options.code(), 0x01);
        assert_eq!(AjpMethod::Get.code(), 0x02);
        assert_eq!(AjpMethod::Delete.code(), 0x06);
        assert_eq!(AjpMethod::Copy.code(), 0x0B);
    }

    #[test]
    fn only_post_and_put_carry_a_body() {
        assert!(AjpMethod::Post.carries_body());
        assert!(AjpMethod::Put.carries_body());
        assert!(!AjpMethod::Get.carries_body());
        assert!(!AjpMethod::Head.carries_body());
    }

    #[test]
    fn resolves_coded_request_headers_by_sc_name() {
        assert_eq!(
            AjpRequestHeader::from_sc_name("SC_REQ_ACCEPT"),
            Some(AjpRequestHeader::Accept)
        );
        assert_eq!(
            AjpRequestHeader::from_sc_name("SC_REQ_USER_AGENT"),
            Some(AjpRequestHeader::UserAgent)
        );
        // Lookup is exact, not case-folded
        assert_eq!(AjpRequestHeader::from_sc_name("sc_req_accept"), None);
        assert_eq!(AjpRequestHeader::from_sc_name("X-Custom"), None);
    }

    #[test]
    fn request_header_codes_are_contiguous_from_a001() {
        assert_eq!(AjpRequestHeader::Accept.code(), 0xA001);
        assert_eq!(AjpRequestHeader::UserAgent.code(), 0xA00E);
    }

    #[test]
    fn renders_response_header_codes_in_header_case() {
        assert_eq!(response_header_name(0xA001), Some("Content-Type"));
        assert_eq!(response_header_name(0xA00B), Some("WWW-Authenticate"));
        assert_eq!(response_header_name(0xA00F), None);
        assert_eq!(response_header_name(12), None);
    }

    #[test]
    fn falls_back_to_unknown_status_description() {
        assert_eq!(status_description(200), "OK");
        assert_eq!(status_description(299), "Unknown Status");
    }
}
