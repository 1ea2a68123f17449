//! AJP/1.3 protocol core: request model, response model, and a synchronous
//! TCP executor speaking the connector wire format.
//!
//! The CLI surface crate builds a request from command-line tokens and
//! dispatches it through [`RequestExecutor`]; everything that touches wire
//! bytes lives here.

pub mod client;
pub mod error;
pub mod request;
pub mod response;
pub mod types;
pub mod wire;

pub use client::{AjpClient, ClientConfig, RequestExecutor};
pub use error::AjpError;
pub use request::{
    ForwardRequest, HeaderName, HeaderSet, ParamValue, QueryParams, RequestAttribute, RequestBody,
    Target,
};
pub use response::AjpResponse;
pub use types::{AjpMethod, AjpRequestHeader, DEFAULT_AJP_PORT};

// Re-export logging macros for consistent usage across the crates
pub use log::{debug, error, info, trace, warn};
