//! Command-line argument declarations and URL-to-target resolution.

use crate::error::CliError;
use ajpq::{DEFAULT_AJP_PORT, Target};
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "ajpq")]
#[command(about = "httpie-style client for AJP servlet containers")]
#[command(version)]
pub struct Args {
    /// Request method: DELETE, GET, HEAD, OPTIONS, POST, PUT, or COPY
    #[arg(value_name = "METHOD")]
    pub method: String,

    /// Target URL, e.g. ajp://localhost:8009/docs/
    #[arg(value_name = "URL")]
    pub url: String,

    /// Request items: attributes (name::value), query params (name==value),
    /// body fields (name=value), headers (name:value)
    #[arg(value_name = "REQUEST_ITEM")]
    pub request_items: Vec<String>,

    /// Send body fields as application/x-www-form-urlencoded
    #[arg(short, long)]
    pub form: bool,

    /// Send body fields as a JSON object
    #[arg(short, long)]
    pub json: bool,

    /// What to print: H (request headers), B (request body),
    /// h (response headers), b (response body)
    #[arg(short, long, value_name = "MASK")]
    pub print: Option<String>,

    /// Print the full exchange and log protocol frames
    #[arg(short, long)]
    pub verbose: bool,

    /// Connect and I/O timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

/// Resolves the URL into host, port, and request URI. A bare
/// `host[:port]/path` gets the `ajp://` scheme implied; the port defaults
/// to 8009.
pub fn parse_target(url: &str) -> Result<Target, CliError> {
    let normalized = if url.contains("://") {
        url.to_string()
    } else {
        format!("ajp://{url}")
    };

    let parsed = url::Url::parse(&normalized).map_err(|e| CliError::InvalidUrl {
        url: url.to_string(),
        details: e.to_string(),
    })?;

    let host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host.to_string(),
        _ => {
            return Err(CliError::InvalidUrl {
                url: url.to_string(),
                details: "missing host".to_string(),
            });
        }
    };
    let port = parsed.port().unwrap_or(DEFAULT_AJP_PORT);
    let path = match parsed.path() {
        "" => "/".to_string(),
        path => path.to_string(),
    };

    Ok(Target { host, port, path })
}
