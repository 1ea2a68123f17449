//! Print-mask output formatting.
//!
//! The mask symbols are `H` (request headers), `B` (request body), `h`
//! (response headers), `b` (response body). Sections print in that fixed
//! order no matter how the mask spells them; the request sections print only
//! when the corresponding data exists.

use crate::assemble::RequestDescriptor;
use ajpq::{AjpResponse, RequestBody};
use log::warn;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrintMask {
    pub request_headers: bool,
    pub request_body: bool,
    pub response_headers: bool,
    pub response_body: bool,
}

impl PrintMask {
    /// Parses a mask string; unknown symbols are skipped with a warning.
    pub fn parse(mask: &str) -> PrintMask {
        let mut out = PrintMask::default();
        for symbol in mask.chars() {
            match symbol {
                'H' => out.request_headers = true,
                'B' => out.request_body = true,
                'h' => out.response_headers = true,
                'b' => out.response_body = true,
                other => warn!("ignoring unknown print symbol '{other}'"),
            }
        }
        out
    }

    /// Response sections only, the default for quiet runs.
    pub fn response_only() -> PrintMask {
        PrintMask {
            response_headers: true,
            response_body: true,
            ..PrintMask::default()
        }
    }

    pub fn everything() -> PrintMask {
        PrintMask {
            request_headers: true,
            request_body: true,
            response_headers: true,
            response_body: true,
        }
    }

    /// An explicit mask wins; otherwise verbose widens the default.
    pub fn resolve(print: Option<&str>, verbose: bool) -> PrintMask {
        match print {
            Some(mask) => PrintMask::parse(mask),
            None if verbose => PrintMask::everything(),
            None => PrintMask::response_only(),
        }
    }
}

/// Writes the selected sections. Request headers come from the response's
/// request echo so wire-added headers show up too; the request body comes
/// from the descriptor since it never travels back.
pub fn render(
    mask: &PrintMask,
    descriptor: &RequestDescriptor,
    response: &AjpResponse,
    out: &mut impl Write,
) -> io::Result<()> {
    let request = &response.request;

    if mask.request_headers && !request.headers.is_empty() {
        for (name, value) in request.headers.iter() {
            writeln!(out, "{name}: {value}")?;
        }
        writeln!(out)?;
    }

    if mask.request_body {
        if let Some(body) = &descriptor.body {
            match body {
                RequestBody::Form(encoded) => writeln!(out, "{encoded}")?,
                RequestBody::Json(map) => {
                    writeln!(out, "{}", serde_json::Value::Object(map.clone()))?
                }
            }
            writeln!(out)?;
        }
    }

    if mask.response_headers {
        writeln!(out, "{}", response.status_line())?;
        for (name, value) in &response.headers {
            writeln!(out, "{name}: {value}")?;
        }
        writeln!(out)?;
    }

    if mask.response_body {
        let text = response.text();
        if !text.is_empty() {
            writeln!(out, "{text}")?;
        }
    }

    Ok(())
}
