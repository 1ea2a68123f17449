//! Request-item token classification.
//!
//! Each command-line token after METHOD and URL encodes one request item
//! through its separator. Separators are tested in fixed precedence order —
//! `::`, `==`, `=`, `:` — so that the two-character separators win over the
//! one-character ones they contain. Only the first occurrence splits the
//! token; later separator characters stay in the value verbatim.

use crate::error::CliError;
use log::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestItem {
    Attribute { name: String, value: String },
    QueryParam { name: String, value: String },
    BodyField { name: String, value: String },
    Header { name: String, value: String },
}

impl RequestItem {
    /// Classifies one token. Tokens with no separator are skipped; tokens
    /// whose split leaves an empty name or value are a hard parse error.
    pub fn parse(token: &str) -> Result<Option<RequestItem>, CliError> {
        let item = if let Some(at) = token.find("::") {
            let (name, value) = split_once_at(token, at, 2)?;
            RequestItem::Attribute { name, value }
        } else if let Some(at) = token.find("==") {
            let (name, value) = split_once_at(token, at, 2)?;
            RequestItem::QueryParam { name, value }
        } else if let Some(at) = token.find('=') {
            let (name, value) = split_once_at(token, at, 1)?;
            RequestItem::BodyField { name, value }
        } else if let Some(at) = token.find(':') {
            let (name, value) = split_once_at(token, at, 1)?;
            RequestItem::Header { name, value }
        } else {
            warn!("ignoring request item '{token}': no separator found");
            return Ok(None);
        };
        Ok(Some(item))
    }
}

fn split_once_at(token: &str, at: usize, sep_len: usize) -> Result<(String, String), CliError> {
    let name = &token[..at];
    let value = &token[at + sep_len..];
    if name.is_empty() || value.is_empty() {
        return Err(CliError::MalformedItem {
            token: token.to_string(),
        });
    }
    Ok((name.to_string(), value.to_string()))
}

/// Classifies the full token list, dropping separator-less tokens.
pub fn classify(tokens: &[String]) -> Result<Vec<RequestItem>, CliError> {
    let mut items = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let Some(item) = RequestItem::parse(token)? {
            items.push(item);
        }
    }
    Ok(items)
}
