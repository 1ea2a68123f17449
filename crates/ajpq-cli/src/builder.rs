//! Field builders: each consumes the request items of its category and
//! produces the typed collection the assembler combines.

use crate::error::CliError;
use crate::request_item::RequestItem;
use ajpq::{AjpRequestHeader, HeaderName, HeaderSet, QueryParams, RequestAttribute, RequestBody};
use log::warn;

/// Body encoding selected by the CLI flags. Resolving the two flags into one
/// mode up front keeps the conflicting combination unrepresentable past this
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMode {
    None,
    Form,
    Json,
}

impl BodyMode {
    pub fn from_flags(form: bool, json: bool) -> Result<BodyMode, CliError> {
        match (form, json) {
            (true, true) => Err(CliError::ConflictingBodyModes),
            (true, false) => Ok(BodyMode::Form),
            (false, true) => Ok(BodyMode::Json),
            (false, false) => Ok(BodyMode::None),
        }
    }
}

/// Header names resolve once: an exact `SC_REQ_*` match becomes the coded
/// header, anything else stays a literal. Duplicate keys overwrite.
pub fn build_headers(items: &[RequestItem]) -> HeaderSet {
    let mut headers = HeaderSet::new();
    for item in items {
        if let RequestItem::Header { name, value } = item {
            let key = match AjpRequestHeader::from_sc_name(name) {
                Some(known) => HeaderName::Known(known),
                None => HeaderName::Custom(name.clone()),
            };
            headers.insert(key, value.clone());
        }
    }
    headers
}

/// Query parameters accumulate in encounter order; values pass through
/// unencoded.
pub fn build_query(items: &[RequestItem]) -> QueryParams {
    let mut params = QueryParams::new();
    for item in items {
        if let RequestItem::QueryParam { name, value } = item {
            params.append(name.clone(), value.clone());
        }
    }
    params
}

/// Builds the body for the active mode, or `None` when there are no body
/// fields. With no mode selected, body fields are never reinterpreted; they
/// are dropped with a warning.
pub fn build_body(items: &[RequestItem], mode: BodyMode) -> Option<RequestBody> {
    let fields: Vec<(&str, &str)> = items
        .iter()
        .filter_map(|item| match item {
            RequestItem::BodyField { name, value } => Some((name.as_str(), value.as_str())),
            _ => None,
        })
        .collect();

    match mode {
        BodyMode::None => {
            if !fields.is_empty() {
                warn!(
                    "{} body field item(s) ignored; pass --form or --json to send them",
                    fields.len()
                );
            }
            None
        }
        BodyMode::Form => {
            if fields.is_empty() {
                return None;
            }
            let encoded = fields
                .iter()
                .map(|(name, value)| {
                    format!("{}={}", urlencoding::encode(name), urlencoding::encode(value))
                })
                .collect::<Vec<_>>()
                .join("&");
            Some(RequestBody::Form(encoded))
        }
        BodyMode::Json => {
            if fields.is_empty() {
                return None;
            }
            let mut map = serde_json::Map::new();
            for (name, value) in fields {
                map.insert(
                    name.to_string(),
                    serde_json::Value::String(value.to_string()),
                );
            }
            Some(RequestBody::Json(map))
        }
    }
}

/// Wraps each attribute item as a named request attribute, in encounter
/// order. The query-string attribute is synthesized by the assembler, not
/// here.
pub fn build_attributes(items: &[RequestItem]) -> Vec<RequestAttribute> {
    items
        .iter()
        .filter_map(|item| match item {
            RequestItem::Attribute { name, value } => {
                Some(RequestAttribute::named(name.clone(), value.clone()))
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(name: &str, value: &str) -> RequestItem {
        RequestItem::Header {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    fn body_field(name: &str, value: &str) -> RequestItem {
        RequestItem::BodyField {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn both_flags_set_is_a_conflict() {
        assert_eq!(
            BodyMode::from_flags(true, true),
            Err(CliError::ConflictingBodyModes)
        );
        assert_eq!(BodyMode::from_flags(true, false), Ok(BodyMode::Form));
        assert_eq!(BodyMode::from_flags(false, true), Ok(BodyMode::Json));
        assert_eq!(BodyMode::from_flags(false, false), Ok(BodyMode::None));
    }

    #[test]
    fn recognized_sc_names_become_coded_headers() {
        let headers = build_headers(&[header("SC_REQ_ACCEPT", "*/*"), header("X-Custom", "1")]);

        assert_eq!(
            headers.get(&HeaderName::Known(AjpRequestHeader::Accept)),
            Some("*/*")
        );
        assert_eq!(
            headers.get(&HeaderName::Custom("X-Custom".to_string())),
            Some("1")
        );
    }

    #[test]
    fn duplicate_literal_headers_keep_the_last_value() {
        let headers = build_headers(&[header("X-Token", "old"), header("X-Token", "new")]);
        assert_eq!(headers.len(), 1);
        assert_eq!(
            headers.get(&HeaderName::Custom("X-Token".to_string())),
            Some("new")
        );
    }

    #[test]
    fn form_body_percent_encodes_names_and_values() {
        let body = build_body(&[body_field("name", "va+lue"), body_field("k e", "y&z")], BodyMode::Form);

        let encoded = match body {
            Some(RequestBody::Form(s)) => s,
            other => panic!("expected form body, got {other:?}"),
        };
        assert_eq!(encoded, "name=va%2Blue&k%20e=y%26z");

        // Round trip through standard decoding
        let decoded: Vec<(String, String)> = encoded
            .split('&')
            .map(|pair| {
                let (n, v) = pair.split_once('=').unwrap();
                (
                    urlencoding::decode(n).unwrap().into_owned(),
                    urlencoding::decode(v).unwrap().into_owned(),
                )
            })
            .collect();
        assert_eq!(
            decoded,
            vec![
                ("name".to_string(), "va+lue".to_string()),
                ("k e".to_string(), "y&z".to_string())
            ]
        );
    }

    #[test]
    fn json_body_maps_fields_without_encoding() {
        let body = build_body(&[body_field("name", "va+lue")], BodyMode::Json);
        match body {
            Some(RequestBody::Json(map)) => {
                assert_eq!(
                    map.get("name"),
                    Some(&serde_json::Value::String("va+lue".to_string()))
                );
            }
            other => panic!("expected json body, got {other:?}"),
        }
    }

    #[test]
    fn no_mode_means_no_body_even_with_fields() {
        assert_eq!(build_body(&[body_field("a", "1")], BodyMode::None), None);
    }

    #[test]
    fn no_fields_means_no_body_in_any_mode() {
        assert_eq!(build_body(&[], BodyMode::Form), None);
        assert_eq!(build_body(&[], BodyMode::Json), None);
    }

    #[test]
    fn attribute_items_become_named_attributes_in_order() {
        let items = vec![
            RequestItem::Attribute {
                name: "AJP_ATTR".to_string(),
                value: "a=b".to_string(),
            },
            RequestItem::Attribute {
                name: "OTHER".to_string(),
                value: "x".to_string(),
            },
        ];
        let attributes = build_attributes(&items);
        assert_eq!(
            attributes,
            vec![
                RequestAttribute::named("AJP_ATTR", "a=b"),
                RequestAttribute::named("OTHER", "x"),
            ]
        );
    }
}
