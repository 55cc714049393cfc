//! XML request bodies
//!
//! The service checks element order, so the documents are fixed structs
//! rather than maps. Every body starts with the UTF-8 declaration,
//! immediately followed by the root element.

use serde::{Deserialize, Serialize};

use crate::config::CorsDefaults;
use crate::types::{CorsRule, LocationConstraint, MaxAge};

/// Declaration prepended to every emitted document
const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename = "CreateBucketConfiguration")]
pub(crate) struct CreateBucketConfiguration {
    #[serde(rename = "LocationConstraint")]
    pub location_constraint: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename = "CorsConfig")]
pub(crate) struct CorsConfig {
    #[serde(rename = "Cors")]
    pub cors: Cors,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Cors {
    #[serde(rename = "Origins")]
    pub origins: Origins,
    #[serde(rename = "Methods")]
    pub methods: Methods,
    #[serde(rename = "ResponseHeaders")]
    pub response_headers: ResponseHeaders,
    #[serde(rename = "MaxAgeSec")]
    pub max_age_sec: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Origins {
    #[serde(rename = "Origin")]
    pub values: Vec<String>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Methods {
    #[serde(rename = "Method")]
    pub values: Vec<String>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct ResponseHeaders {
    #[serde(rename = "ResponseHeader")]
    pub values: Vec<String>,
}

/// Body for bucket creation with an explicit location
pub(crate) fn location_constraint_body(location: LocationConstraint) -> String {
    render(&CreateBucketConfiguration {
        location_constraint: location.as_str().to_string(),
    })
}

/// Body for replacing a bucket's CORS configuration.
///
/// An empty list becomes the one-element default list; inside a non-empty
/// list, each element is trimmed and a blank one is replaced by the single
/// corresponding default. An unset or empty-text max-age takes the default
/// whole-second value.
pub(crate) fn cors_body(rule: &CorsRule, defaults: &CorsDefaults) -> String {
    render(&CorsConfig {
        cors: Cors {
            origins: Origins {
                values: normalize(&rule.origins, &defaults.origin),
            },
            methods: Methods {
                values: normalize(&rule.methods, &defaults.method),
            },
            response_headers: ResponseHeaders {
                values: normalize(&rule.response_headers, &defaults.response_header),
            },
            max_age_sec: max_age_text(rule.max_age_sec.as_ref(), defaults.max_age_sec),
        },
    })
}

fn render<T: Serialize>(document: &T) -> String {
    // These borrow-free structs cannot hit a serializer error.
    let tree = quick_xml::se::to_string(document).expect("document serializes");
    let mut body = String::with_capacity(XML_DECLARATION.len() + tree.len());
    body.push_str(XML_DECLARATION);
    body.push_str(&tree);
    body
}

fn normalize(values: &[String], default: &str) -> Vec<String> {
    if values.is_empty() {
        return vec![default.to_string()];
    }
    values
        .iter()
        .map(|value| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                default.to_string()
            } else {
                trimmed.to_string()
            }
        })
        .collect()
}

fn max_age_text(max_age: Option<&MaxAge>, default_sec: i64) -> String {
    match max_age {
        None => default_sec.to_string(),
        Some(MaxAge::Text(text)) if text.is_empty() => default_sec.to_string(),
        Some(value) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(origins: &[&str], methods: &[&str], headers: &[&str]) -> CorsRule {
        CorsRule {
            origins: origins.iter().map(|s| s.to_string()).collect(),
            methods: methods.iter().map(|s| s.to_string()).collect(),
            response_headers: headers.iter().map(|s| s.to_string()).collect(),
            max_age_sec: None,
        }
    }

    #[test]
    fn test_location_constraint_body() {
        assert_eq!(
            location_constraint_body(LocationConstraint::Eu),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <CreateBucketConfiguration>\
             <LocationConstraint>EU</LocationConstraint>\
             </CreateBucketConfiguration>"
        );
    }

    #[test]
    fn test_cors_body_layout() {
        let body = cors_body(
            &rule(&["http://example.com"], &["GET", "PUT"], &["x-goog-meta-a"]),
            &CorsDefaults::default(),
        );
        assert_eq!(
            body,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <CorsConfig><Cors>\
             <Origins><Origin>http://example.com</Origin></Origins>\
             <Methods><Method>GET</Method><Method>PUT</Method></Methods>\
             <ResponseHeaders><ResponseHeader>x-goog-meta-a</ResponseHeader></ResponseHeaders>\
             <MaxAgeSec>1800</MaxAgeSec>\
             </Cors></CorsConfig>"
        );
    }

    #[test]
    fn test_empty_lists_take_whole_defaults() {
        let body = cors_body(&CorsRule::default(), &CorsDefaults::default());
        assert!(body.contains("<Origins><Origin>*</Origin></Origins>"));
        assert!(body.contains("<Methods><Method>GET</Method></Methods>"));
        assert!(body.contains(
            "<ResponseHeaders><ResponseHeader>gcs-demo</ResponseHeader></ResponseHeaders>"
        ));
        assert!(body.contains("<MaxAgeSec>1800</MaxAgeSec>"));
    }

    #[test]
    fn test_blank_element_replaced_alone() {
        let body = cors_body(
            &rule(&["http://a.example", "  ", "http://b.example"], &["GET"], &["h"]),
            &CorsDefaults::default(),
        );
        assert!(body.contains(
            "<Origins>\
             <Origin>http://a.example</Origin>\
             <Origin>*</Origin>\
             <Origin>http://b.example</Origin>\
             </Origins>"
        ));
    }

    #[test]
    fn test_elements_are_trimmed() {
        let body = cors_body(
            &rule(&[" http://a.example "], &["GET"], &["h"]),
            &CorsDefaults::default(),
        );
        assert!(body.contains("<Origin>http://a.example</Origin>"));
    }

    #[test]
    fn test_max_age_variants() {
        let defaults = CorsDefaults::default();
        let mut cors = rule(&["*"], &["GET"], &["h"]);

        cors.max_age_sec = Some(MaxAge::Seconds(60));
        assert!(cors_body(&cors, &defaults).contains("<MaxAgeSec>60</MaxAgeSec>"));

        cors.max_age_sec = Some(MaxAge::Fractional(2.5));
        assert!(cors_body(&cors, &defaults).contains("<MaxAgeSec>2.500000</MaxAgeSec>"));

        cors.max_age_sec = Some(MaxAge::Text("900".to_string()));
        assert!(cors_body(&cors, &defaults).contains("<MaxAgeSec>900</MaxAgeSec>"));

        cors.max_age_sec = Some(MaxAge::Text(String::new()));
        assert!(cors_body(&cors, &defaults).contains("<MaxAgeSec>1800</MaxAgeSec>"));
    }

    #[test]
    fn test_text_content_is_escaped() {
        let body = cors_body(
            &rule(&["http://a.example?q=1&r=<2>"], &["GET"], &["h"]),
            &CorsDefaults::default(),
        );
        assert!(body.contains("<Origin>http://a.example?q=1&amp;r=&lt;2&gt;</Origin>"));
    }

    #[test]
    fn test_cors_round_trip() {
        let cors = CorsRule {
            origins: vec![
                "http://a.example".to_string(),
                String::new(),
                "http://b.example".to_string(),
            ],
            methods: vec!["GET".to_string(), " POST ".to_string()],
            response_headers: vec!["x-goog-meta-a".to_string()],
            max_age_sec: Some(MaxAge::Seconds(120)),
        };
        let body = cors_body(&cors, &CorsDefaults::default());

        let parsed: CorsConfig = quick_xml::de::from_str(&body).unwrap();
        assert_eq!(
            parsed.cors.origins.values,
            vec!["http://a.example", "*", "http://b.example"]
        );
        assert_eq!(parsed.cors.methods.values, vec!["GET", "POST"]);
        assert_eq!(parsed.cors.response_headers.values, vec!["x-goog-meta-a"]);
        assert_eq!(parsed.cors.max_age_sec, "120");
    }
}
