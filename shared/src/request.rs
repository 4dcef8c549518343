//! Request types
//!
//! Bodies and query parameters accepted by the public API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::PropertyPayload;

/// Search request body: free text plus structured filters
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub filters: BTreeMap<String, FilterValue>,
}

/// One filter value: a `{min, max}` range, a number, or a string term
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FilterValue {
    Range { min: f64, max: f64 },
    Number(f64),
    Text(String),
}

/// Booking listing query: at least one of the two must be present
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingQuery {
    pub user_id: Option<String>,
    pub property_id: Option<String>,
}

/// Indexing request body, wrapping the property payload
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PropertyIndexRequest {
    pub property: Option<PropertyPayload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_filter_parses_from_min_max_object() {
        let req: SearchRequest = serde_json::from_str(
            r#"{"query": "beach", "filters": {"price_per_night": {"min": 100, "max": 300}}}"#,
        )
        .unwrap();
        assert_eq!(
            req.filters.get("price_per_night"),
            Some(&FilterValue::Range {
                min: 100.0,
                max: 300.0
            })
        );
    }

    #[test]
    fn scalar_filters_parse_as_number_and_text() {
        let req: SearchRequest = serde_json::from_str(
            r#"{"filters": {"bedrooms": 3, "location": "Miami Beach"}}"#,
        )
        .unwrap();
        assert_eq!(req.query, "");
        assert_eq!(req.filters.get("bedrooms"), Some(&FilterValue::Number(3.0)));
        assert_eq!(
            req.filters.get("location"),
            Some(&FilterValue::Text("Miami Beach".into()))
        );
    }

    #[test]
    fn missing_body_fields_default_to_empty() {
        let req: SearchRequest = serde_json::from_str("{}").unwrap();
        assert!(req.query.is_empty());
        assert!(req.filters.is_empty());
    }
}
