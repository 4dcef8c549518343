//! Search Query Construction
//!
//! Translates the public search request into a Meilisearch query plan:
//! free text, a filter expression, and the fixed sort policy.

use shared::request::{FilterValue, SearchRequest};

/// Numeric fields that accept `{min, max}` range filters
pub const RANGE_FIELDS: [&str; 4] = ["price_per_night", "bedrooms", "bathrooms", "max_guests"];

/// Fields that accept exact-term filters
pub const TERM_FIELDS: [&str; 3] = ["location", "amenities", "property_type"];

/// Sort policy: best-rated first, cheaper first within equal rating
pub const SORT: [&str; 2] = ["rating:desc", "price_per_night:asc"];

/// A prepared query: free text plus a filter expression
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub text: Option<String>,
    pub filter: Option<String>,
}

impl QueryPlan {
    pub fn from_request(request: &SearchRequest) -> Self {
        let text = Some(request.query.trim())
            .filter(|q| !q.is_empty())
            .map(str::to_string);

        Self {
            text,
            filter: build_filter(request),
        }
    }
}

/// Build the conjunctive filter expression. Range conditions apply to
/// the recognized numeric fields, term conditions to the remaining
/// filterable fields; everything else is ignored.
fn build_filter(request: &SearchRequest) -> Option<String> {
    let mut conditions = Vec::new();

    for (key, value) in &request.filters {
        match value {
            FilterValue::Range { min, max } if is_range_field(key) => {
                conditions.push(format!(
                    "{key} >= {} AND {key} <= {}",
                    format_number(*min),
                    format_number(*max)
                ));
            }
            FilterValue::Number(n) if is_filterable(key) && *n > 0.0 => {
                conditions.push(format!("{key} = {}", format_number(*n)));
            }
            FilterValue::Text(s) if is_filterable(key) && !s.trim().is_empty() => {
                conditions.push(format!("{key} = \"{}\"", escape(s)));
            }
            // Unknown keys, empty strings and non-positive numbers
            _ => {}
        }
    }

    if conditions.is_empty() {
        None
    } else {
        Some(conditions.join(" AND "))
    }
}

fn is_range_field(key: &str) -> bool {
    RANGE_FIELDS.contains(&key)
}

fn is_filterable(key: &str) -> bool {
    RANGE_FIELDS.contains(&key) || TERM_FIELDS.contains(&key)
}

/// Whole numbers print without a trailing `.0`
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
