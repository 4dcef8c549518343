//! Property Listing Model
//!
//! Listings live in the search index; the server only reads and
//! (re-)indexes them. Field set follows the indexing payload of the
//! management UI.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Indexed property listing (房源文档)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDocument {
    /// Index-assigned identifier, set by the indexing path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(with = "crate::serde_decimal::decimal")]
    pub price_per_night: Decimal,
    pub bedrooms: u32,
    pub bathrooms: u32,
    #[serde(default = "default_max_guests")]
    pub max_guests: u32,
    #[serde(default, with = "crate::serde_decimal::decimal_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    /// Media store keys, resolved to signed URLs on the way out
    #[serde(default)]
    pub image_keys: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_max_guests() -> u32 {
    2
}

/// One search hit: the listing plus index metadata and a resolved
/// download link for its first media item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyHit {
    #[serde(flatten)]
    pub document: PropertyDocument,
    /// Index-assigned identifier
    pub id: String,
    /// Relevance score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Property payload as submitted by the management UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyPayload {
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(with = "crate::serde_decimal::decimal")]
    pub price_per_night: Decimal,
    pub bedrooms: u32,
    pub bathrooms: u32,
    #[serde(default = "default_max_guests")]
    pub max_guests: u32,
    #[serde(default, with = "crate::serde_decimal::decimal_option")]
    pub rating: Option<Decimal>,
    #[serde(default)]
    pub property_type: Option<String>,
    /// Inline image uploads, emptied before the document is indexed
    #[serde(default)]
    pub images: Vec<PropertyImage>,
}

/// Inline image upload (base64 content)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyImage {
    pub content: String,
}
