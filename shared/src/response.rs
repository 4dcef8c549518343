//! Response types
//!
//! Bodies produced by the public API. Failures always use
//! [`ErrorResponse`]; there are no partial responses.

use serde::{Deserialize, Serialize};

use crate::models::{Booking, PropertyHit};

/// Search response: one page of hits plus the exhaustive match count
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub properties: Vec<PropertyHit>,
    pub total: u64,
}

/// Successful booking creation
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub booking_id: String,
    pub message: String,
}

/// Booking listing
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingList {
    pub bookings: Vec<Booking>,
}

/// Successful property indexing
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexConfirmation {
    pub message: String,
    pub property_id: String,
    pub image_urls: Vec<String>,
}

/// Uniform failure envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
