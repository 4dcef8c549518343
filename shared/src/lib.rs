//! Shared types for the LuxStay booking platform
//!
//! Wire types used across the API boundary: booking and property
//! listing models, search request/response structures, and the
//! decimal wire-format helpers.

pub mod models;
pub mod request;
pub mod response;
pub mod serde_decimal;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    Booking, BookingCreate, BookingStatus, PropertyDocument, PropertyHit, PropertyImage,
    PropertyPayload,
};
pub use request::{BookingQuery, FilterValue, PropertyIndexRequest, SearchRequest};
pub use response::{BookingConfirmation, BookingList, ErrorResponse, IndexConfirmation, SearchResponse};
