//! Booking Record
//!
//! Storage shape of a booking. The record id stays internal; the
//! public identifier is the `booking_id` field (unique index).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::models::{Booking, BookingStatus};

/// Booking entity (预订记录)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub booking_id: String,
    pub property_id: String,
    pub user_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub status: BookingStatus,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub total_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingRecord {
    fn from(b: Booking) -> Self {
        Self {
            id: None,
            booking_id: b.booking_id,
            property_id: b.property_id,
            user_id: b.user_id,
            check_in: b.check_in,
            check_out: b.check_out,
            guests: b.guests,
            status: b.status,
            name: b.name,
            email: b.email,
            phone: b.phone,
            total_price: b.total_price,
            created_at: b.created_at,
        }
    }
}

impl From<BookingRecord> for Booking {
    fn from(r: BookingRecord) -> Self {
        Self {
            booking_id: r.booking_id,
            property_id: r.property_id,
            user_id: r.user_id,
            check_in: r.check_in,
            check_out: r.check_out,
            guests: r.guests,
            status: r.status,
            name: r.name,
            email: r.email,
            phone: r.phone,
            total_price: r.total_price,
            created_at: r.created_at,
        }
    }
}
