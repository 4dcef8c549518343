//! Booking Domain Logic
//!
//! 预订创建与日期冲突检测。
//!
//! Conflict check and insert are not atomic in the store itself, so
//! both run under a per-property async mutex: two concurrent requests
//! for overlapping dates on the same property serialize here, and the
//! second one sees the first one's write. Unrelated properties do not
//! contend.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::Mutex;
use uuid::Uuid;

use shared::models::{Booking, BookingCreate, BookingStatus};
use shared::request::BookingQuery;

use crate::db::models::BookingRecord;
use crate::db::repository::BookingRepository;
use crate::utils::{AppError, AppResult};

/// Booking service — conflict detection plus creation
#[derive(Clone)]
pub struct BookingService {
    repo: BookingRepository,
    /// 每个房源一把锁，冲突检测与写入在锁内完成
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl BookingService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            repo: BookingRepository::new(db),
            locks: Arc::new(DashMap::new()),
        }
    }

    fn lock_for(&self, property_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(property_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Create a booking if no confirmed booking overlaps the requested
    /// `[check_in, check_out)` range on the same property.
    pub async fn create(&self, payload: BookingCreate) -> AppResult<Booking> {
        validate(&payload)?;

        let lock = self.lock_for(&payload.property_id);
        let _guard = lock.lock().await;

        let conflicts = self
            .repo
            .find_conflicting(&payload.property_id, payload.check_in, payload.check_out)
            .await?;
        if !conflicts.is_empty() {
            return Err(AppError::conflict(
                "Property is already booked for these dates",
            ));
        }

        let booking = Booking {
            booking_id: new_booking_id(),
            property_id: payload.property_id,
            user_id: payload.user_id,
            check_in: payload.check_in,
            check_out: payload.check_out,
            guests: payload.guests,
            status: BookingStatus::Confirmed,
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            total_price: payload.total_price,
            created_at: Utc::now(),
        };

        let record = self.repo.create(BookingRecord::from(booking)).await?;

        tracing::info!(
            booking_id = %record.booking_id,
            property_id = %record.property_id,
            "Booking confirmed"
        );

        Ok(record.into())
    }

    /// List bookings by user and/or property; at least one filter is
    /// required. No conflict logic applies to reads.
    pub async fn list(&self, query: BookingQuery) -> AppResult<Vec<Booking>> {
        let user_id = query.user_id.filter(|s| !s.trim().is_empty());
        let property_id = query.property_id.filter(|s| !s.trim().is_empty());

        let records = match (&user_id, &property_id) {
            (Some(user), Some(property)) => {
                self.repo.find_by_user_and_property(user, property).await?
            }
            (Some(user), None) => self.repo.find_by_user(user).await?,
            (None, Some(property)) => self.repo.find_by_property(property).await?,
            (None, None) => {
                return Err(AppError::validation("user_id or property_id is required"));
            }
        };

        Ok(records.into_iter().map(Booking::from).collect())
    }
}

fn new_booking_id() -> String {
    format!("booking_{}", Uuid::new_v4())
}

fn validate(payload: &BookingCreate) -> AppResult<()> {
    if payload.property_id.trim().is_empty() || payload.user_id.trim().is_empty() {
        return Err(AppError::validation("Missing required fields"));
    }
    if payload.check_out <= payload.check_in {
        return Err(AppError::validation("check_out must be after check_in"));
    }
    if payload.guests == 0 {
        return Err(AppError::validation("guests must be at least 1"));
    }
    Ok(())
}
