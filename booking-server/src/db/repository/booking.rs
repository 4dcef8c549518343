//! Booking Repository

use chrono::NaiveDate;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::BookingRecord;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "booking";

#[derive(Clone)]
pub struct BookingRepository {
    base: BaseRepository,
}

impl BookingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Confirmed bookings for a property whose date range intersects
    /// `[check_in, check_out)`. The half-open predicate runs inside the
    /// store, against the property index.
    pub async fn find_conflicting(
        &self,
        property_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> RepoResult<Vec<BookingRecord>> {
        let bookings: Vec<BookingRecord> = self
            .base
            .db()
            .query(
                "SELECT * FROM booking \
                 WHERE property_id = $property_id \
                   AND status = 'confirmed' \
                   AND check_in < $check_out \
                   AND check_out > $check_in",
            )
            .bind(("property_id", property_id.to_string()))
            .bind(("check_in", check_in))
            .bind(("check_out", check_out))
            .await?
            .take(0)?;
        Ok(bookings)
    }

    /// All bookings made by a user, newest first
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<BookingRecord>> {
        let bookings: Vec<BookingRecord> = self
            .base
            .db()
            .query("SELECT * FROM booking WHERE user_id = $user_id ORDER BY created_at DESC")
            .bind(("user_id", user_id.to_string()))
            .await?
            .take(0)?;
        Ok(bookings)
    }

    /// All bookings for a property, earliest check-in first
    pub async fn find_by_property(&self, property_id: &str) -> RepoResult<Vec<BookingRecord>> {
        let bookings: Vec<BookingRecord> = self
            .base
            .db()
            .query("SELECT * FROM booking WHERE property_id = $property_id ORDER BY check_in")
            .bind(("property_id", property_id.to_string()))
            .await?
            .take(0)?;
        Ok(bookings)
    }

    /// Bookings made by a user on one property, newest first
    pub async fn find_by_user_and_property(
        &self,
        user_id: &str,
        property_id: &str,
    ) -> RepoResult<Vec<BookingRecord>> {
        let bookings: Vec<BookingRecord> = self
            .base
            .db()
            .query(
                "SELECT * FROM booking \
                 WHERE user_id = $user_id AND property_id = $property_id \
                 ORDER BY created_at DESC",
            )
            .bind(("user_id", user_id.to_string()))
            .bind(("property_id", property_id.to_string()))
            .await?
            .take(0)?;
        Ok(bookings)
    }

    /// Persist a new booking
    pub async fn create(&self, record: BookingRecord) -> RepoResult<BookingRecord> {
        let created: Option<BookingRecord> = self.base.db().create(TABLE).content(record).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create booking".to_string()))
    }
}
