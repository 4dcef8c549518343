use super::*;

use chrono::NaiveDate;

use crate::db::DbService;

async fn service() -> BookingService {
    let db = DbService::memory().await.expect("in-memory db");
    BookingService::new(db.db)
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn payload(property: &str, user: &str, check_in: &str, check_out: &str) -> BookingCreate {
    BookingCreate {
        property_id: property.into(),
        user_id: user.into(),
        check_in: date(check_in),
        check_out: date(check_out),
        guests: 2,
        name: Some("Ada Lovelace".into()),
        email: Some("ada@example.com".into()),
        phone: Some("+44 20 7946 0000".into()),
        total_price: None,
    }
}

#[tokio::test]
async fn created_booking_is_listed_by_user_and_property() {
    let svc = service().await;

    let booking = svc
        .create(payload("prop_1", "user_1", "2025-06-01", "2025-06-05"))
        .await
        .unwrap();
    assert!(booking.booking_id.starts_with("booking_"));
    assert_eq!(booking.status, BookingStatus::Confirmed);

    let by_user = svc
        .list(BookingQuery {
            user_id: Some("user_1".into()),
            property_id: None,
        })
        .await
        .unwrap();
    assert_eq!(by_user.len(), 1);
    assert_eq!(by_user[0].booking_id, booking.booking_id);

    let by_property = svc
        .list(BookingQuery {
            user_id: None,
            property_id: Some("prop_1".into()),
        })
        .await
        .unwrap();
    assert_eq!(by_property.len(), 1);

    let by_both = svc
        .list(BookingQuery {
            user_id: Some("user_1".into()),
            property_id: Some("prop_1".into()),
        })
        .await
        .unwrap();
    assert_eq!(by_both.len(), 1);
}

#[tokio::test]
async fn overlapping_booking_is_rejected() {
    let svc = service().await;

    svc.create(payload("prop_1", "user_1", "2025-06-01", "2025-06-05"))
        .await
        .unwrap();

    let err = svc
        .create(payload("prop_1", "user_2", "2025-06-04", "2025-06-08"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn checkout_day_is_reusable_as_checkin() {
    let svc = service().await;

    svc.create(payload("prop_1", "user_1", "2025-06-01", "2025-06-05"))
        .await
        .unwrap();

    // Half-open ranges: a stay ending 06-05 frees that day up
    svc.create(payload("prop_1", "user_2", "2025-06-05", "2025-06-08"))
        .await
        .unwrap();

    let bookings = svc
        .list(BookingQuery {
            user_id: None,
            property_id: Some("prop_1".into()),
        })
        .await
        .unwrap();
    assert_eq!(bookings.len(), 2);
}

#[tokio::test]
async fn other_properties_do_not_conflict() {
    let svc = service().await;

    svc.create(payload("prop_1", "user_1", "2025-06-01", "2025-06-05"))
        .await
        .unwrap();
    svc.create(payload("prop_2", "user_1", "2025-06-01", "2025-06-05"))
        .await
        .unwrap();
}

#[tokio::test]
async fn cancelled_bookings_do_not_block_dates() {
    let svc = service().await;

    let cancelled = BookingRecord {
        id: None,
        booking_id: new_booking_id(),
        property_id: "prop_1".into(),
        user_id: "user_1".into(),
        check_in: date("2025-06-01"),
        check_out: date("2025-06-05"),
        guests: 2,
        status: BookingStatus::Cancelled,
        name: None,
        email: None,
        phone: None,
        total_price: None,
        created_at: Utc::now(),
    };
    svc.repo.create(cancelled).await.unwrap();

    svc.create(payload("prop_1", "user_2", "2025-06-02", "2025-06-06"))
        .await
        .unwrap();
}

#[tokio::test]
async fn booking_ids_are_unique() {
    let svc = service().await;

    let first = svc
        .create(payload("prop_1", "user_1", "2025-06-01", "2025-06-05"))
        .await
        .unwrap();
    let second = svc
        .create(payload("prop_1", "user_1", "2025-06-10", "2025-06-12"))
        .await
        .unwrap();
    assert_ne!(first.booking_id, second.booking_id);
}

#[tokio::test]
async fn invalid_payloads_are_rejected() {
    let svc = service().await;

    let err = svc
        .create(payload("", "user_1", "2025-06-01", "2025-06-05"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = svc
        .create(payload("prop_1", "user_1", "2025-06-05", "2025-06-05"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let mut zero_guests = payload("prop_1", "user_1", "2025-06-01", "2025-06-05");
    zero_guests.guests = 0;
    let err = svc.create(zero_guests).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn listing_requires_a_filter() {
    let svc = service().await;

    let err = svc.list(BookingQuery::default()).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_conflicting_requests_admit_exactly_one() {
    let svc = service().await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let svc = svc.clone();
        handles.push(tokio::spawn(async move {
            svc.create(payload(
                "prop_1",
                &format!("user_{i}"),
                "2025-06-01",
                "2025-06-05",
            ))
            .await
        }));
    }

    let mut confirmed = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => confirmed += 1,
            Err(AppError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(confirmed, 1);
    assert_eq!(conflicts, 7);
}
