//! Tests for the in-memory store.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use innkeep_core::booking::{
    BookingService, BookingSource, CreateBookingInput, Occupancy, PaymentMethod,
};
use innkeep_core::guest::{CreateGuestInput, Guest, GuestLedger};
use innkeep_core::invoice::{InvoiceService, NewInvoicePayment};
use innkeep_core::room::{
    Bed, BedKind, CreateRoomInput, Room, RoomRate, RoomService, RoomStatus, RoomType,
};
use innkeep_shared::types::{Currency, GuestId, StaffId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::document::{GUEST_EMAIL, INVOICE_BOOKING, ROOM_NUMBER};
use crate::error::StoreError;
use crate::memory::{MemoryRepository, MemoryStore};
use crate::repository::{Repository, Store};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn room(number: &str) -> Room {
    RoomService::create(
        CreateRoomInput {
            room_number: number.to_string(),
            room_type: RoomType::Double,
            floor: 2,
            capacity: 2,
            beds: vec![Bed {
                kind: BedKind::Double,
                count: 1,
            }],
            rate: RoomRate {
                base_rate: dec!(80),
                tax_rate: dec!(10),
                currency: Currency::Eur,
            },
            amenities: Vec::new(),
        },
        now(),
    )
    .unwrap()
}

fn guest(email: &str) -> Guest {
    GuestLedger::register(
        CreateGuestInput {
            email: email.to_string(),
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            ..CreateGuestInput::default()
        },
        now(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_insert_starts_at_version_one() {
    let repo = MemoryRepository::<Room>::new();
    let stored = repo.insert(room("201")).await.unwrap();
    assert_eq!(stored.version, 1);

    let loaded = repo.get(stored.value.id).await.unwrap();
    assert_eq!(loaded, stored);
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let repo = MemoryRepository::<Room>::new();
    let missing = room("999");
    let err = repo.get(missing.id).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { kind: "room", .. }));
}

#[tokio::test]
async fn test_save_bumps_version() {
    let repo = MemoryRepository::<Room>::new();
    let stored = repo.insert(room("201")).await.unwrap();

    let mut updated = stored.value.clone();
    RoomService::set_status(&mut updated, RoomStatus::Dirty, StaffId::new(), now());
    let saved = repo.save(updated, stored.version).await.unwrap();

    assert_eq!(saved.version, 2);
    assert_eq!(saved.value.status.current, RoomStatus::Dirty);
    assert_eq!(repo.get(saved.value.id).await.unwrap().version, 2);
}

#[tokio::test]
async fn test_stale_save_conflicts_and_writes_nothing() {
    let repo = MemoryRepository::<Room>::new();
    let stored = repo.insert(room("201")).await.unwrap();

    let mut first = stored.value.clone();
    RoomService::set_status(&mut first, RoomStatus::Occupied, StaffId::new(), now());
    let mut second = stored.value.clone();
    RoomService::set_status(&mut second, RoomStatus::Maintenance, StaffId::new(), now());

    repo.save(first, stored.version).await.unwrap();
    let err = repo.save(second, stored.version).await.unwrap_err();
    assert_eq!(
        err,
        StoreError::Conflict {
            kind: "room",
            id: stored.value.id.to_string(),
            expected: 1,
            actual: 2,
        }
    );
    let current = repo.get(stored.value.id).await.unwrap();
    assert_eq!(current.value.status.current, RoomStatus::Occupied);
}

#[tokio::test]
async fn test_duplicate_room_number_rejected() {
    let repo = MemoryRepository::<Room>::new();
    repo.insert(room("201")).await.unwrap();
    let err = repo.insert(room("201")).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Duplicate {
            field: "room_number",
            ..
        }
    ));
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_duplicate_id_rejected() {
    let repo = MemoryRepository::<Room>::new();
    let original = repo.insert(room("201")).await.unwrap();
    let mut copy = original.value.clone();
    copy.room_number = "202".to_string();

    let err = repo.insert(copy).await.unwrap_err();
    assert!(matches!(err, StoreError::Duplicate { field: "id", .. }));
    assert!(repo.find_unique(ROOM_NUMBER, "202").await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_unique() {
    let repo = MemoryRepository::<Guest>::new();
    let stored = repo.insert(guest("ana@example.com")).await.unwrap();

    let found = repo
        .find_unique(GUEST_EMAIL, "ana@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.value.id, stored.value.id);
    assert!(
        repo.find_unique(GUEST_EMAIL, "nobody@example.com")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_changing_unique_key_moves_index() {
    let repo = MemoryRepository::<Guest>::new();
    let stored = repo.insert(guest("ana@example.com")).await.unwrap();
    repo.insert(guest("ben@example.com")).await.unwrap();

    let mut renamed = stored.value.clone();
    renamed.email = "ana.reyes@example.com".to_string();
    let saved = repo.save(renamed, stored.version).await.unwrap();

    assert!(repo.find_unique(GUEST_EMAIL, "ana@example.com").await.unwrap().is_none());
    assert!(
        repo.find_unique(GUEST_EMAIL, "ana.reyes@example.com")
            .await
            .unwrap()
            .is_some()
    );

    let mut clash = saved.value.clone();
    clash.email = "ben@example.com".to_string();
    let err = repo.save(clash, saved.version).await.unwrap_err();
    assert!(matches!(err, StoreError::Duplicate { field: "email", .. }));
    // The failed save leaves the old key in place.
    assert!(
        repo.find_unique(GUEST_EMAIL, "ana.reyes@example.com")
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_one_invoice_per_booking() {
    let store = MemoryStore::new();
    let r = room("301");
    let booking = BookingService::reserve(
        CreateBookingInput {
            guest_id: GuestId::new(),
            check_in: now(),
            check_out: Utc.with_ymd_and_hms(2024, 3, 3, 10, 0, 0).unwrap(),
            occupancy: Occupancy {
                adults: 1,
                children: 0,
            },
            source: BookingSource::default(),
            discount: Decimal::ZERO,
            special_requests: None,
        },
        &r,
        "BKSTORE1".to_string(),
        StaffId::new(),
        now(),
    )
    .unwrap();

    let first = InvoiceService::open_for_booking(&booking, "INV1".to_string(), now(), 7).unwrap();
    let second = InvoiceService::open_for_booking(&booking, "INV2".to_string(), now(), 7).unwrap();
    store.invoices().insert(first).await.unwrap();
    let err = store.invoices().insert(second).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Duplicate {
            field: "booking_id",
            ..
        }
    ));

    let folio = store
        .invoices()
        .find_unique(INVOICE_BOOKING, &booking.id.to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(folio.value.invoice_number, "INV1");
}

#[tokio::test]
async fn test_list_returns_every_document() {
    let repo = MemoryRepository::<Room>::new();
    for number in ["101", "102", "103"] {
        repo.insert(room(number)).await.unwrap();
    }
    let numbers: Vec<String> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|doc| doc.value.room_number)
        .collect();
    assert_eq!(numbers.len(), 3);
    for number in ["101", "102", "103"] {
        assert!(numbers.iter().any(|n| n == number));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_payments_cannot_lose_updates() {
    let store = Arc::new(MemoryStore::new());
    let r = room("401");
    let booking = BookingService::reserve(
        CreateBookingInput {
            guest_id: GuestId::new(),
            check_in: now(),
            check_out: Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap(),
            occupancy: Occupancy {
                adults: 2,
                children: 0,
            },
            source: BookingSource::default(),
            discount: Decimal::ZERO,
            special_requests: None,
        },
        &r,
        "BKSTORE2".to_string(),
        StaffId::new(),
        now(),
    )
    .unwrap();
    let invoice = InvoiceService::open_for_booking(&booking, "INV9".to_string(), now(), 7).unwrap();
    let stored = store.invoices().insert(invoice).await.unwrap();

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            let snapshot = stored.clone();
            tokio::spawn(async move {
                let mut invoice = snapshot.value;
                InvoiceService::add_payment(
                    &mut invoice,
                    NewInvoicePayment {
                        amount: dec!(10),
                        method: PaymentMethod::Cash,
                        reference: None,
                        received_at: None,
                    },
                    now(),
                )
                .unwrap();
                store.invoices().save(invoice, snapshot.version).await
            })
        })
        .collect();

    let results = futures::future::join_all(tasks).await;
    let committed = results
        .into_iter()
        .map(|joined| joined.unwrap())
        .filter(Result::is_ok)
        .count();
    assert_eq!(committed, 1);

    let current = store.invoices().get(stored.value.id).await.unwrap();
    assert_eq!(current.version, 2);
    assert_eq!(current.value.payment_status().total_paid, dec!(10));
}
