//! Innkeep seeder.
//!
//! Builds an in-memory property (rooms and guests), then walks one booking
//! from reservation through check-out and logs what the engine produced.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use chrono::{Duration, Utc};
use innkeep_core::booking::{BookingSource, CreateBookingInput, Occupancy, PaymentMethod};
use innkeep_core::guest::{CreateGuestInput, GuestPreferences};
use innkeep_core::invoice::{LineItemCategory, NewInvoicePayment, NewLineItem};
use innkeep_core::numbering::RandomIdentifiers;
use innkeep_core::room::{Bed, BedKind, CreateRoomInput, RoomRate, RoomType};
use innkeep_desk::FrontDesk;
use innkeep_shared::types::{Currency, GuestId, RoomId, StaffId};
use innkeep_shared::{Actor, AppConfig, Clock, FixedClock, StaffRole};
use innkeep_store::MemoryStore;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Desk = FrontDesk<MemoryStore, FixedClock, RandomIdentifiers>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "innkeep=debug,seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    info!(
        property = %config.property.name,
        currency = %config.property.currency,
        "Configuration loaded"
    );

    let desk: Desk = FrontDesk::new(
        Arc::new(MemoryStore::new()),
        FixedClock::new(Utc::now()),
        RandomIdentifiers,
        config,
    );
    let manager = Actor::new(StaffId::new(), StaffRole::Manager);
    let clerk = Actor::new(StaffId::new(), StaffRole::FrontDesk);
    let housekeeper = Actor::new(StaffId::new(), StaffRole::Housekeeping);

    let rooms = seed_rooms(&desk, &manager).await?;
    let guests = seed_guests(&desk, &manager).await?;
    info!(rooms = rooms.len(), guests = guests.len(), "Property seeded");

    let (Some(&room_id), Some(&guest_id)) = (rooms.first(), guests.first()) else {
        anyhow::bail!("nothing was seeded");
    };

    let arrival = desk.clock().now();
    let booking = desk
        .reserve(
            &clerk,
            room_id,
            CreateBookingInput {
                guest_id,
                check_in: arrival,
                check_out: arrival + Duration::days(2),
                occupancy: Occupancy {
                    adults: 1,
                    children: 0,
                },
                source: BookingSource::default(),
                discount: Decimal::ZERO,
                special_requests: Some("Late arrival".to_string()),
            },
        )
        .await?;
    let booking_id = booking.value.id;

    let folio = desk.open_invoice(&clerk, booking_id).await?;
    desk.check_in(&clerk, booking_id).await?;

    desk.clock().advance(Duration::hours(20));
    let folio = desk
        .add_charge(
            &clerk,
            folio.value.id,
            NewLineItem {
                category: LineItemCategory::FoodBeverage,
                description: "Room service dinner".to_string(),
                quantity: 2,
                unit_price: dec!(18.50),
                tax_rate: dec!(10),
            },
        )
        .await?;

    desk.clock().advance(Duration::hours(28));
    desk.add_invoice_payment(
        &clerk,
        folio.value.id,
        NewInvoicePayment {
            amount: folio.value.payment_status().outstanding_balance,
            method: PaymentMethod::Card,
            reference: Some("POS-0001".to_string()),
            received_at: None,
        },
    )
    .await?;

    let summary = desk.check_out(&clerk, booking_id).await?;
    info!(
        nights = summary.total_nights,
        revenue = %summary.revenue,
        points = summary.points_awarded,
        tier = %summary.tier,
        "Stay settled"
    );

    desk.mark_room_cleaned(&housekeeper, room_id, None).await?;
    info!("Seeding complete");
    Ok(())
}

async fn seed_rooms(desk: &Desk, actor: &Actor) -> anyhow::Result<Vec<RoomId>> {
    let currency: Currency = desk.config().property.currency;
    let layout = [
        ("101", 1, RoomType::Single, 1, BedKind::Single, dec!(60)),
        ("102", 1, RoomType::Double, 2, BedKind::Double, dec!(85)),
        ("201", 2, RoomType::Deluxe, 2, BedKind::Queen, dec!(120)),
        ("301", 3, RoomType::Suite, 4, BedKind::King, dec!(240)),
    ];

    let mut ids = Vec::with_capacity(layout.len());
    for (number, floor, room_type, capacity, bed, base_rate) in layout {
        let room = desk
            .register_room(
                actor,
                CreateRoomInput {
                    room_number: number.to_string(),
                    room_type,
                    floor,
                    capacity,
                    beds: vec![Bed {
                        kind: bed,
                        count: 1,
                    }],
                    rate: RoomRate {
                        base_rate,
                        tax_rate: dec!(12),
                        currency,
                    },
                    amenities: vec!["wifi".to_string(), "air_conditioning".to_string()],
                },
            )
            .await?;
        ids.push(room.value.id);
    }
    Ok(ids)
}

async fn seed_guests(desk: &Desk, actor: &Actor) -> anyhow::Result<Vec<GuestId>> {
    let people = [
        ("maria.santos@example.com", "Maria", "Santos", Some(RoomType::Deluxe)),
        ("kenji.sato@example.com", "Kenji", "Sato", None),
        ("amara.okafor@example.com", "Amara", "Okafor", Some(RoomType::Suite)),
    ];

    let mut ids = Vec::with_capacity(people.len());
    for (email, first_name, last_name, room_type) in people {
        let guest = desk
            .register_guest(
                actor,
                CreateGuestInput {
                    email: email.to_string(),
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    preferences: GuestPreferences {
                        room_type,
                        ..GuestPreferences::default()
                    },
                    ..CreateGuestInput::default()
                },
            )
            .await?;
        ids.push(guest.value.id);
    }
    Ok(ids)
}
