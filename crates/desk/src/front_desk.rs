//! Front desk application service.
//!
//! Every operation follows the same shape: check the actor's permission,
//! load the documents it needs with their versions, run the engine
//! transition in memory, then save each changed document against the version
//! it was read at.
//!
//! Multi-document operations save in a fixed order (booking, room, invoice,
//! guest) and stop at the first failed save. Earlier saves are not undone.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use innkeep_core::booking::{
    Booking, BookingService, CancellationPolicy, CreateBookingInput, PaymentMethod,
};
use innkeep_core::guest::{CreateGuestInput, Guest, GuestLedger};
use innkeep_core::invoice::{
    Invoice, InvoiceError, InvoiceService, InvoiceStatus, NewInvoicePayment, NewLineItem,
};
use innkeep_core::numbering::{IdentifierGenerator, RandomIdentifiers};
use innkeep_core::room::{CreateRoomInput, Room, RoomService, RoomStatus};
use innkeep_core::stay::{CheckoutSummary, StayService};
use innkeep_shared::types::{BookingId, GuestId, InvoiceId, RoomId};
use innkeep_shared::{Actor, AppConfig, Clock, Permission, SystemClock};
use innkeep_store::{INVOICE_BOOKING, Repository, Store, StoreError, Versioned};
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use crate::error::DeskError;

/// Result alias for desk operations.
pub type DeskResult<T> = Result<T, DeskError>;

/// The front desk: every mutating hotel operation, permission-checked and persisted.
pub struct FrontDesk<S, C = SystemClock, G = RandomIdentifiers> {
    store: Arc<S>,
    clock: C,
    ids: G,
    config: AppConfig,
}

impl<S, C, G> FrontDesk<S, C, G>
where
    S: Store,
    C: Clock,
    G: IdentifierGenerator,
{
    /// Creates a front desk over `store`.
    pub fn new(store: Arc<S>, clock: C, ids: G, config: AppConfig) -> Self {
        Self {
            store,
            clock,
            ids,
            config,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The clock every operation reads.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Active configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn authorize(actor: &Actor, permission: Permission) -> DeskResult<()> {
        if actor.can(permission) {
            return Ok(());
        }
        warn!(
            staff_id = %actor.staff_id,
            role = ?actor.role,
            permission = %permission,
            "Permission denied"
        );
        Err(DeskError::Forbidden {
            permission,
            role: actor.role,
        })
    }

    // ========================================================================
    // Rooms
    // ========================================================================

    /// Adds a room to the inventory.
    #[instrument(skip_all, fields(staff_id = %actor.staff_id, room_number = %input.room_number))]
    pub async fn register_room(
        &self,
        actor: &Actor,
        input: CreateRoomInput,
    ) -> DeskResult<Versioned<Room>> {
        Self::authorize(actor, Permission::ManageRooms)?;
        let room = RoomService::create(input, self.clock.now())?;
        let stored = self.store.rooms().insert(room).await?;
        info!(room_id = %stored.value.id, "Room registered");
        Ok(stored)
    }

    /// Sets a room's status directly.
    #[instrument(
        skip_all,
        fields(staff_id = %actor.staff_id, room_id = %room_id, status = %status)
    )]
    pub async fn set_room_status(
        &self,
        actor: &Actor,
        room_id: RoomId,
        status: RoomStatus,
    ) -> DeskResult<Versioned<Room>> {
        Self::authorize(actor, Permission::ManageRooms)?;
        let staff_id = actor.staff_id;
        self.update_room(room_id, |room, now| {
            RoomService::set_status(room, status, staff_id, now);
        })
        .await
    }

    /// Records a cleaning; the room becomes `clean`.
    #[instrument(skip_all, fields(staff_id = %actor.staff_id, room_id = %room_id))]
    pub async fn mark_room_cleaned(
        &self,
        actor: &Actor,
        room_id: RoomId,
        notes: Option<String>,
    ) -> DeskResult<Versioned<Room>> {
        Self::authorize(actor, Permission::ManageRooms)?;
        let staff_id = actor.staff_id;
        self.update_room(room_id, |room, now| {
            RoomService::mark_cleaned(room, staff_id, notes, now);
        })
        .await
    }

    /// Takes a room out of sale for maintenance.
    #[instrument(skip_all, fields(staff_id = %actor.staff_id, room_id = %room_id))]
    pub async fn report_maintenance(
        &self,
        actor: &Actor,
        room_id: RoomId,
        notes: String,
    ) -> DeskResult<Versioned<Room>> {
        Self::authorize(actor, Permission::ManageRooms)?;
        let staff_id = actor.staff_id;
        self.update_room(room_id, |room, now| {
            RoomService::report_maintenance(room, notes, staff_id, now);
        })
        .await
    }

    /// Clears maintenance; the room goes to housekeeping as `dirty`.
    #[instrument(skip_all, fields(staff_id = %actor.staff_id, room_id = %room_id))]
    pub async fn complete_maintenance(
        &self,
        actor: &Actor,
        room_id: RoomId,
    ) -> DeskResult<Versioned<Room>> {
        Self::authorize(actor, Permission::ManageRooms)?;
        let staff_id = actor.staff_id;
        self.update_room(room_id, |room, now| {
            RoomService::complete_maintenance(room, staff_id, now);
        })
        .await
    }

    async fn update_room<F>(&self, room_id: RoomId, change: F) -> DeskResult<Versioned<Room>>
    where
        F: FnOnce(&mut Room, DateTime<Utc>) + Send,
    {
        let loaded = self.store.rooms().get(room_id).await?;
        let mut room = loaded.value;
        change(&mut room, self.clock.now());
        let saved = self.store.rooms().save(room, loaded.version).await?;
        info!(
            room_number = %saved.value.room_number,
            status = %saved.value.status.current,
            "Room updated"
        );
        Ok(saved)
    }

    // ========================================================================
    // Guests
    // ========================================================================

    /// Creates a guest profile. Emails are unique.
    #[instrument(skip_all, fields(staff_id = %actor.staff_id))]
    pub async fn register_guest(
        &self,
        actor: &Actor,
        input: CreateGuestInput,
    ) -> DeskResult<Versioned<Guest>> {
        Self::authorize(actor, Permission::ManageGuests)?;
        let guest = GuestLedger::register(input, self.clock.now())?;
        let stored = self.store.guests().insert(guest).await?;
        info!(guest_id = %stored.value.id, "Guest registered");
        Ok(stored)
    }

    /// Credits loyalty points outside of a stay.
    #[instrument(
        skip_all,
        fields(staff_id = %actor.staff_id, guest_id = %guest_id, points = points)
    )]
    pub async fn award_points(
        &self,
        actor: &Actor,
        guest_id: GuestId,
        points: u64,
    ) -> DeskResult<Versioned<Guest>> {
        Self::authorize(actor, Permission::ManageGuests)?;
        let loaded = self.store.guests().get(guest_id).await?;
        let mut guest = loaded.value;
        GuestLedger::add_loyalty_points(&mut guest, points);
        let saved = self.store.guests().save(guest, loaded.version).await?;
        info!(
            tier = %saved.value.loyalty.tier,
            balance = saved.value.loyalty.points,
            "Points awarded"
        );
        Ok(saved)
    }

    /// Spends loyalty points.
    #[instrument(
        skip_all,
        fields(staff_id = %actor.staff_id, guest_id = %guest_id, points = points)
    )]
    pub async fn redeem_points(
        &self,
        actor: &Actor,
        guest_id: GuestId,
        points: u64,
    ) -> DeskResult<Versioned<Guest>> {
        Self::authorize(actor, Permission::ManageGuests)?;
        let loaded = self.store.guests().get(guest_id).await?;
        let mut guest = loaded.value;
        GuestLedger::redeem_points(&mut guest, points)?;
        let saved = self.store.guests().save(guest, loaded.version).await?;
        info!(balance = saved.value.loyalty.points, "Points redeemed");
        Ok(saved)
    }

    // ========================================================================
    // Bookings
    // ========================================================================

    /// Books an available room for a registered guest.
    ///
    /// The room's status is not changed until check-in.
    #[instrument(skip_all, fields(staff_id = %actor.staff_id, room_id = %room_id))]
    pub async fn reserve(
        &self,
        actor: &Actor,
        room_id: RoomId,
        input: CreateBookingInput,
    ) -> DeskResult<Versioned<Booking>> {
        Self::authorize(actor, Permission::ManageReservations)?;
        let room = self.store.rooms().get(room_id).await?;
        self.store.guests().get(input.guest_id).await?;

        let now = self.clock.now();
        let number = self.ids.booking_number(now);
        let booking = BookingService::reserve(input, &room.value, number, actor.staff_id, now)?;
        let stored = self.store.bookings().insert(booking).await?;
        info!(
            booking_number = %stored.value.booking_number,
            room_number = %room.value.room_number,
            total = %stored.value.pricing.total(),
            "Booking confirmed"
        );
        Ok(stored)
    }

    /// Checks the guest in: booking `checked_in`, room `occupied`.
    #[instrument(skip_all, fields(staff_id = %actor.staff_id, booking_id = %booking_id))]
    pub async fn check_in(
        &self,
        actor: &Actor,
        booking_id: BookingId,
    ) -> DeskResult<Versioned<Booking>> {
        Self::authorize(actor, Permission::ManageReservations)?;
        let booking = self.store.bookings().get(booking_id).await?;
        let room = self.store.rooms().get(booking.value.room_id).await?;

        let (mut b, mut r) = (booking.value, room.value);
        StayService::check_in(&mut b, &mut r, self.clock.now(), actor.staff_id)?;

        let saved = self.store.bookings().save(b, booking.version).await?;
        let room = self.store.rooms().save(r, room.version).await?;
        info!(
            booking_number = %saved.value.booking_number,
            room_number = %room.value.room_number,
            "Guest checked in"
        );
        Ok(saved)
    }

    /// Checks the guest out: booking `checked_out`, room `dirty`, guest
    /// statistics and loyalty updated from the folio.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if no invoice was opened for the booking.
    #[instrument(skip_all, fields(staff_id = %actor.staff_id, booking_id = %booking_id))]
    pub async fn check_out(
        &self,
        actor: &Actor,
        booking_id: BookingId,
    ) -> DeskResult<CheckoutSummary> {
        Self::authorize(actor, Permission::ManageReservations)?;
        let booking = self.store.bookings().get(booking_id).await?;
        let room = self.store.rooms().get(booking.value.room_id).await?;
        let invoice = self.invoice_for_booking(booking_id).await?;
        let guest = self.store.guests().get(booking.value.guest_id).await?;

        let (mut b, mut r, mut i, mut g) = (booking.value, room.value, invoice.value, guest.value);
        let summary = StayService::check_out(
            &mut b,
            &mut r,
            &mut i,
            &mut g,
            self.clock.now(),
            actor.staff_id,
            self.config.loyalty.points_per_currency_unit,
        )?;

        let booking_number = b.booking_number.clone();
        self.store.bookings().save(b, booking.version).await?;
        self.store.rooms().save(r, room.version).await?;
        self.store.invoices().save(i, invoice.version).await?;
        self.store.guests().save(g, guest.version).await?;
        info!(
            booking_number = %booking_number,
            nights = summary.total_nights,
            revenue = %summary.revenue,
            points = summary.points_awarded,
            "Guest checked out"
        );
        Ok(summary)
    }

    /// Cancels a confirmed booking under the configured cancellation policy.
    ///
    /// The refund covers everything received for the stay, on the booking or
    /// on its folio, less the fee. The folio is voided with the booking and
    /// keeps its payments as the record the refund settles.
    #[instrument(skip_all, fields(staff_id = %actor.staff_id, booking_id = %booking_id))]
    pub async fn cancel(
        &self,
        actor: &Actor,
        booking_id: BookingId,
        reason: String,
    ) -> DeskResult<Versioned<Booking>> {
        Self::authorize(actor, Permission::ManageReservations)?;
        let loaded = self.store.bookings().get(booking_id).await?;
        let mut folio = self
            .store
            .invoices()
            .find_unique(INVOICE_BOOKING, &booking_id.to_string())
            .await?;
        let voids_folio = folio
            .as_ref()
            .is_some_and(|doc| doc.value.status() != InvoiceStatus::Cancelled);

        let mut booking = loaded.value;
        let policy = CancellationPolicy::from(&self.config.cancellation);
        let terms = StayService::cancel(
            &mut booking,
            folio.as_mut().map(|doc| &mut doc.value),
            &policy,
            self.clock.now(),
            actor.staff_id,
            reason,
        )?;

        let saved = self.store.bookings().save(booking, loaded.version).await?;
        if let Some(doc) = folio.filter(|_| voids_folio) {
            self.store.invoices().save(doc.value, doc.version).await?;
        }
        info!(
            booking_number = %saved.value.booking_number,
            fee = %terms.fee,
            refund = %terms.refund,
            folio_voided = voids_folio,
            "Booking cancelled"
        );
        Ok(saved)
    }

    /// Takes a deposit or prepayment against a booking.
    ///
    /// When the booking's folio is open the payment is posted there too.
    #[instrument(
        skip_all,
        fields(staff_id = %actor.staff_id, booking_id = %booking_id, amount = %amount)
    )]
    pub async fn record_booking_payment(
        &self,
        actor: &Actor,
        booking_id: BookingId,
        amount: Decimal,
        method: PaymentMethod,
        reference: Option<String>,
    ) -> DeskResult<Versioned<Booking>> {
        Self::authorize(actor, Permission::ManageBilling)?;
        let loaded = self.store.bookings().get(booking_id).await?;
        let folio = self
            .store
            .invoices()
            .find_unique(INVOICE_BOOKING, &booking_id.to_string())
            .await?;

        let mut booking = loaded.value;
        BookingService::record_payment(&mut booking, amount, method, reference, self.clock.now())?;
        let folio = match folio {
            Some(mut doc) if doc.value.status() != InvoiceStatus::Cancelled => {
                InvoiceService::post_booking_payments(&mut doc.value, &booking)?;
                Some(doc)
            }
            _ => None,
        };

        let saved = self.store.bookings().save(booking, loaded.version).await?;
        if let Some(doc) = folio {
            let invoice = self.store.invoices().save(doc.value, doc.version).await?;
            info!(
                invoice_number = %invoice.value.invoice_number,
                outstanding = %invoice.value.outstanding(),
                "Booking payment posted to folio"
            );
        }
        info!(
            booking_number = %saved.value.booking_number,
            outstanding = %BookingService::outstanding_balance(&saved.value),
            "Booking payment recorded"
        );
        Ok(saved)
    }

    // ========================================================================
    // Invoices
    // ========================================================================

    /// Opens the folio for a booking with its room nights posted.
    #[instrument(skip_all, fields(staff_id = %actor.staff_id, booking_id = %booking_id))]
    pub async fn open_invoice(
        &self,
        actor: &Actor,
        booking_id: BookingId,
    ) -> DeskResult<Versioned<Invoice>> {
        Self::authorize(actor, Permission::ManageBilling)?;
        let booking = self.store.bookings().get(booking_id).await?;

        let now = self.clock.now();
        let invoice = InvoiceService::open_for_booking(
            &booking.value,
            self.ids.invoice_number(now),
            now,
            self.config.billing.invoice_due_days,
        )?;
        let stored = self.store.invoices().insert(invoice).await?;
        info!(
            invoice_number = %stored.value.invoice_number,
            booking_number = %booking.value.booking_number,
            total = %stored.value.summary().total_amount,
            "Invoice opened"
        );
        Ok(stored)
    }

    /// Posts a charge to a folio.
    #[instrument(skip_all, fields(staff_id = %actor.staff_id, invoice_id = %invoice_id))]
    pub async fn add_charge(
        &self,
        actor: &Actor,
        invoice_id: InvoiceId,
        item: NewLineItem,
    ) -> DeskResult<Versioned<Invoice>> {
        Self::authorize(actor, Permission::ManageBilling)?;
        self.update_invoice(invoice_id, |invoice, now| {
            InvoiceService::add_line_item(invoice, item, now).map(|_| ())
        })
        .await
    }

    /// Records a payment against a folio.
    #[instrument(
        skip_all,
        fields(staff_id = %actor.staff_id, invoice_id = %invoice_id, amount = %payment.amount)
    )]
    pub async fn add_invoice_payment(
        &self,
        actor: &Actor,
        invoice_id: InvoiceId,
        payment: NewInvoicePayment,
    ) -> DeskResult<Versioned<Invoice>> {
        Self::authorize(actor, Permission::ManageBilling)?;
        self.update_invoice(invoice_id, |invoice, now| {
            InvoiceService::add_payment(invoice, payment, now).map(|_| ())
        })
        .await
    }

    /// Sets the folio discount.
    #[instrument(
        skip_all,
        fields(staff_id = %actor.staff_id, invoice_id = %invoice_id, amount = %amount)
    )]
    pub async fn apply_invoice_discount(
        &self,
        actor: &Actor,
        invoice_id: InvoiceId,
        amount: Decimal,
    ) -> DeskResult<Versioned<Invoice>> {
        Self::authorize(actor, Permission::ManageBilling)?;
        self.update_invoice(invoice_id, |invoice, _| {
            InvoiceService::apply_discount(invoice, amount)
        })
        .await
    }

    /// Flags every unpaid invoice past its due date as `overdue`.
    ///
    /// Returns the invoice numbers newly flagged.
    #[instrument(skip_all, fields(staff_id = %actor.staff_id))]
    pub async fn flag_overdue_invoices(&self, actor: &Actor) -> DeskResult<Vec<String>> {
        Self::authorize(actor, Permission::ManageBilling)?;
        let now = self.clock.now();
        let mut flagged = Vec::new();

        for doc in self.store.invoices().list().await? {
            let mut invoice = doc.value;
            if invoice.status() == InvoiceStatus::Overdue
                || !InvoiceService::flag_overdue(&mut invoice, now)
            {
                continue;
            }
            let number = invoice.invoice_number.clone();
            self.store.invoices().save(invoice, doc.version).await?;
            flagged.push(number);
        }

        if !flagged.is_empty() {
            info!(count = flagged.len(), "Invoices flagged overdue");
        }
        Ok(flagged)
    }

    async fn update_invoice<F>(
        &self,
        invoice_id: InvoiceId,
        change: F,
    ) -> DeskResult<Versioned<Invoice>>
    where
        F: FnOnce(&mut Invoice, DateTime<Utc>) -> Result<(), InvoiceError> + Send,
    {
        let loaded = self.store.invoices().get(invoice_id).await?;
        let mut invoice = loaded.value;
        change(&mut invoice, self.clock.now())?;
        let saved = self.store.invoices().save(invoice, loaded.version).await?;
        info!(
            invoice_number = %saved.value.invoice_number,
            status = %saved.value.status(),
            outstanding = %saved.value.outstanding(),
            "Invoice updated"
        );
        Ok(saved)
    }

    async fn invoice_for_booking(&self, booking_id: BookingId) -> DeskResult<Versioned<Invoice>> {
        self.store
            .invoices()
            .find_unique(INVOICE_BOOKING, &booking_id.to_string())
            .await?
            .ok_or_else(|| {
                StoreError::NotFound {
                    kind: "invoice",
                    id: format!("booking {booking_id}"),
                }
                .into()
            })
    }
}
