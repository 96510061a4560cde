use core_types::types::{AccountId, Amount, Rating, RoomNo};
use log::info;
use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::{
    config::LedgerConfig,
    error::Result,
    events::{EventBus, LedgerEvent},
    ledger::RoomLedger,
    room::{current_time_ns, Room, RoomStatus},
    storage::StateSnapshot,
    treasury::{Payment, PaymentRecord, Treasury},
};

/// Issued on a successful booking.
#[derive(Clone, Debug)]
pub struct BookingReceipt {
    pub room_no: RoomNo,
    pub customer: AccountId,
    pub amount: Amount,
    pub accepted_ns: i64,
}

/// Room counts by lifecycle status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoomStatusCounts {
    pub vacant: usize,
    pub booked: usize,
    pub occupied: usize,
}

/// High-level API over the room registry, treasury, and notifications.
///
/// Caller identity is an explicit parameter on every mutating call; there
/// is no ambient "sender" notion. Events are emitted only after the state
/// change commits, exactly once per successful operation.
pub struct LedgerController {
    config: LedgerConfig,
    ledger: RoomLedger,
    treasury: Mutex<Treasury>,
    events: EventBus,
}

impl LedgerController {
    /// Loads any persisted state from the configured directory and builds
    /// the controller. The owner identity is fixed for its lifetime.
    pub fn bootstrap(config: LedgerConfig, owner: AccountId) -> Result<Self> {
        config.ensure_dirs()?;
        let snapshot = StateSnapshot::load_or_init(config.snapshot_path())?;
        info!(
            "ledger bootstrapped: owner={}, rooms={}, balance={}",
            owner,
            snapshot.rooms.len(),
            snapshot.treasury.balance()
        );
        Ok(Self {
            ledger: RoomLedger::with_rooms(owner, snapshot.rooms),
            treasury: Mutex::new(snapshot.treasury),
            events: EventBus::new(config.event_capacity),
            config,
        })
    }

    pub fn owner(&self) -> &AccountId {
        self.ledger.owner()
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    /// Owner-only room configuration; orthogonal to lifecycle state.
    pub fn set_hotel_room(
        &self,
        caller: &AccountId,
        room_no: RoomNo,
        category_name: &str,
        tariff: Amount,
    ) -> Result<()> {
        self.ledger
            .configure_room(caller, room_no, category_name, tariff)?;
        self.persist()
    }

    /// Books the room against an exact-tariff payment. Custody of the
    /// amount is taken only after the booking commits, so a rejected
    /// payment leaves the payer's funds untouched.
    pub fn pay_to_book(&self, room_no: RoomNo, payment: Payment) -> Result<BookingReceipt> {
        self.ledger.book_room(room_no, &payment)?;
        let accepted_ns = current_time_ns();
        self.treasury.lock().credit(PaymentRecord {
            room_no,
            payer: payment.payer.clone(),
            amount: payment.amount,
            accepted_ns,
        });
        self.persist()?;
        self.events.emit(LedgerEvent::RoomBooked {
            room_no,
            customer: payment.payer.clone(),
            ts_ns: accepted_ns,
        });
        Ok(BookingReceipt {
            room_no,
            customer: payment.payer,
            amount: payment.amount,
            accepted_ns,
        })
    }

    pub fn check_in(&self, caller: &AccountId, room_no: RoomNo) -> Result<()> {
        self.ledger.check_in(caller, room_no)?;
        self.persist()?;
        self.events.emit(LedgerEvent::CheckedIn {
            room_no,
            customer: caller.clone(),
            ts_ns: current_time_ns(),
        });
        Ok(())
    }

    pub fn check_out(&self, caller: &AccountId, room_no: RoomNo, rating: Rating) -> Result<()> {
        self.ledger.check_out(
            caller,
            room_no,
            rating,
            self.config.rating_min,
            self.config.rating_max,
        )?;
        self.persist()?;
        self.events.emit(LedgerEvent::CheckedOut {
            room_no,
            customer: caller.clone(),
            rating,
            ts_ns: current_time_ns(),
        });
        Ok(())
    }

    /// Full room record, or the default record if never set.
    pub fn hotel_room_details(&self, room_no: RoomNo) -> Room {
        self.ledger.room(room_no)
    }

    pub fn balance(&self) -> Amount {
        self.treasury.lock().balance()
    }

    pub fn total_collected(&self) -> Amount {
        self.treasury.lock().total_collected()
    }

    /// Owner-only withdrawal from the collected balance. Returns the
    /// balance remaining after the withdrawal.
    pub fn withdraw(&self, caller: &AccountId, amount: Amount) -> Result<Amount> {
        self.ledger.ensure_owner(caller)?;
        let remaining = {
            let mut treasury = self.treasury.lock();
            treasury.withdraw(amount)?;
            treasury.balance()
        };
        self.persist()?;
        Ok(remaining)
    }

    pub fn room_status_snapshot(&self) -> RoomStatusCounts {
        let mut counts = RoomStatusCounts::default();
        for room in self.ledger.snapshot().values() {
            match room.status() {
                RoomStatus::Vacant => counts.vacant += 1,
                RoomStatus::Booked => counts.booked += 1,
                RoomStatus::Occupied => counts.occupied += 1,
            }
        }
        counts
    }

    fn persist(&self) -> Result<()> {
        let snapshot = StateSnapshot {
            rooms: self.ledger.snapshot(),
            treasury: self.treasury.lock().clone(),
        };
        snapshot.persist(self.config.snapshot_path())?;
        Ok(())
    }
}
