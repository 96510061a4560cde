use std::collections::HashMap;

use core_types::types::{AccountId, Amount, Rating, RoomNo};
use parking_lot::RwLock;

use crate::{
    error::{LedgerError, Result},
    room::Room,
    treasury::Payment,
};

/// Owner-governed registry of rooms.
///
/// Every mutating call passes through a single write-lock serialization
/// point that holds the lock for the whole transition. Transition methods
/// validate all preconditions before touching any field, so a call either
/// commits or leaves the record untouched; no caller observes a
/// partially-updated room.
pub struct RoomLedger {
    owner: AccountId,
    rooms: RwLock<HashMap<RoomNo, Room>>,
}

impl RoomLedger {
    pub fn new(owner: AccountId) -> Self {
        Self::with_rooms(owner, HashMap::new())
    }

    pub fn with_rooms(owner: AccountId, rooms: HashMap<RoomNo, Room>) -> Self {
        Self {
            owner,
            rooms: RwLock::new(rooms),
        }
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    pub fn ensure_owner(&self, caller: &AccountId) -> Result<()> {
        if caller != &self.owner {
            return Err(LedgerError::NotOwner);
        }
        Ok(())
    }

    /// Runs `mutator` against the room record under the write lock,
    /// creating the default record on first reference.
    fn mutate_room<T, F>(&self, room_no: RoomNo, mutator: F) -> Result<T>
    where
        F: FnOnce(&mut Room) -> Result<T>,
    {
        let mut guard = self.rooms.write();
        let room = guard.entry(room_no).or_default();
        mutator(room)
    }

    /// Owner-only upsert of category and tariff. Lifecycle state is left
    /// alone, so configuring a booked room mid-cycle is permitted.
    pub fn configure_room(
        &self,
        caller: &AccountId,
        room_no: RoomNo,
        category_name: &str,
        tariff: Amount,
    ) -> Result<()> {
        self.ensure_owner(caller)?;
        self.mutate_room(room_no, |room| {
            room.configure(category_name, tariff);
            Ok(())
        })
    }

    /// Books the room when the payment matches the tariff exactly.
    ///
    /// Neither prior `booked` state nor configuration is checked:
    /// re-booking overwrites the holder, and an unconfigured room books
    /// against a zero payment.
    pub fn book_room(&self, room_no: RoomNo, payment: &Payment) -> Result<()> {
        self.mutate_room(room_no, |room| {
            if payment.amount != room.tariff {
                return Err(LedgerError::IncorrectPayment {
                    room_no,
                    expected: room.tariff,
                    offered: payment.amount,
                });
            }
            room.book(payment.payer.clone());
            Ok(())
        })
    }

    pub fn check_in(&self, caller: &AccountId, room_no: RoomNo) -> Result<()> {
        self.mutate_room(room_no, |room| Ok(room.check_in(room_no, caller)?))
    }

    pub fn check_out(
        &self,
        caller: &AccountId,
        room_no: RoomNo,
        rating: Rating,
        rating_min: Rating,
        rating_max: Rating,
    ) -> Result<()> {
        self.mutate_room(room_no, |room| {
            Ok(room.check_out(room_no, caller, rating, rating_min, rating_max)?)
        })
    }

    /// Full room record, or the default record if never set.
    pub fn room(&self, room_no: RoomNo) -> Room {
        self.rooms
            .read()
            .get(&room_no)
            .cloned()
            .unwrap_or_default()
    }

    pub fn snapshot(&self) -> HashMap<RoomNo, Room> {
        self.rooms.read().clone()
    }

    pub fn len(&self) -> usize {
        self.rooms.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> RoomLedger {
        RoomLedger::new(AccountId::new("owner"))
    }

    fn pay(payer: &str, amount: Amount) -> Payment {
        Payment {
            payer: AccountId::new(payer),
            amount,
        }
    }

    #[test]
    fn non_owner_configure_rejected() {
        let ledger = ledger();
        let err = ledger
            .configure_room(&AccountId::new("mallory"), 1, "Royal", 10)
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotOwner));
        assert_eq!(ledger.room(1), Room::default());
    }

    #[test]
    fn exact_payment_books_room() {
        let ledger = ledger();
        ledger
            .configure_room(&AccountId::new("owner"), 1, "Royal", 10)
            .unwrap();
        ledger.book_room(1, &pay("guest", 10)).unwrap();

        let room = ledger.room(1);
        assert!(room.booked);
        assert_eq!(room.customer_booked, Some(AccountId::new("guest")));
    }

    #[test]
    fn payment_mismatch_leaves_room_unchanged() {
        let ledger = ledger();
        ledger
            .configure_room(&AccountId::new("owner"), 1, "Royal", 10)
            .unwrap();
        let before = ledger.room(1);

        let err = ledger.book_room(1, &pay("guest", 1)).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::IncorrectPayment {
                room_no: 1,
                expected: 10,
                offered: 1,
            }
        ));
        assert_eq!(ledger.room(1), before);
    }

    #[test]
    fn unconfigured_room_books_against_zero_payment() {
        let ledger = ledger();
        ledger.book_room(42, &pay("guest", 0)).unwrap();

        let room = ledger.room(42);
        assert!(room.is_unconfigured());
        assert!(room.booked);
    }

    #[test]
    fn unknown_room_reads_as_default() {
        let ledger = ledger();
        assert_eq!(ledger.room(99), Room::default());
        assert!(ledger.is_empty());
    }

    #[test]
    fn occupied_implies_booked_after_every_operation() {
        let ledger = ledger();
        let owner = AccountId::new("owner");
        let guest = AccountId::new("guest");
        ledger.configure_room(&owner, 1, "Royal", 10).unwrap();

        let holds = |l: &RoomLedger| {
            let room = l.room(1);
            !room.occupied || room.booked
        };

        assert!(holds(&ledger));
        ledger.book_room(1, &pay("guest", 10)).unwrap();
        assert!(holds(&ledger));
        ledger.check_in(&guest, 1).unwrap();
        assert!(holds(&ledger));
        ledger.check_out(&guest, 1, 5, 1, 5).unwrap();
        assert!(holds(&ledger));
    }
}
