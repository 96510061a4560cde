use std::time::{SystemTime, UNIX_EPOCH};

use core_types::types::{AccountId, Amount, Rating, RoomNo};
use serde::{Deserialize, Serialize};

use crate::error::RoomWriteError;

/// Lifecycle position of a room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomStatus {
    #[default]
    Vacant,
    Booked,
    Occupied,
}

/// Per-room record. Created with default zero/empty values the first time
/// a room number is referenced; never deleted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub category_name: String,
    pub tariff: Amount,
    pub booked: bool,
    pub customer_booked: Option<AccountId>,
    pub occupied: bool,
    pub review: Rating,
    pub review_no: u32,
    pub last_updated_ns: i64,
}

impl Room {
    /// True until the owner populates category and tariff.
    pub fn is_unconfigured(&self) -> bool {
        self.tariff == 0 && self.category_name.is_empty()
    }

    pub fn status(&self) -> RoomStatus {
        if self.occupied {
            RoomStatus::Occupied
        } else if self.booked {
            RoomStatus::Booked
        } else {
            RoomStatus::Vacant
        }
    }

    /// Upserts category and tariff without touching lifecycle state.
    pub fn configure(&mut self, category_name: &str, tariff: Amount) {
        self.category_name = category_name.to_string();
        self.tariff = tariff;
        self.last_updated_ns = current_time_ns();
    }

    /// Records a booking. Overwrites any existing holder.
    pub fn book(&mut self, customer: AccountId) {
        self.booked = true;
        self.customer_booked = Some(customer);
        self.last_updated_ns = current_time_ns();
    }

    /// Only the booking holder may check in; prior occupancy is not a gate.
    pub fn check_in(&mut self, room_no: RoomNo, caller: &AccountId) -> Result<(), RoomWriteError> {
        if !self.booked {
            return Err(RoomWriteError::NotBooked { room_no });
        }
        self.ensure_holder(room_no, caller)?;
        self.occupied = true;
        self.last_updated_ns = current_time_ns();
        Ok(())
    }

    /// Ends the cycle: clears booking and occupancy, records the rating.
    pub fn check_out(
        &mut self,
        room_no: RoomNo,
        caller: &AccountId,
        rating: Rating,
        rating_min: Rating,
        rating_max: Rating,
    ) -> Result<(), RoomWriteError> {
        if !self.occupied {
            return Err(RoomWriteError::NotOccupied { room_no });
        }
        self.ensure_holder(room_no, caller)?;
        if rating < rating_min || rating > rating_max {
            return Err(RoomWriteError::RatingOutOfRange {
                rating,
                min: rating_min,
                max: rating_max,
            });
        }
        self.occupied = false;
        self.booked = false;
        self.customer_booked = None;
        self.review = rating;
        self.review_no += 1;
        self.last_updated_ns = current_time_ns();
        Ok(())
    }

    fn ensure_holder(&self, room_no: RoomNo, caller: &AccountId) -> Result<(), RoomWriteError> {
        match &self.customer_booked {
            Some(holder) if holder == caller => Ok(()),
            _ => Err(RoomWriteError::NotHolder {
                room_no,
                caller: caller.clone(),
            }),
        }
    }
}

pub(crate) fn current_time_ns() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as i64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guest() -> AccountId {
        AccountId::new("guest-1")
    }

    #[test]
    fn full_cycle_records_review() {
        let mut room = Room::default();
        room.configure("Royal", 10);
        room.book(guest());
        room.check_in(1, &guest()).unwrap();
        assert!(room.occupied && room.booked);

        room.check_out(1, &guest(), 5, 1, 5).unwrap();
        assert!(!room.booked);
        assert!(!room.occupied);
        assert_eq!(room.customer_booked, None);
        assert_eq!(room.review, 5);
        assert_eq!(room.review_no, 1);

        room.book(guest());
        room.check_in(1, &guest()).unwrap();
        room.check_out(1, &guest(), 3, 1, 5).unwrap();
        assert_eq!(room.review, 3);
        assert_eq!(room.review_no, 2);
    }

    #[test]
    fn check_in_rejects_non_holder() {
        let mut room = Room::default();
        room.book(guest());

        let err = room.check_in(7, &AccountId::new("stranger")).unwrap_err();
        assert!(matches!(err, RoomWriteError::NotHolder { room_no: 7, .. }));
        assert!(!room.occupied);
    }

    #[test]
    fn check_in_requires_booking() {
        let mut room = Room::default();
        let err = room.check_in(2, &guest()).unwrap_err();
        assert!(matches!(err, RoomWriteError::NotBooked { room_no: 2 }));
        assert!(!room.occupied);
    }

    #[test]
    fn check_out_requires_occupancy() {
        let mut room = Room::default();
        room.book(guest());
        let err = room.check_out(3, &guest(), 4, 1, 5).unwrap_err();
        assert!(matches!(err, RoomWriteError::NotOccupied { room_no: 3 }));
        assert!(room.booked);
    }

    #[test]
    fn out_of_range_rating_leaves_room_untouched() {
        let mut room = Room::default();
        room.book(guest());
        room.check_in(1, &guest()).unwrap();
        let before = room.clone();

        let err = room.check_out(1, &guest(), 6, 1, 5).unwrap_err();
        assert!(matches!(err, RoomWriteError::RatingOutOfRange { rating: 6, .. }));
        assert_eq!(room, before);
    }

    #[test]
    fn configure_preserves_lifecycle_state() {
        let mut room = Room::default();
        room.book(guest());
        room.check_in(1, &guest()).unwrap();

        room.configure("Imperial", 20);
        assert!(room.booked);
        assert!(room.occupied);
        assert_eq!(room.customer_booked, Some(guest()));
        assert_eq!(room.tariff, 20);
    }

    #[test]
    fn rebooking_overwrites_holder() {
        let mut room = Room::default();
        room.book(guest());
        let other = AccountId::new("guest-2");
        room.book(other.clone());
        assert_eq!(room.customer_booked, Some(other));
    }
}
