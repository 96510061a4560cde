use std::{io, path::PathBuf};

use core_types::types::{AccountId, Amount, Rating, RoomNo};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Room lifecycle violations detected inside a transition.
#[derive(Debug, Error)]
pub enum RoomWriteError {
    #[error("room {room_no} is not booked")]
    NotBooked { room_no: RoomNo },
    #[error("room {room_no} is not occupied")]
    NotOccupied { room_no: RoomNo },
    #[error("caller {caller} is not the booking holder for room {room_no}")]
    NotHolder { room_no: RoomNo, caller: AccountId },
    #[error("rating {rating} outside accepted range {min}..={max}")]
    RatingOutOfRange {
        rating: Rating,
        min: Rating,
        max: Rating,
    },
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("only the owner may perform this action")]
    NotOwner,
    #[error("incorrect payment amount for room {room_no}: expected {expected}, got {offered}")]
    IncorrectPayment {
        room_no: RoomNo,
        expected: Amount,
        offered: Amount,
    },
    #[error("withdrawal of {requested} exceeds available balance {available}")]
    InsufficientFunds {
        available: Amount,
        requested: Amount,
    },
    #[error("room state error: {0}")]
    Room(#[from] RoomWriteError),
    #[error("state snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed state snapshot {path}: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
