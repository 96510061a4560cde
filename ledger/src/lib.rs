//! Room booking ledger for a single-property hotel.
//!
//! The crate exposes:
//! - [`LedgerController`]: high-level API orchestrating room lifecycle,
//!   funds custody, and notifications.
//! - [`RoomLedger`]: the owner-governed room registry.
//! - [`Treasury`]: the owner's withdrawable balance and payment journal.

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod ledger;
pub mod room;
pub mod storage;
pub mod treasury;

pub use config::LedgerConfig;
pub use controller::{BookingReceipt, LedgerController, RoomStatusCounts};
pub use error::{LedgerError, Result, RoomWriteError, SnapshotError};
pub use events::{EventBus, LedgerEvent};
pub use ledger::RoomLedger;
pub use room::{Room, RoomStatus};
pub use storage::StateSnapshot;
pub use treasury::{Payment, PaymentRecord, Treasury};
