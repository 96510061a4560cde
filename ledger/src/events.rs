use core_types::types::{AccountId, Rating, RoomNo};
use tokio::sync::broadcast;

/// Notification emitted after a lifecycle transition commits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerEvent {
    RoomBooked {
        room_no: RoomNo,
        customer: AccountId,
        ts_ns: i64,
    },
    CheckedIn {
        room_no: RoomNo,
        customer: AccountId,
        ts_ns: i64,
    },
    CheckedOut {
        room_no: RoomNo,
        customer: AccountId,
        rating: Rating,
        ts_ns: i64,
    },
}

/// Fan-out channel for ledger notifications.
pub struct EventBus {
    tx: broadcast::Sender<LedgerEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.tx.subscribe()
    }

    /// An event with no subscribers is dropped; emission never fails the
    /// originating operation.
    pub fn emit(&self, event: LedgerEvent) {
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_reaches_every_subscriber() {
        let bus = EventBus::new(8);
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        let event = LedgerEvent::RoomBooked {
            room_no: 1,
            customer: AccountId::new("guest"),
            ts_ns: 7,
        };
        bus.emit(event.clone());

        assert_eq!(first.try_recv().unwrap(), event);
        assert_eq!(second.try_recv().unwrap(), event);
        assert!(first.try_recv().is_err());
    }

    #[test]
    fn emit_without_subscribers_is_dropped() {
        let bus = EventBus::new(8);
        bus.emit(LedgerEvent::CheckedIn {
            room_no: 2,
            customer: AccountId::new("guest"),
            ts_ns: 0,
        });
    }
}
