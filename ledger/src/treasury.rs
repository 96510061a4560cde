use core_types::types::{AccountId, Amount, RoomNo};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// Payment presented alongside a booking call. The ledger takes custody of
/// the amount only when the booking commits.
#[derive(Clone, Debug)]
pub struct Payment {
    pub payer: AccountId,
    pub amount: Amount,
}

/// One accepted payment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub room_no: RoomNo,
    pub payer: AccountId,
    pub amount: Amount,
    pub accepted_ns: i64,
}

/// The owner's funds custody: a withdrawable balance plus a journal of
/// accepted payments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treasury {
    balance: Amount,
    total_collected: Amount,
    records: Vec<PaymentRecord>,
}

impl Treasury {
    pub fn credit(&mut self, record: PaymentRecord) {
        self.balance += record.amount;
        self.total_collected += record.amount;
        self.records.push(record);
    }

    pub fn withdraw(&mut self, amount: Amount) -> Result<()> {
        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                available: self.balance,
                requested: amount,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Lifetime sum of accepted payments; never decreases.
    pub fn total_collected(&self) -> Amount {
        self.total_collected
    }

    pub fn records(&self) -> &[PaymentRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(amount: Amount) -> PaymentRecord {
        PaymentRecord {
            room_no: 1,
            payer: AccountId::new("guest"),
            amount,
            accepted_ns: 0,
        }
    }

    #[test]
    fn credit_and_withdraw_conserve_totals() {
        let mut treasury = Treasury::default();
        treasury.credit(record(10));
        treasury.credit(record(25));
        assert_eq!(treasury.balance(), 35);
        assert_eq!(treasury.total_collected(), 35);

        treasury.withdraw(20).unwrap();
        assert_eq!(treasury.balance(), 15);
        assert_eq!(treasury.total_collected(), 35);
        assert_eq!(treasury.records().len(), 2);
    }

    #[test]
    fn overdraw_rejected() {
        let mut treasury = Treasury::default();
        treasury.credit(record(10));

        let err = treasury.withdraw(11).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientFunds {
                available: 10,
                requested: 11,
            }
        ));
        assert_eq!(treasury.balance(), 10);
    }
}
