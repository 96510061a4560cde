// Copyright (c) James Kassemi, SC, US. All rights reserved.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Room numbers are positive integers chosen by the owner.
pub type RoomNo = u32;

/// Integer money amount. Tariffs and payments are exact, never fractional.
pub type Amount = u64;

/// Guest rating left at check-out.
pub type Rating = u8;

/// Opaque account identity for owners and customers. The ledger compares
/// identities for equality and never interprets their contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
