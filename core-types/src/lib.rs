// Copyright (c) James Kassemi, SC, US. All rights reserved.

//! Shared identity, scalar, and configuration types for the booking ledger.

pub mod config;
pub mod types;
