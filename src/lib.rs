//! Payment lifecycle core.
//!
//! - [`domain::payment`]: the payment record and its state machine
//! - [`domain::validation`]: per-method rules gating `Registered -> Paid`
//! - [`application::service`]: orchestration over a [`domain::ports::PaymentStore`]
//! - [`infrastructure`]: in-memory, JSON file and RocksDB stores
//! - [`interfaces::csv`]: command input and snapshot output

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
pub mod logging;
