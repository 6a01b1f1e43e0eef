//! Application layer orchestrating the payment core.
//!
//! `PaymentService` resolves validation strategies, drives the payment state
//! machine and persists each result through the `PaymentStore` port.

pub mod service;
