//! Domain layer: the payment state machine, its validation rules and the
//! storage port the application layer persists through.

pub mod command;
pub mod payment;
pub mod ports;
pub mod validation;
