//! CSV adapters: commands in, payment snapshot out.

pub mod command_reader;
pub mod payment_writer;
