//! Adapter implementations for the project store port.

pub mod memory;
pub mod postgres;
