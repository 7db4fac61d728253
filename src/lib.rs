#![cfg_attr(not(test), no_std)]

//! GNSS receiver acquisition for embedded flight computers
//!
//! This library configures a u-blox GNSS receiver over a shared I2C bus and
//! polls it at a bounded rate, publishing validated position/velocity/time
//! snapshots. Bus management, the wire protocol, and result presentation stay
//! with the surrounding system; this crate owns the acquisition and
//! validation state machine.

// Platform abstraction layer (bus and clock collaborators)
pub mod platform;

// Device driver contract and the acquisition component
pub mod devices;

// Injected logging capability
pub mod logging;
