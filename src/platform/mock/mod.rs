//! Mock platform implementations for testing
//!
//! Mock peripherals that record traffic and serve scripted data so the
//! acquisition component can be unit tested without hardware.
//!
//! Available in two contexts: test builds, and when the `mock` feature is
//! enabled (host demos, downstream integration tests).

#![cfg(any(test, feature = "mock"))]

mod i2c;
mod timer;

pub use i2c::{I2cTransaction, MockI2c};
pub use timer::MockTimer;
