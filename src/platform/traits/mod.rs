//! Platform abstraction traits
//!
//! This module defines the peripheral interfaces the acquisition component
//! depends on: the shared two-wire bus and a monotonic clock.

pub mod i2c;
pub mod timer;

// Re-export trait interfaces
pub use i2c::{I2cConfig, I2cInterface};
pub use timer::TimerInterface;
