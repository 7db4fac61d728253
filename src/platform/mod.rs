//! Platform abstraction layer
//!
//! Hardware access goes through the traits in this module so the acquisition
//! component runs identically against real peripherals and the mock
//! implementations used in host tests.

pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{I2cConfig, I2cInterface, TimerInterface};
