//! I2C interface trait
//!
//! The GNSS receiver hangs off a shared two-wire bus; this trait is the
//! contract a platform must provide for that bus. The acquisition component
//! itself only hands the bus to the receiver driver; all transactions are
//! issued by the driver.

use crate::platform::Result;

/// I2C configuration
#[derive(Debug, Clone, Copy)]
pub struct I2cConfig {
    /// Bus frequency in Hz (typically 100_000 or 400_000)
    pub frequency: u32,
    /// Timeout in microseconds
    pub timeout_us: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000,    // 100 kHz standard mode
            timeout_us: 1_000_000, // 1 second
        }
    }
}

/// I2C interface trait
///
/// # Invariants
///
/// - The peripheral must be initialized before use
/// - One owner per bus instance; no concurrent access from multiple contexts
/// - Addresses are 7-bit (valid range: 0x00..=0x7F)
pub trait I2cInterface {
    /// Write data to a device
    ///
    /// Performs a complete transaction: START - ADDR(W) - DATA - STOP.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c` if the device does not acknowledge, a
    /// bus error occurs, or the timeout expires.
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()>;

    /// Read data from a device
    ///
    /// Performs a complete transaction: START - ADDR(R) - DATA - STOP.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c` if the device does not acknowledge, a
    /// bus error occurs, or the timeout expires.
    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()>;

    /// Write then read with a repeated START
    ///
    /// START - ADDR(W) - WRITE_DATA - REPEATED_START - ADDR(R) - READ_DATA -
    /// STOP. This is the shape register reads take on u-blox receivers
    /// (write the register address, read back its contents).
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c` if the device does not acknowledge, a
    /// bus error occurs, or the timeout expires.
    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()>;
}
