//! u-blox GNSS receiver driver contract
//!
//! The acquisition component treats the receiver driver as a black box
//! behind this trait: configuration commands, solution polling, and
//! accessors over the most recent navigation solution. Implementations own
//! the register/protocol handling; a simulated implementation lives in
//! `devices::gnss::sim` for host testing.
//!
//! # References
//!
//! - [u-blox M8 Receiver Description (UBX-13003221)](https://content.u-blox.com/sites/default/files/products/documents/u-blox8-M8_ReceiverDescrProtSpec_UBX-13003221.pdf)

use crate::platform::{traits::I2cInterface, Result};

/// Output protocols selectable on the receiver's bus port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputProtocol {
    /// UBX binary only
    Ubx,
    /// NMEA text only
    Nmea,
    /// UBX and NMEA together
    UbxNmea,
}

impl OutputProtocol {
    /// Protocol mask as used by UBX-CFG-PRT (UBX = bit 0, NMEA = bit 1)
    pub fn mask(&self) -> u8 {
        match self {
            OutputProtocol::Ubx => 0x01,
            OutputProtocol::Nmea => 0x02,
            OutputProtocol::UbxNmea => 0x03,
        }
    }
}

/// Dynamic platform model (UBX-CFG-NAV5 dynModel)
///
/// Tunes the receiver's internal filtering to the expected vehicle dynamics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DynamicModel {
    /// Portable (receiver default)
    Portable,
    /// Stationary installation
    Stationary,
    /// Pedestrian motion
    Pedestrian,
    /// Road vehicle
    Automotive,
    /// Marine, low vertical dynamics
    Sea,
    /// Airborne, under 1 g acceleration
    Airborne1g,
    /// Airborne, under 2 g acceleration
    Airborne2g,
    /// Airborne, under 4 g acceleration
    Airborne4g,
    /// Wrist-worn, arm-swing filtering
    Wrist,
}

impl DynamicModel {
    /// Wire value as used by UBX-CFG-NAV5
    pub fn value(&self) -> u8 {
        match self {
            DynamicModel::Portable => 0,
            DynamicModel::Stationary => 2,
            DynamicModel::Pedestrian => 3,
            DynamicModel::Automotive => 4,
            DynamicModel::Sea => 5,
            DynamicModel::Airborne1g => 6,
            DynamicModel::Airborne2g => 7,
            DynamicModel::Airborne4g => 8,
            DynamicModel::Wrist => 9,
        }
    }
}

/// GNSS fix type reported with each navigation solution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FixType {
    /// No fix
    #[default]
    NoFix,
    /// 2D fix (latitude, longitude only)
    Fix2D,
    /// 3D fix (latitude, longitude, altitude)
    Fix3D,
    /// Combined GNSS and dead-reckoning fix
    Gnss,
    /// Time-only fix
    TimeOnly,
}

/// u-blox receiver driver interface
///
/// # Contract
///
/// - [`begin`](UbloxInterface::begin) must complete before any other
///   operation.
/// - [`poll_pvt`](UbloxInterface::poll_pvt) transfers the newest navigation
///   solution into the driver's buffer when one is pending; every accessor
///   afterwards reads that buffer without touching the bus.
/// - Accessors return raw integer telemetry in the receiver's native
///   scaling; the acquisition component performs unit normalization.
pub trait UbloxInterface {
    /// Bus type the driver runs on
    type Bus: I2cInterface;

    /// Attach to the receiver on the given bus and 7-bit address
    ///
    /// Takes ownership of the bus handle; the driver is its only user from
    /// here on.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c` if the receiver does not respond.
    fn begin(&mut self, bus: Self::Bus, address: u8) -> Result<()>;

    /// Restrict the bus port's output to the given protocol(s)
    fn set_output_protocol(&mut self, protocol: OutputProtocol) -> Result<()>;

    /// Set the measurement period in milliseconds
    fn set_measurement_rate(&mut self, millis: u16) -> Result<()>;

    /// Set the navigation solution frequency in Hz
    fn set_navigation_frequency(&mut self, hz: u8) -> Result<()>;

    /// Select the dynamic platform model
    fn set_dynamic_model(&mut self, model: DynamicModel) -> Result<()>;

    /// Enable or disable automatic pushing of navigation solutions
    ///
    /// With automatic push enabled, polling does not need to request each
    /// solution explicitly.
    fn set_auto_pvt(&mut self, enabled: bool) -> Result<()>;

    /// Persist the running configuration to the receiver's non-volatile store
    fn save_configuration(&mut self) -> Result<()>;

    /// Poll for a fresh navigation solution
    ///
    /// Returns `Ok(true)` when a new solution was transferred into the
    /// driver buffer, `Ok(false)` when nothing new is pending. Note the
    /// side effect: a `true` answer means the buffer now holds the new
    /// solution.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c` if the transfer fails.
    fn poll_pvt(&mut self) -> Result<bool>;

    /// Fix type of the buffered solution
    fn fix_type(&self) -> FixType;

    /// Latitude in 1e-7 degrees
    fn latitude_e7(&self) -> i32;

    /// Longitude in 1e-7 degrees
    fn longitude_e7(&self) -> i32;

    /// Height above mean sea level in millimeters
    fn height_mm(&self) -> i32;

    /// Ground speed in millimeters per second
    fn ground_speed_mm_s(&self) -> i32;

    /// Heading of motion in 1e-5 degrees
    fn heading_e5(&self) -> i32;

    /// Number of satellites used in the solution
    fn satellites_in_view(&self) -> u8;

    /// Positional dilution of precision in hundredths
    fn pdop(&self) -> u16;

    /// Whether UTC time is fully resolved
    fn time_fully_resolved(&self) -> bool;

    /// Whether date and time of day are valid
    fn time_valid(&self) -> bool;

    /// Whether UTC time of day has been confirmed
    fn time_confirmed(&self) -> bool;

    /// Unix time in seconds
    fn unix_epoch(&self) -> u32;

    /// Calendar year (UTC)
    fn year(&self) -> u16;

    /// Month of year, 1..=12 (UTC)
    fn month(&self) -> u8;

    /// Day of month, 1..=31 (UTC)
    fn day(&self) -> u8;

    /// Hour of day, 0..=23 (UTC)
    fn hour(&self) -> u8;

    /// Minute of hour (UTC)
    fn minute(&self) -> u8;

    /// Second of minute (UTC)
    fn second(&self) -> u8;

    /// Millisecond of second (UTC)
    fn millisecond(&self) -> u16;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_protocol_masks() {
        assert_eq!(OutputProtocol::Ubx.mask(), 0x01);
        assert_eq!(OutputProtocol::Nmea.mask(), 0x02);
        assert_eq!(OutputProtocol::UbxNmea.mask(), 0x03);
    }

    #[test]
    fn test_dynamic_model_wire_values() {
        // dynModel 1 is reserved; the enum skips it
        assert_eq!(DynamicModel::Portable.value(), 0);
        assert_eq!(DynamicModel::Stationary.value(), 2);
        assert_eq!(DynamicModel::Airborne2g.value(), 7);
        assert_eq!(DynamicModel::Wrist.value(), 9);
    }

    #[test]
    fn test_fix_type_defaults_to_no_fix() {
        assert_eq!(FixType::default(), FixType::NoFix);
    }
}
