//! GNSS acquisition component
//!
//! Configures a u-blox receiver once at startup and turns caller-driven
//! polling ticks into validated [`GnssData`] snapshots. The component owns
//! the acquisition state machine: read-interval throttling, time
//! resolution/confirmation gating, satellite-count and geographic
//! plausibility checks, and normalization of the receiver's integer
//! telemetry into engineering units.
//!
//! Bus transactions, the wire protocol, and presentation of results belong
//! to the collaborators: the receiver driver behind
//! [`UbloxInterface`], the clock behind
//! [`TimerInterface`], and the log sink behind
//! [`EventLog`].
//!
//! # Example
//!
//! ```ignore
//! use gnss_acquisition::devices::gnss::{Config, Gnss};
//!
//! let mut gnss = Gnss::new(driver, timer, log);
//! gnss.begin(bus, Config::default())?;
//!
//! loop {
//!     if gnss.read() {
//!         let data = gnss.data();
//!         // consume data.latitude, data.longitude, ...
//!     }
//! }
//! ```

use core::fmt::{self, Write};

use crate::devices::traits::ublox::{DynamicModel, FixType, OutputProtocol, UbloxInterface};
use crate::logging::EventLog;
use crate::platform::{traits::TimerInterface, PlatformError};

#[cfg(any(test, feature = "mock"))]
pub mod sim;

/// Unix epochs at or below this value are treated as receiver noise
///
/// Some firmware revisions report epochs around 1_500_000_000 before the
/// time solution settles; anything not past April 2024 is discarded.
const EPOCH_SANITY_FLOOR: u32 = 1_713_000_000;

/// More satellites than this are required before a position is considered
const SATELLITE_FLOOR: u8 = 3;

/// Scratch capacity for formatted log messages
const MSG_CAPACITY: usize = 128;

type Msg = heapless::String<MSG_CAPACITY>;

/// Receiver measurement period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasurementRate {
    /// 25 ms (recommended default)
    Ms25,
    /// 50 ms
    Ms50,
    /// 100 ms
    Ms100,
    /// 200 ms
    Ms200,
    /// 500 ms
    Ms500,
    /// 1000 ms
    Ms1000,
}

impl MeasurementRate {
    /// Period in milliseconds
    pub fn millis(&self) -> u16 {
        match self {
            MeasurementRate::Ms25 => 25,
            MeasurementRate::Ms50 => 50,
            MeasurementRate::Ms100 => 100,
            MeasurementRate::Ms200 => 200,
            MeasurementRate::Ms500 => 500,
            MeasurementRate::Ms1000 => 1000,
        }
    }
}

/// Navigation solution update frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavigationRate {
    /// 1 Hz
    Hz1,
    /// 2 Hz
    Hz2,
    /// 4 Hz
    Hz4,
    /// 5 Hz
    Hz5,
    /// 8 Hz (recommended default)
    Hz8,
    /// 10 Hz
    Hz10,
    /// 20 Hz
    Hz20,
    /// 25 Hz
    Hz25,
}

impl NavigationRate {
    /// Frequency in Hz
    pub fn hz(&self) -> u8 {
        match self {
            NavigationRate::Hz1 => 1,
            NavigationRate::Hz2 => 2,
            NavigationRate::Hz4 => 4,
            NavigationRate::Hz5 => 5,
            NavigationRate::Hz8 => 8,
            NavigationRate::Hz10 => 10,
            NavigationRate::Hz20 => 20,
            NavigationRate::Hz25 => 25,
        }
    }
}

/// Geographic plausibility bounds for accepted positions
///
/// Accepted fixes must fall inside this box, edges included. The default
/// covers the expected operating region; move or widen it when deploying
/// elsewhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlausibilityRegion {
    /// Southern edge in degrees
    pub lat_min: f64,
    /// Northern edge in degrees
    pub lat_max: f64,
    /// Western edge in degrees
    pub lon_min: f64,
    /// Eastern edge in degrees
    pub lon_max: f64,
}

impl PlausibilityRegion {
    /// Whether the coordinate lies inside the box, edges included
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.lat_min <= lat && lat <= self.lat_max && self.lon_min <= lon && lon <= self.lon_max
    }
}

impl Default for PlausibilityRegion {
    fn default() -> Self {
        // Default deployment region: north-eastern Europe
        Self {
            lat_min: 50.0,
            lat_max: 60.0,
            lon_min: 15.0,
            lon_max: 35.0,
        }
    }
}

/// Acquisition configuration, applied once by [`Gnss::begin`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Minimum milliseconds between accepted samples
    ///
    /// Should not be below the measurement rate for the throttling to mean
    /// anything; this is not enforced. Raise it if the bus struggles to
    /// keep up.
    pub read_interval_ms: u32,
    /// Receiver measurement period
    pub measurement_rate: MeasurementRate,
    /// Navigation solution update frequency
    pub navigation_rate: NavigationRate,
    /// Dynamic platform model
    pub dynamic_model: DynamicModel,
    /// 7-bit bus address of the receiver (0x42 on stock modules)
    pub address: u8,
    /// Geographic plausibility bounds
    pub region: PlausibilityRegion,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            read_interval_ms: 25,
            measurement_rate: MeasurementRate::Ms25,
            navigation_rate: NavigationRate::Hz8,
            dynamic_model: DynamicModel::Airborne2g,
            address: 0x42,
            region: PlausibilityRegion::default(),
        }
    }
}

/// Validated telemetry snapshot
///
/// Created zeroed and overwritten field-by-field by successful reads.
/// Fields are never reset: a rejected read leaves the previous values in
/// place, so `position_valid` and the time flags gate how much of the
/// snapshot can be trusted, and stale values persist until a newer valid
/// read overwrites them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GnssData {
    /// At least one position has passed all validity gates
    pub position_valid: bool,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Altitude above mean sea level in meters
    pub altitude: f32,
    /// Ground speed in meters per second
    pub ground_speed: f32,
    /// Heading of motion in degrees
    pub heading: f32,
    /// Satellites used in the accepted solution
    pub satellites: u8,

    /// UTC time has been fully resolved (latched)
    pub time_resolved: bool,
    /// Date and time of day are valid (latched)
    pub time_valid: bool,
    /// UTC time of day has been confirmed (latched)
    pub time_confirmed: bool,
    /// Unix time as reported by the receiver
    ///
    /// The value is whole seconds. The field keeps its historical name; it
    /// has never carried microseconds and is stored unscaled.
    pub epoch_microseconds: u32,
    /// Calendar year (UTC)
    pub year: u16,
    /// Month of year (UTC)
    pub month: u8,
    /// Day of month (UTC)
    pub day: u8,
    /// Hour of day (UTC)
    pub hour: u8,
    /// Minute of hour (UTC)
    pub minute: u8,
    /// Second of minute (UTC)
    pub second: u8,
    /// Millisecond of second (UTC)
    pub millisecond: u16,

    /// Fix type of the most recent solution, recorded unconditionally
    pub fix_type: FixType,
    /// Positional dilution of precision (lower is better)
    pub pdop: f32,
}

/// Outcome of one position extraction pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionOutcome {
    /// Position passed all gates and the snapshot was updated
    Accepted,
    /// Too few satellites; skipped without a message
    SilentlySkipped,
    /// Enough satellites but outside the plausibility region; logged
    RejectedOutOfBounds,
}

/// Configuration step identity for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigStep {
    /// Restrict the bus port output to UBX
    OutputProtocol,
    /// Set the measurement period
    MeasurementRate,
    /// Set the navigation solution frequency
    NavigationRate,
    /// Select the dynamic platform model
    DynamicModel,
    /// Enable automatic solution push
    AutoPvt,
    /// Persist the configuration
    SaveConfiguration,
}

/// Errors reported by [`Gnss::begin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GnssError {
    /// The driver failed to attach to the receiver
    Begin(PlatformError),
    /// A configuration step failed; earlier steps had already been applied
    Config {
        step: ConfigStep,
        source: PlatformError,
    },
}

impl fmt::Display for GnssError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GnssError::Begin(source) => write!(f, "GNSS begin failed: {}", source),
            GnssError::Config { step, source } => {
                write!(f, "GNSS configuration step {:?} failed: {}", step, source)
            }
        }
    }
}

/// GNSS acquisition component
///
/// Generic over the receiver driver, the monotonic clock, and the log sink
/// so the whole state machine runs unchanged against hardware or the
/// simulated receiver. One instance owns its snapshot and rate-limit state
/// exclusively; all calls are synchronous on the caller's tick.
pub struct Gnss<D: UbloxInterface, T: TimerInterface, L: EventLog> {
    driver: D,
    timer: T,
    log: L,
    initialized: bool,
    read_interval_ms: u32,
    region: PlausibilityRegion,
    last_measurement_ms: u64,
    data: GnssData,
}

impl<D: UbloxInterface, T: TimerInterface, L: EventLog> Gnss<D, T, L> {
    /// Create an unstarted component; call [`begin`](Self::begin) next
    pub fn new(driver: D, timer: T, log: L) -> Self {
        Self {
            driver,
            timer,
            log,
            initialized: false,
            read_interval_ms: 0,
            region: PlausibilityRegion::default(),
            last_measurement_ms: 0,
            data: GnssData::default(),
        }
    }

    /// Latest telemetry snapshot
    pub fn data(&self) -> &GnssData {
        &self.data
    }

    /// Whether [`begin`](Self::begin) has completed successfully
    pub fn initialized(&self) -> bool {
        self.initialized
    }

    /// Shared access to the driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable access to the driver, for simulated-receiver scripting
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Mutable access to the clock, for simulated-time advancement
    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// The injected log sink
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Mutable access to the log sink
    pub fn log_mut(&mut self) -> &mut L {
        &mut self.log
    }

    /// Start the receiver and apply the one-time configuration
    ///
    /// Hands the bus and the configured address to the driver, then runs
    /// the ordered configuration sequence. Any failure leaves the component
    /// uninitialized and is reported through the error channel; whether to
    /// halt on that is the caller's policy.
    ///
    /// # Errors
    ///
    /// [`GnssError::Begin`] when the address is not 7-bit or the receiver
    /// does not respond, [`GnssError::Config`] when a configuration step
    /// fails.
    pub fn begin(&mut self, bus: D::Bus, config: Config) -> Result<(), GnssError> {
        self.read_interval_ms = config.read_interval_ms;
        self.region = config.region;

        if config.address > 0x7F {
            let mut msg = Msg::new();
            let _ = write!(
                msg,
                "GNSS: address {:#04x} is not a 7-bit address",
                config.address
            );
            self.log.error(msg.as_str());
            return Err(GnssError::Begin(PlatformError::InvalidConfig));
        }

        if let Err(source) = self.driver.begin(bus, config.address) {
            self.log.error("GNSS: receiver did not respond on the bus");
            return Err(GnssError::Begin(source));
        }

        self.configure(&config)?;

        self.log.info("GNSS: initialized");
        self.initialized = true;
        Ok(())
    }

    /// Apply the ordered device configuration
    ///
    /// Steps run in a fixed order; the first failure short-circuits the
    /// rest.
    fn configure(&mut self, config: &Config) -> Result<(), GnssError> {
        if let Err(source) = self.driver.set_output_protocol(OutputProtocol::Ubx) {
            self.log.error("GNSS: failed to restrict output to UBX");
            return Err(GnssError::Config {
                step: ConfigStep::OutputProtocol,
                source,
            });
        }

        let rate_ms = config.measurement_rate.millis();
        if let Err(source) = self.driver.set_measurement_rate(rate_ms) {
            let mut msg = Msg::new();
            let _ = write!(msg, "GNSS: failed to set measurement rate to {} ms", rate_ms);
            self.log.error(msg.as_str());
            return Err(GnssError::Config {
                step: ConfigStep::MeasurementRate,
                source,
            });
        }

        let nav_hz = config.navigation_rate.hz();
        if let Err(source) = self.driver.set_navigation_frequency(nav_hz) {
            let mut msg = Msg::new();
            let _ = write!(msg, "GNSS: failed to set navigation rate to {} Hz", nav_hz);
            self.log.error(msg.as_str());
            return Err(GnssError::Config {
                step: ConfigStep::NavigationRate,
                source,
            });
        }

        if let Err(source) = self.driver.set_dynamic_model(config.dynamic_model) {
            let mut msg = Msg::new();
            let _ = write!(
                msg,
                "GNSS: failed to set dynamic model {}",
                config.dynamic_model.value()
            );
            self.log.error(msg.as_str());
            return Err(GnssError::Config {
                step: ConfigStep::DynamicModel,
                source,
            });
        }

        if let Err(source) = self.driver.set_auto_pvt(true) {
            self.log.error("GNSS: failed to enable automatic PVT push");
            return Err(GnssError::Config {
                step: ConfigStep::AutoPvt,
                source,
            });
        }

        if let Err(source) = self.driver.save_configuration() {
            self.log.error("GNSS: failed to persist configuration");
            return Err(GnssError::Config {
                step: ConfigStep::SaveConfiguration,
                source,
            });
        }

        Ok(())
    }

    /// Poll for one sample
    ///
    /// Returns whether a fresh solution passed all acquisition gates this
    /// call; results land in [`data`](Self::data). Gates run in order: the
    /// component must be initialized, the driver must have a fresh solution
    /// (polling also transfers the native buffer), and the read interval
    /// must have elapsed since the last accepted pass. Once the gates pass,
    /// time and position extraction both run and the call reports `true`
    /// regardless of how much either of them accepted.
    pub fn read(&mut self) -> bool {
        if !self.initialized {
            return false;
        }

        match self.driver.poll_pvt() {
            Ok(true) => {}
            Ok(false) => return false,
            Err(_) => {
                self.log.error("GNSS: PVT transfer failed");
                return false;
            }
        }

        let now_ms = self.timer.now_ms();
        if now_ms.wrapping_sub(self.last_measurement_ms) < u64::from(self.read_interval_ms) {
            return false;
        }
        self.last_measurement_ms = now_ms;

        let _ = self.read_time();
        let _ = self.read_position();

        true
    }

    /// Extract and gate the time fields
    ///
    /// The resolved/valid/confirmed flags are latched: merged with OR so an
    /// observed `true` survives later `false` reports. That matches the
    /// receiver's settling behavior but means the flags never signal a time
    /// solution getting worse.
    fn read_time(&mut self) -> bool {
        self.data.time_resolved |= self.driver.time_fully_resolved();
        self.data.time_valid |= self.driver.time_valid();
        self.data.time_confirmed |= self.driver.time_confirmed();

        let epoch = self.driver.unix_epoch();

        // Epochs at or below the floor fall in the known bogus-default range.
        if epoch > EPOCH_SANITY_FLOOR && self.data.time_valid && self.data.time_confirmed {
            self.data.epoch_microseconds = epoch;
            self.data.year = self.driver.year();
            self.data.month = self.driver.month();
            self.data.day = self.driver.day();
            self.data.hour = self.driver.hour();
            self.data.minute = self.driver.minute();
            self.data.second = self.driver.second();
            self.data.millisecond = self.driver.millisecond();
            return true;
        }
        false
    }

    /// Extract, gate, and normalize the position fields
    ///
    /// The fix type is recorded unconditionally. Everything else updates
    /// only when enough satellites contribute and the coordinate lies
    /// inside the plausibility region; the two rejection paths differ on
    /// purpose (low satellite count stays silent, an implausible coordinate
    /// is surfaced with the rejected values).
    fn read_position(&mut self) -> PositionOutcome {
        self.data.fix_type = self.driver.fix_type();

        let lat = f64::from(self.driver.latitude_e7()) / 10_000_000.0;
        let lon = f64::from(self.driver.longitude_e7()) / 10_000_000.0;
        let altitude = self.driver.height_mm() as f32 / 1000.0;
        let satellites = self.driver.satellites_in_view();

        if satellites <= SATELLITE_FLOOR {
            return PositionOutcome::SilentlySkipped;
        }

        if !self.region.contains(lat, lon) {
            let mut msg = Msg::new();
            let _ = write!(
                msg,
                "GNSS: position rejected: {:.8} | {:.8} | {:.2} | {}",
                lat, lon, altitude, satellites
            );
            self.log.info(msg.as_str());
            return PositionOutcome::RejectedOutOfBounds;
        }

        self.data.position_valid = true;
        self.data.latitude = lat;
        self.data.longitude = lon;
        self.data.altitude = altitude;
        self.data.satellites = satellites;
        self.data.ground_speed = self.driver.ground_speed_mm_s() as f32 / 1000.0;
        self.data.heading = self.driver.heading_e5() as f32 / 100_000.0;
        self.data.pdop = f32::from(self.driver.pdop()) / 100.0;

        PositionOutcome::Accepted
    }
}
