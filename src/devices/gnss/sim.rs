//! Simulated u-blox receiver
//!
//! Implements [`UbloxInterface`] over scripted solutions so the acquisition
//! state machine can be exercised deterministically on the host, without
//! hardware or protocol handling. Configuration commands are recorded for
//! verification, and individual operations can be told to fail.

use crate::devices::gnss::ConfigStep;
use crate::devices::traits::ublox::{DynamicModel, FixType, OutputProtocol, UbloxInterface};
use crate::platform::{error::I2cError, mock::MockI2c, I2cInterface, PlatformError, Result};
use heapless::Vec;

/// Configuration commands retained by the recorder
const CONFIG_LOG_SIZE: usize = 16;

/// One scripted navigation solution in receiver-native scaling
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PvtSolution {
    /// Fix type
    pub fix_type: FixType,
    /// Latitude in 1e-7 degrees
    pub lat_e7: i32,
    /// Longitude in 1e-7 degrees
    pub lon_e7: i32,
    /// Height above mean sea level in millimeters
    pub height_mm: i32,
    /// Ground speed in millimeters per second
    pub ground_speed_mm_s: i32,
    /// Heading in 1e-5 degrees
    pub heading_e5: i32,
    /// Satellites used in the solution
    pub satellites: u8,
    /// PDOP in hundredths
    pub pdop_hundredths: u16,
    /// UTC time fully resolved
    pub time_resolved: bool,
    /// Date and time valid
    pub time_valid: bool,
    /// UTC time confirmed
    pub time_confirmed: bool,
    /// Unix time in seconds
    pub unix_epoch: u32,
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
}

/// Configuration operation observed by the simulated receiver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigOp {
    /// Output protocol selection
    OutputProtocol(OutputProtocol),
    /// Measurement period in milliseconds
    MeasurementRate(u16),
    /// Navigation frequency in Hz
    NavigationFrequency(u8),
    /// Dynamic platform model
    DynamicModel(DynamicModel),
    /// Automatic PVT push
    AutoPvt(bool),
    /// Configuration persisted
    SaveConfiguration,
}

/// Scripted receiver for host tests
///
/// Serves queued solutions one `poll_pvt` at a time and keeps the last
/// served solution as its buffered state, the way a hardware driver keeps
/// the last transferred PVT frame.
#[derive(Debug, Default)]
pub struct SimulatedUblox {
    bus: Option<MockI2c>,
    address: u8,
    config_log: Vec<ConfigOp, CONFIG_LOG_SIZE>,
    fail_step: Option<ConfigStep>,
    fail_pvt: bool,
    pending: Option<PvtSolution>,
    current: PvtSolution,
}

impl SimulatedUblox {
    /// Create a detached simulated receiver
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next solution served by `poll_pvt`
    pub fn queue_solution(&mut self, solution: PvtSolution) {
        self.pending = Some(solution);
    }

    /// Configuration commands observed so far, in order
    pub fn config_log(&self) -> &[ConfigOp] {
        &self.config_log
    }

    /// Address the driver was attached with
    pub fn address(&self) -> u8 {
        self.address
    }

    /// The bus taken over at attach time, for transaction inspection
    pub fn bus(&self) -> Option<&MockI2c> {
        self.bus.as_ref()
    }

    /// Make the given configuration step fail with a NACK
    pub fn fail_step(&mut self, step: ConfigStep) {
        self.fail_step = Some(step);
    }

    /// Make `poll_pvt` fail with a bus error
    pub fn fail_pvt(&mut self, fail: bool) {
        self.fail_pvt = fail;
    }

    fn apply(&mut self, step: ConfigStep, op: ConfigOp) -> Result<()> {
        if self.fail_step == Some(step) {
            return Err(PlatformError::I2c(I2cError::Nack));
        }
        let _ = self.config_log.push(op);
        Ok(())
    }
}

impl UbloxInterface for SimulatedUblox {
    type Bus = MockI2c;

    fn begin(&mut self, mut bus: MockI2c, address: u8) -> Result<()> {
        // Presence probe, the same shape a hardware driver opens with
        let mut probe = [0u8; 1];
        bus.read(address, &mut probe)?;
        self.address = address;
        self.bus = Some(bus);
        Ok(())
    }

    fn set_output_protocol(&mut self, protocol: OutputProtocol) -> Result<()> {
        self.apply(
            ConfigStep::OutputProtocol,
            ConfigOp::OutputProtocol(protocol),
        )
    }

    fn set_measurement_rate(&mut self, millis: u16) -> Result<()> {
        self.apply(
            ConfigStep::MeasurementRate,
            ConfigOp::MeasurementRate(millis),
        )
    }

    fn set_navigation_frequency(&mut self, hz: u8) -> Result<()> {
        self.apply(
            ConfigStep::NavigationRate,
            ConfigOp::NavigationFrequency(hz),
        )
    }

    fn set_dynamic_model(&mut self, model: DynamicModel) -> Result<()> {
        self.apply(ConfigStep::DynamicModel, ConfigOp::DynamicModel(model))
    }

    fn set_auto_pvt(&mut self, enabled: bool) -> Result<()> {
        self.apply(ConfigStep::AutoPvt, ConfigOp::AutoPvt(enabled))
    }

    fn save_configuration(&mut self) -> Result<()> {
        self.apply(ConfigStep::SaveConfiguration, ConfigOp::SaveConfiguration)
    }

    fn poll_pvt(&mut self) -> Result<bool> {
        if self.fail_pvt {
            return Err(PlatformError::I2c(I2cError::BusError));
        }
        match self.pending.take() {
            Some(solution) => {
                self.current = solution;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn fix_type(&self) -> FixType {
        self.current.fix_type
    }

    fn latitude_e7(&self) -> i32 {
        self.current.lat_e7
    }

    fn longitude_e7(&self) -> i32 {
        self.current.lon_e7
    }

    fn height_mm(&self) -> i32 {
        self.current.height_mm
    }

    fn ground_speed_mm_s(&self) -> i32 {
        self.current.ground_speed_mm_s
    }

    fn heading_e5(&self) -> i32 {
        self.current.heading_e5
    }

    fn satellites_in_view(&self) -> u8 {
        self.current.satellites
    }

    fn pdop(&self) -> u16 {
        self.current.pdop_hundredths
    }

    fn time_fully_resolved(&self) -> bool {
        self.current.time_resolved
    }

    fn time_valid(&self) -> bool {
        self.current.time_valid
    }

    fn time_confirmed(&self) -> bool {
        self.current.time_confirmed
    }

    fn unix_epoch(&self) -> u32 {
        self.current.unix_epoch
    }

    fn year(&self) -> u16 {
        self.current.year
    }

    fn month(&self) -> u8 {
        self.current.month
    }

    fn day(&self) -> u8 {
        self.current.day
    }

    fn hour(&self) -> u8 {
        self.current.hour
    }

    fn minute(&self) -> u8 {
        self.current.minute
    }

    fn second(&self) -> u8 {
        self.current.second
    }

    fn millisecond(&self) -> u16 {
        self.current.millisecond
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::traits::I2cConfig;

    #[test]
    fn test_sim_begin_records_address_and_probes_bus() {
        let mut sim = SimulatedUblox::new();
        sim.begin(MockI2c::new(I2cConfig::default()), 0x42).unwrap();
        assert_eq!(sim.address(), 0x42);

        // Attach opens with a one-byte presence probe
        let bus = sim.bus().expect("bus attached");
        assert_eq!(
            bus.transactions(),
            &[crate::platform::mock::I2cTransaction::Read { addr: 0x42, len: 1 }]
        );
    }

    #[test]
    fn test_sim_begin_propagates_bus_failure() {
        let mut sim = SimulatedUblox::new();
        let mut bus = MockI2c::new(I2cConfig::default());
        bus.set_nack(true);
        assert_eq!(
            sim.begin(bus, 0x42),
            Err(PlatformError::I2c(I2cError::Nack))
        );
    }

    #[test]
    fn test_sim_poll_consumes_queued_solution() {
        let mut sim = SimulatedUblox::new();
        assert_eq!(sim.poll_pvt(), Ok(false));

        sim.queue_solution(PvtSolution {
            satellites: 7,
            ..PvtSolution::default()
        });
        assert_eq!(sim.poll_pvt(), Ok(true));
        assert_eq!(sim.satellites_in_view(), 7);

        // The queue is depth one; the solution stays buffered afterwards
        assert_eq!(sim.poll_pvt(), Ok(false));
        assert_eq!(sim.satellites_in_view(), 7);
    }

    #[test]
    fn test_sim_records_configuration_commands() {
        let mut sim = SimulatedUblox::new();
        sim.set_output_protocol(OutputProtocol::Ubx).unwrap();
        sim.set_auto_pvt(true).unwrap();

        assert_eq!(
            sim.config_log(),
            &[
                ConfigOp::OutputProtocol(OutputProtocol::Ubx),
                ConfigOp::AutoPvt(true),
            ]
        );
    }

    #[test]
    fn test_sim_fails_only_the_selected_step() {
        let mut sim = SimulatedUblox::new();
        sim.fail_step(ConfigStep::DynamicModel);

        assert!(sim.set_measurement_rate(25).is_ok());
        assert_eq!(
            sim.set_dynamic_model(DynamicModel::Airborne2g),
            Err(PlatformError::I2c(I2cError::Nack))
        );
        assert!(sim.save_configuration().is_ok());
    }

    #[test]
    fn test_sim_pvt_failure_injection() {
        let mut sim = SimulatedUblox::new();
        sim.queue_solution(PvtSolution::default());
        sim.fail_pvt(true);
        assert_eq!(sim.poll_pvt(), Err(PlatformError::I2c(I2cError::BusError)));

        // Recovering clears nothing: the queued solution is still pending
        sim.fail_pvt(false);
        assert_eq!(sim.poll_pvt(), Ok(true));
    }
}
