//! Host demonstration of the acquisition component over the simulated
//! receiver.
//!
//! Run with: `cargo run --example acquire --features mock`

use gnss_acquisition::devices::gnss::sim::{PvtSolution, SimulatedUblox};
use gnss_acquisition::devices::gnss::{Config, Gnss};
use gnss_acquisition::devices::traits::ublox::FixType;
use gnss_acquisition::logging::{EventLog, LogLevel};
use gnss_acquisition::platform::mock::{MockI2c, MockTimer};
use gnss_acquisition::platform::traits::{I2cConfig, TimerInterface};

struct StdoutLog;

impl EventLog for StdoutLog {
    fn log(&mut self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => println!("[INFO] {message}"),
            LogLevel::Error => eprintln!("[ERROR] {message}"),
        }
    }
}

fn main() {
    let mut gnss = Gnss::new(SimulatedUblox::new(), MockTimer::new(), StdoutLog);

    if let Err(e) = gnss.begin(MockI2c::new(I2cConfig::default()), Config::default()) {
        eprintln!("Failed to initialize GNSS: {e}");
        return;
    }

    // A short scripted flight: two fixes in the operating region, one
    // implausible outlier, then back on track.
    let track = [
        (550_000_000, 250_000_000, 120_000, 8),
        (550_001_000, 250_002_000, 180_000, 9),
        (480_000_000, 110_000_000, 200_000, 7),
        (550_002_500, 250_004_000, 240_000, 10),
    ];

    for (tick, (lat_e7, lon_e7, height_mm, satellites)) in track.into_iter().enumerate() {
        gnss.driver_mut().queue_solution(PvtSolution {
            fix_type: FixType::Fix3D,
            lat_e7,
            lon_e7,
            height_mm,
            ground_speed_mm_s: 2_000 + tick as i32 * 500,
            heading_e5: 9_000_000,
            satellites,
            pdop_hundredths: 150,
            time_resolved: true,
            time_valid: true,
            time_confirmed: true,
            unix_epoch: 1_750_000_000 + tick as u32,
            year: 2025,
            month: 6,
            day: 15,
            hour: 12,
            minute: 34,
            second: 56 + tick as u8,
            millisecond: 0,
        });
        gnss.timer_mut().delay_ms(50).expect("mock delay");

        if !gnss.read() {
            continue;
        }

        let data = gnss.data();
        println!("--- Position ---");
        println!("valid:        {}", data.position_valid);
        println!("lat/lon:      {:.8}, {:.8}", data.latitude, data.longitude);
        println!("altitude:     {:.3} m", data.altitude);
        println!("ground speed: {:.2} m/s", data.ground_speed);
        println!("heading:      {:.2} deg", data.heading);
        println!("satellites:   {}", data.satellites);
        println!("--- Time ---");
        println!("epoch:        {}", data.epoch_microseconds);
        println!(
            "utc:          {:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03}",
            data.year, data.month, data.day, data.hour, data.minute, data.second, data.millisecond
        );
        println!("--- Accuracy ---");
        println!("fix type:     {:?}", data.fix_type);
        println!("pdop:         {:.2}", data.pdop);
        println!();
    }
}
