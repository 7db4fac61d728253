//! Device trait definitions

pub mod ublox;

pub use ublox::{DynamicModel, FixType, OutputProtocol, UbloxInterface};
