//! Error Types for the Control Engine
//!
//! ## Design Philosophy
//!
//! The error system follows the same constraints as the rest of the core:
//!
//! 1. **Small Size**: Every variant carries only inline scalar data, so the
//!    enum stays a handful of bytes and is cheap to return from the tick path.
//!
//! 2. **No Heap Allocation**: No `String` payloads - parameter names are
//!    `&'static str`, channel numbers are plain integers. Memory usage is
//!    deterministic on `no_std` targets.
//!
//! 3. **Copy Semantics**: Errors implement `Copy` so they can be returned,
//!    logged, and stored without move-semantics friction.
//!
//! ## Error Categories
//!
//! ### Configuration (fatal at startup)
//! - `InvalidConfiguration`: a config parameter fails validation; the control
//!   loop never starts.
//!
//! ### Sensing (fatal for the current tick)
//! - `SensorUnavailable`: the probe channel cannot be read (not configured,
//!   open circuit, ADC failure). Never substituted with a stale or default
//!   value - the caller decides whether to retry or abort.
//! - `InvalidReading`: the sensor produced a non-finite value. The sample is
//!   discarded before it can reach the history.
//!
//! ### Contract misuse (programmer errors)
//! - `InvalidSpeed`: a speed level outside the defined set was requested.
//!   Signalled immediately, never silently clamped.
//! - `InvalidProbeIndex` / `ProbeRoleTaken`: probe registry misuse.

use thiserror_no_std::Error;

/// Result type for control operations
pub type ControlResult<T> = Result<T, ControlError>;

/// Control errors - kept small and `Copy` for the tick path
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ControlError {
    /// A configuration parameter failed validation at construction time
    #[error("Invalid configuration: {parameter} = {value}")]
    InvalidConfiguration {
        /// Name of the offending parameter
        parameter: &'static str,
        /// The rejected value
        value: f32,
    },

    /// The temperature channel could not be read
    #[error("Sensor on channel {channel} is unavailable")]
    SensorUnavailable {
        /// Probe channel number
        channel: u8,
    },

    /// The sensor produced a value that is not a finite number
    #[error("Invalid reading: not a finite temperature")]
    InvalidReading {
        /// The rejected sample
        value: f32,
    },

    /// A fan speed outside the defined set was requested
    #[error("Speed level {level} is invalid, valid levels are 0 through 3")]
    InvalidSpeed {
        /// The rejected speed level
        level: u8,
    },

    /// A probe channel outside the bank was addressed
    #[error("Probe index {index} is invalid, valid channels are 0 through {max}")]
    InvalidProbeIndex {
        /// The rejected channel number
        index: u8,
        /// Highest valid channel number
        max: u8,
    },

    /// The probe is already designated for the other role
    #[error("Probe {index} is already in use for another role")]
    ProbeRoleTaken {
        /// Channel of the conflicting probe
        index: u8,
    },
}

impl From<core::convert::Infallible> for ControlError {
    fn from(e: core::convert::Infallible) -> Self {
        match e {}
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ControlError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidConfiguration { parameter, value } => {
                defmt::write!(fmt, "Invalid configuration: {} = {}", parameter, value)
            }
            Self::SensorUnavailable { channel } => {
                defmt::write!(fmt, "Sensor on channel {} unavailable", channel)
            }
            Self::InvalidReading { value } => {
                defmt::write!(fmt, "Invalid reading: {}", value)
            }
            Self::InvalidSpeed { level } => {
                defmt::write!(fmt, "Invalid speed level {}", level)
            }
            Self::InvalidProbeIndex { index, max } => {
                defmt::write!(fmt, "Probe index {} invalid (max {})", index, max)
            }
            Self::ProbeRoleTaken { index } => {
                defmt::write!(fmt, "Probe {} already in use", index)
            }
        }
    }
}
