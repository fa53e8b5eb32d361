//! Control engine for pitctl
//!
//! Regulates a charcoal smoker's airflow: a variable-speed blower is driven
//! toward an operator-supplied pit temperature using periodic thermistor
//! samples, a sliding history window, a variance-amplified trend estimate,
//! and a banded threshold policy.
//!
//! Designed for small targets:
//! - `no_std` capable (disable the default `std` feature)
//! - No heap allocation in the tick path
//! - Hardware only ever appears behind the [`traits`] seams
//!
//! ```no_run
//! use pitctl_core::{ControlConfig, Controller};
//!
//! let mut controller = Controller::new(ControlConfig::with_target(107.0))?;
//!
//! // One tick: sample in, speed decision out
//! let status = controller.observe(92.5)?;
//! println!("{:.1} °C, fan {:?}", status.temperature_c, status.speed);
//! # Ok::<(), pitctl_core::ControlError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod control;
pub mod errors;
pub mod fan;
#[cfg(feature = "std")]
pub mod fanout;
pub mod history;
pub mod policy;
pub mod thermistor;
pub mod traits;
pub mod trend;

// Public API
pub use config::ControlConfig;
#[cfg(feature = "std")]
pub use control::ControlLoop;
pub use control::{Controller, TickStatus};
pub use errors::{ControlError, ControlResult};
pub use history::SampleHistory;
pub use policy::{ControlPolicy, FanSpeed};
pub use traits::{FanActuator, TemperatureSource};
pub use trend::{SimpleSlope, TrendStrategy};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
