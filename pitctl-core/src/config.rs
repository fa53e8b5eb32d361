//! Control Loop Configuration
//!
//! One explicit struct, validated before the loop starts. Nothing in the
//! core reads ambient module state: thresholds, interval, and capacity all
//! flow from here, so two controllers with different tunings can coexist in
//! one process.
//!
//! Configuration is consumed at startup and never reloaded mid-run.

use crate::constants::{
    DEFAULT_HISTORY_CAPACITY, DEFAULT_PRECISION_C, DEFAULT_SAMPLE_INTERVAL_S, MAX_HISTORY,
};
use crate::errors::{ControlError, ControlResult};

/// Tunables for one control loop
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlConfig {
    /// Operator-supplied target temperature (°C)
    pub target_c: f32,

    /// The significant-difference constant `P` (°C); every deviation and
    /// trend threshold derives from it
    pub precision_c: f32,

    /// Seconds between samples; also the implicit x-spacing for the trend
    pub sample_interval_s: f32,

    /// Number of samples the history window holds
    pub history_capacity: usize,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            target_c: 107.0,
            precision_c: DEFAULT_PRECISION_C,
            sample_interval_s: DEFAULT_SAMPLE_INTERVAL_S,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl ControlConfig {
    /// Default tunables with an operator-supplied target
    pub fn with_target(target_c: f32) -> Self {
        Self {
            target_c,
            ..Self::default()
        }
    }

    /// Validate every parameter, failing with `InvalidConfiguration` on the
    /// first violation
    ///
    /// Called by the controller constructor; a loop with an invalid
    /// configuration never begins.
    pub fn validate(&self) -> ControlResult<()> {
        if !self.target_c.is_finite() {
            return Err(ControlError::InvalidConfiguration {
                parameter: "target_c",
                value: self.target_c,
            });
        }

        if !self.precision_c.is_finite() || self.precision_c <= 0.0 {
            return Err(ControlError::InvalidConfiguration {
                parameter: "precision_c",
                value: self.precision_c,
            });
        }

        if !self.sample_interval_s.is_finite() || self.sample_interval_s <= 0.0 {
            return Err(ControlError::InvalidConfiguration {
                parameter: "sample_interval_s",
                value: self.sample_interval_s,
            });
        }

        if self.history_capacity == 0 || self.history_capacity > MAX_HISTORY {
            return Err(ControlError::InvalidConfiguration {
                parameter: "history_capacity",
                value: self.history_capacity as f32,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameter_of(err: ControlError) -> &'static str {
        match err {
            ControlError::InvalidConfiguration { parameter, .. } => parameter,
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(ControlConfig::default().validate().is_ok());
        assert!(ControlConfig::with_target(120.0).validate().is_ok());
    }

    #[test]
    fn non_finite_target_rejected() {
        let config = ControlConfig::with_target(f32::NAN);
        assert_eq!(parameter_of(config.validate().unwrap_err()), "target_c");

        let config = ControlConfig::with_target(f32::INFINITY);
        assert_eq!(parameter_of(config.validate().unwrap_err()), "target_c");
    }

    #[test]
    fn non_positive_precision_rejected() {
        for precision_c in [0.0, -5.0, f32::NAN] {
            let config = ControlConfig {
                precision_c,
                ..ControlConfig::default()
            };
            assert_eq!(parameter_of(config.validate().unwrap_err()), "precision_c");
        }
    }

    #[test]
    fn non_positive_interval_rejected() {
        for sample_interval_s in [0.0, -1.0] {
            let config = ControlConfig {
                sample_interval_s,
                ..ControlConfig::default()
            };
            assert_eq!(
                parameter_of(config.validate().unwrap_err()),
                "sample_interval_s"
            );
        }
    }

    #[test]
    fn bad_capacity_rejected() {
        for history_capacity in [0, MAX_HISTORY + 1] {
            let config = ControlConfig {
                history_capacity,
                ..ControlConfig::default()
            };
            assert_eq!(
                parameter_of(config.validate().unwrap_err()),
                "history_capacity"
            );
        }
    }
}
