//! Threshold Policy: (Deviation, Trend) → Fan Speed
//!
//! ## Overview
//!
//! A pure decision table. Each tick the controller knows two numbers: how far
//! the pit is from the target (`deviation = target − current`) and how fast
//! it is moving ([`crate::trend`]). Both are discretized into magnitude
//! bands, and the band pair indexes a fixed table of speed commands.
//!
//! ## Bands
//!
//! Every threshold derives from the single precision constant `P`
//! (a "significant difference", default 5 °C):
//!
//! ```text
//! deviation:  large = 10·P    medium = 5·P     small = P
//! trend:      large = P/10    medium = P/100   small = P/1000   (°C/s)
//! ```
//!
//! Deployments are retuned by changing `P` in the configuration, never by
//! editing the table.
//!
//! ## Decision Table
//!
//! ```text
//!                    trend<P/1000  trend<P/100  trend<P/10   trend≥P/10
//! dev < −P           Off           Off          Off          Off
//! dev > 10·P         High          Medium       Low          keep
//! dev > 5·P          Medium        Low          Off          keep
//! otherwise          Low           Off          keep         keep
//! ```
//!
//! "keep" means no command is produced and the previous speed stands: the
//! temperature is already moving fast enough that more (or less) air would
//! overshoot, or the deviation is too insignificant to act on.
//!
//! The forced-off row wins unconditionally: a pit more than `P` above target
//! gets no air regardless of trend, since airflow only adds heat.
//!
//! Encoding the policy as tagged bands plus a total-match table (instead of
//! a ladder of nested conditionals) makes every cell explicit and leaves no
//! reachable-but-unwritten combinations.

use crate::errors::{ControlError, ControlResult};

/// Discrete fan speed command, ordered Off through High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FanSpeed {
    /// Fan stopped
    Off = 0,
    /// Slowest setting
    Low = 1,
    /// Middle setting
    Medium = 2,
    /// Fastest setting
    High = 3,
}

impl FanSpeed {
    /// Numeric level, 0 through 3
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Parse a numeric level, rejecting anything outside the defined set
    ///
    /// The policy itself can never produce an out-of-range level; this is
    /// the defensive edge for operator input and wire formats.
    pub fn from_level(level: u8) -> ControlResult<Self> {
        match level {
            0 => Ok(Self::Off),
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            _ => Err(ControlError::InvalidSpeed { level }),
        }
    }
}

/// Deviation thresholds derived from the precision constant (°C)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviationBands {
    /// An order of magnitude above precision: the pit is nowhere near target
    pub large: f32,
    /// Half an order above precision
    pub medium: f32,
    /// The precision constant itself: the significance floor
    pub small: f32,
}

impl DeviationBands {
    /// Derive the three deviation thresholds from a precision constant
    pub fn from_precision(precision_c: f32) -> Self {
        Self {
            large: precision_c * 10.0,
            medium: precision_c * 5.0,
            small: precision_c,
        }
    }
}

/// Trend thresholds derived from the precision constant (°C per second)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrendBands {
    /// Fast climb: a tenth of precision per second
    pub large: f32,
    /// Steady climb
    pub medium: f32,
    /// Barely moving
    pub small: f32,
}

impl TrendBands {
    /// Derive the three trend thresholds from a precision constant
    pub fn from_precision(precision_c: f32) -> Self {
        Self {
            large: precision_c / 10.0,
            medium: precision_c / 100.0,
            small: precision_c / 1000.0,
        }
    }
}

/// Magnitude band for the deviation from target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviationBand {
    /// Significantly above target: force the fan off
    Overshoot,
    /// More than `10·P` below target
    Large,
    /// More than `5·P` below target
    Medium,
    /// Within `[−P, 5·P]` of target
    Small,
}

/// Magnitude band for the trend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendBand {
    /// Below `P/1000` °C/s: effectively flat
    Small,
    /// Below `P/100` °C/s
    Medium,
    /// Below `P/10` °C/s
    Large,
    /// At or above `P/10` °C/s: already climbing fast
    Steep,
}

/// The banded decision policy
#[derive(Debug, Clone, Copy)]
pub struct ControlPolicy {
    deviation: DeviationBands,
    trend: TrendBands,
}

impl ControlPolicy {
    /// Build the policy for a given precision constant
    pub fn from_precision(precision_c: f32) -> Self {
        Self {
            deviation: DeviationBands::from_precision(precision_c),
            trend: TrendBands::from_precision(precision_c),
        }
    }

    /// Deviation thresholds in use
    pub fn deviation_bands(&self) -> DeviationBands {
        self.deviation
    }

    /// Trend thresholds in use
    pub fn trend_bands(&self) -> TrendBands {
        self.trend
    }

    /// Classify a deviation (target − current, °C) into its band
    pub fn classify_deviation(&self, deviation: f32) -> DeviationBand {
        if deviation < -self.deviation.small {
            DeviationBand::Overshoot
        } else if deviation > self.deviation.large {
            DeviationBand::Large
        } else if deviation > self.deviation.medium {
            DeviationBand::Medium
        } else {
            DeviationBand::Small
        }
    }

    /// Classify a trend (°C/s) into its band
    pub fn classify_trend(&self, trend: f32) -> TrendBand {
        if trend < self.trend.small {
            TrendBand::Small
        } else if trend < self.trend.medium {
            TrendBand::Medium
        } else if trend < self.trend.large {
            TrendBand::Large
        } else {
            TrendBand::Steep
        }
    }

    /// Look up the speed command for a (deviation, trend) pair
    ///
    /// `None` means no action: the previous commanded speed stands.
    pub fn decide(&self, deviation: f32, trend: f32) -> Option<FanSpeed> {
        let dev_band = self.classify_deviation(deviation);
        let trend_band = self.classify_trend(trend);
        Self::table(dev_band, trend_band)
    }

    fn table(deviation: DeviationBand, trend: TrendBand) -> Option<FanSpeed> {
        use DeviationBand as D;
        use FanSpeed::*;
        use TrendBand as T;

        match (deviation, trend) {
            (D::Overshoot, _) => Some(Off),

            (D::Large, T::Small) => Some(High),
            (D::Large, T::Medium) => Some(Medium),
            (D::Large, T::Large) => Some(Low),
            (D::Large, T::Steep) => None,

            (D::Medium, T::Small) => Some(Medium),
            (D::Medium, T::Medium) => Some(Low),
            (D::Medium, T::Large) => Some(Off),
            (D::Medium, T::Steep) => None,

            (D::Small, T::Small) => Some(Low),
            (D::Small, T::Medium) => Some(Off),
            (D::Small, T::Large) | (D::Small, T::Steep) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ControlPolicy {
        // precision 5 °C: deviation bands 50/25/5, trend bands 0.5/0.05/0.005
        ControlPolicy::from_precision(5.0)
    }

    #[test]
    fn bands_derive_from_precision() {
        let p = policy();
        assert_eq!(p.deviation_bands().large, 50.0);
        assert_eq!(p.deviation_bands().medium, 25.0);
        assert_eq!(p.deviation_bands().small, 5.0);
        assert_eq!(p.trend_bands().large, 0.5);
        assert_eq!(p.trend_bands().medium, 0.05);
        assert_eq!(p.trend_bands().small, 0.005);
    }

    #[test]
    fn overshoot_forces_off_regardless_of_trend() {
        let p = policy();
        for trend in [-10.0, 0.0, 0.001, 0.01, 0.1, 10.0] {
            assert_eq!(p.decide(-5.1, trend), Some(FanSpeed::Off));
        }
    }

    #[test]
    fn large_deviation_row() {
        let p = policy();
        assert_eq!(p.decide(60.0, 0.0), Some(FanSpeed::High));
        assert_eq!(p.decide(60.0, 0.01), Some(FanSpeed::Medium));
        assert_eq!(p.decide(60.0, 0.1), Some(FanSpeed::Low));
        assert_eq!(p.decide(60.0, 0.5), None);
    }

    #[test]
    fn medium_deviation_row() {
        let p = policy();
        assert_eq!(p.decide(30.0, 0.0), Some(FanSpeed::Medium));
        assert_eq!(p.decide(30.0, 0.01), Some(FanSpeed::Low));
        assert_eq!(p.decide(30.0, 0.1), Some(FanSpeed::Off));
        assert_eq!(p.decide(30.0, 1.0), None);
    }

    #[test]
    fn small_deviation_row() {
        let p = policy();
        assert_eq!(p.decide(3.0, 0.0), Some(FanSpeed::Low));
        assert_eq!(p.decide(3.0, 0.01), Some(FanSpeed::Off));
        // Trend at or above the medium band: no action
        assert_eq!(p.decide(3.0, 0.1), None);
        assert_eq!(p.decide(3.0, 2.0), None);
    }

    #[test]
    fn row_boundaries() {
        let p = policy();
        // Exactly at a threshold falls into the smaller band
        assert_eq!(p.classify_deviation(50.0), DeviationBand::Medium);
        assert_eq!(p.classify_deviation(25.0), DeviationBand::Small);
        assert_eq!(p.classify_deviation(-5.0), DeviationBand::Small);
        assert_eq!(p.classify_trend(0.5), TrendBand::Steep);
        // A falling trend is always in the smallest band
        assert_eq!(p.classify_trend(-3.0), TrendBand::Small);
    }

    #[test]
    fn speed_level_round_trip() {
        for level in 0..=3 {
            assert_eq!(FanSpeed::from_level(level).unwrap().level(), level);
        }
        assert!(matches!(
            FanSpeed::from_level(4),
            Err(ControlError::InvalidSpeed { level: 4 })
        ));
    }
}
