//! NTC Thermistor Probes
//!
//! ## Overview
//!
//! Converts raw ADC counts from an NTC probe into Celsius and manages the
//! bank of probe channels. Each probe sits in a voltage divider with a
//! fixed 100 kΩ series resistor:
//!
//! ```text
//! VCC ── R_fixed ── ADC pin ── NTC ── GND
//! ```
//!
//! Two pure steps, both testable without hardware:
//!
//! 1. divider equation: counts → thermistor resistance
//! 2. Beta-form Steinhart–Hart: resistance → °C
//!
//! ## Hardware Seam
//!
//! [`AdcChannel`] is the only thing a platform has to provide. It returns
//! `nb::Result` so converters that need a conversion delay can signal
//! `WouldBlock` instead of spinning inside the driver; the probe blocks on
//! it, which is fine at control-loop rates.
//!
//! ## Edge Cases
//!
//! Counts at either rail are rejected as `SensorUnavailable` rather than
//! converted: zero counts means a shorted input and the divider equation
//! would divide by zero; full-scale counts means an open circuit (probe
//! unplugged) and an infinite resistance.

use libm::logf;

use crate::constants::{
    ADC_FULL_SCALE, BETA_COEFFICIENT, FIXED_RESISTOR_OHMS, KELVIN_OFFSET, MAX_PROBES,
    NOMINAL_RESISTANCE_OHMS, NOMINAL_TEMPERATURE_C,
};
use crate::errors::{ControlError, ControlResult};
use crate::traits::TemperatureSource;

/// One ADC input, 16-bit left-aligned counts
pub trait AdcChannel {
    /// Error produced by the converter
    type Error;

    /// Read the current counts, `WouldBlock` while a conversion is pending
    fn read(&mut self) -> nb::Result<u16, Self::Error>;
}

/// Thermistor resistance from divider counts
///
/// `None` when the reading sits at either rail (shorted or open input).
pub fn resistance_from_counts(raw: u16) -> Option<f32> {
    if raw == 0 || raw == ADC_FULL_SCALE {
        return None;
    }

    let ratio = f32::from(ADC_FULL_SCALE) / f32::from(raw) - 1.0;
    Some(FIXED_RESISTOR_OHMS / ratio)
}

/// Celsius from thermistor resistance, Beta-form Steinhart–Hart
///
/// `1/T = 1/T₀ + ln(R/R₀)/B` with R₀ = 100 kΩ at T₀ = 25 °C, B = 3950 K.
pub fn steinhart_temperature_c(resistance_ohms: f32) -> f32 {
    let mut inv_kelvin = logf(resistance_ohms / NOMINAL_RESISTANCE_OHMS) / BETA_COEFFICIENT;
    inv_kelvin += 1.0 / (NOMINAL_TEMPERATURE_C + KELVIN_OFFSET);
    1.0 / inv_kelvin - KELVIN_OFFSET
}

/// A single NTC probe on one ADC channel
#[derive(Debug)]
pub struct ThermistorProbe<A> {
    adc: A,
    channel: u8,
}

impl<A> ThermistorProbe<A> {
    /// Bind a probe to its converter channel
    pub fn new(adc: A, channel: u8) -> Self {
        Self { adc, channel }
    }

    /// The channel this probe reads from
    pub fn channel(&self) -> u8 {
        self.channel
    }
}

impl<A: AdcChannel> TemperatureSource for ThermistorProbe<A> {
    type Error = ControlError;

    fn read_temperature_c(&mut self) -> Result<f32, ControlError> {
        let unavailable = ControlError::SensorUnavailable {
            channel: self.channel,
        };

        let raw = nb::block!(self.adc.read()).map_err(|_| unavailable)?;
        let resistance = resistance_from_counts(raw).ok_or(unavailable)?;

        Ok(steinhart_temperature_c(resistance))
    }
}

/// Role a probe plays in the cook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProbeRole {
    /// Measures pit air temperature; drives the control decision
    Air,
    /// Measures food core temperature; display only, never controls
    Food,
}

/// Registry of probe channels with air/food designation
///
/// Mirrors the physical converter: a fixed number of channels, each either
/// empty or holding a probe. At most one probe per role, and a probe cannot
/// hold both roles at once.
pub struct ProbeBank<A, const N: usize = MAX_PROBES> {
    probes: [Option<ThermistorProbe<A>>; N],
    air: Option<u8>,
    food: Option<u8>,
}

impl<A, const N: usize> ProbeBank<A, N> {
    /// An empty bank
    pub fn new() -> Self {
        Self {
            probes: core::array::from_fn(|_| None),
            air: None,
            food: None,
        }
    }

    /// Put a probe on `channel`, replacing whatever was there
    pub fn add_probe(&mut self, channel: u8, adc: A) -> ControlResult<()> {
        self.check_channel(channel)?;
        self.probes[usize::from(channel)] = Some(ThermistorProbe::new(adc, channel));
        Ok(())
    }

    /// Remove the probe on `channel`, clearing any role it held
    pub fn remove_probe(&mut self, channel: u8) -> ControlResult<()> {
        self.check_channel(channel)?;
        self.probes[usize::from(channel)] = None;

        if self.air == Some(channel) {
            self.air = None;
        }
        if self.food == Some(channel) {
            self.food = None;
        }

        Ok(())
    }

    /// Whether `channel` currently holds a probe
    pub fn is_configured(&self, channel: u8) -> bool {
        usize::from(channel) < N && self.probes[usize::from(channel)].is_some()
    }

    /// Designate the probe on `channel` for a role
    ///
    /// Fails with `SensorUnavailable` if the channel is empty and
    /// `ProbeRoleTaken` if the channel already holds the other role.
    pub fn assign_role(&mut self, channel: u8, role: ProbeRole) -> ControlResult<()> {
        self.check_channel(channel)?;

        if !self.is_configured(channel) {
            return Err(ControlError::SensorUnavailable { channel });
        }

        let other = match role {
            ProbeRole::Air => self.food,
            ProbeRole::Food => self.air,
        };
        if other == Some(channel) {
            return Err(ControlError::ProbeRoleTaken { index: channel });
        }

        match role {
            ProbeRole::Air => self.air = Some(channel),
            ProbeRole::Food => self.food = Some(channel),
        }

        Ok(())
    }

    /// Clear a role designation, if set
    pub fn clear_role(&mut self, role: ProbeRole) {
        match role {
            ProbeRole::Air => self.air = None,
            ProbeRole::Food => self.food = None,
        }
    }

    /// The channel designated for a role, if any
    pub fn role_channel(&self, role: ProbeRole) -> Option<u8> {
        match role {
            ProbeRole::Air => self.air,
            ProbeRole::Food => self.food,
        }
    }

    fn check_channel(&self, channel: u8) -> ControlResult<()> {
        if usize::from(channel) >= N {
            return Err(ControlError::InvalidProbeIndex {
                index: channel,
                max: (N - 1) as u8,
            });
        }
        Ok(())
    }
}

impl<A: AdcChannel, const N: usize> ProbeBank<A, N> {
    /// Read the probe on `channel`
    ///
    /// `SensorUnavailable` when the channel holds no probe or cannot be
    /// converted.
    pub fn read_channel(&mut self, channel: u8) -> ControlResult<f32> {
        self.check_channel(channel)?;

        match &mut self.probes[usize::from(channel)] {
            Some(probe) => probe.read_temperature_c(),
            None => Err(ControlError::SensorUnavailable { channel }),
        }
    }

    /// Current temperature of every channel; `None` for empty or failed ones
    pub fn read_all(&mut self) -> [Option<f32>; N] {
        core::array::from_fn(|i| {
            self.probes[i]
                .as_mut()
                .and_then(|probe| probe.read_temperature_c().ok())
        })
    }
}

impl<A, const N: usize> Default for ProbeBank<A, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    /// Converter double returning a fixed count
    struct FixedAdc(u16);

    impl AdcChannel for FixedAdc {
        type Error = Infallible;

        fn read(&mut self) -> nb::Result<u16, Infallible> {
            Ok(self.0)
        }
    }

    /// Converter double that always fails
    struct BrokenAdc;

    impl AdcChannel for BrokenAdc {
        type Error = ();

        fn read(&mut self) -> nb::Result<u16, ()> {
            Err(nb::Error::Other(()))
        }
    }

    fn assert_close(actual: f32, expected: f32, tolerance: f32) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "{actual} not within {tolerance} of {expected}"
        );
    }

    #[test]
    fn midscale_counts_give_the_fixed_resistance() {
        // At half rail the divider legs are equal, so R ≈ R_fixed
        let r = resistance_from_counts(u16::MAX / 2 + 1).unwrap();
        assert_close(r, FIXED_RESISTOR_OHMS, 10.0);
    }

    #[test]
    fn rail_counts_are_rejected() {
        assert!(resistance_from_counts(0).is_none());
        assert!(resistance_from_counts(u16::MAX).is_none());
        assert!(resistance_from_counts(1).is_some());
    }

    #[test]
    fn nominal_resistance_reads_nominal_temperature() {
        assert_close(
            steinhart_temperature_c(NOMINAL_RESISTANCE_OHMS),
            NOMINAL_TEMPERATURE_C,
            1e-3,
        );
    }

    #[test]
    fn lower_resistance_means_hotter() {
        // NTC: resistance falls as temperature rises
        let cool = steinhart_temperature_c(200_000.0);
        let nominal = steinhart_temperature_c(100_000.0);
        let hot = steinhart_temperature_c(10_000.0);

        assert!(cool < nominal);
        assert!(nominal < hot);
        assert!(hot > 80.0);
    }

    #[test]
    fn probe_reads_through_the_pipeline() {
        // Half rail → R_fixed → the nominal 25 °C point
        let mut probe = ThermistorProbe::new(FixedAdc(u16::MAX / 2 + 1), 0);
        assert_close(probe.read_temperature_c().unwrap(), 25.0, 0.01);
    }

    #[test]
    fn probe_surfaces_adc_failure() {
        let mut probe = ThermistorProbe::new(BrokenAdc, 3);
        assert_eq!(
            probe.read_temperature_c(),
            Err(ControlError::SensorUnavailable { channel: 3 })
        );
    }

    #[test]
    fn bank_rejects_out_of_range_channels() {
        let mut bank: ProbeBank<FixedAdc, 8> = ProbeBank::new();
        assert_eq!(
            bank.add_probe(8, FixedAdc(100)),
            Err(ControlError::InvalidProbeIndex { index: 8, max: 7 })
        );
        assert_eq!(
            bank.read_channel(12),
            Err(ControlError::InvalidProbeIndex { index: 12, max: 7 })
        );
    }

    #[test]
    fn empty_channel_is_unavailable() {
        let mut bank: ProbeBank<FixedAdc, 8> = ProbeBank::new();
        assert_eq!(
            bank.read_channel(2),
            Err(ControlError::SensorUnavailable { channel: 2 })
        );
    }

    #[test]
    fn roles_are_exclusive_per_probe() {
        let mut bank: ProbeBank<FixedAdc, 8> = ProbeBank::new();
        bank.add_probe(0, FixedAdc(u16::MAX / 2)).unwrap();
        bank.add_probe(1, FixedAdc(u16::MAX / 2)).unwrap();

        bank.assign_role(0, ProbeRole::Air).unwrap();
        assert_eq!(
            bank.assign_role(0, ProbeRole::Food),
            Err(ControlError::ProbeRoleTaken { index: 0 })
        );

        bank.assign_role(1, ProbeRole::Food).unwrap();
        assert_eq!(bank.role_channel(ProbeRole::Air), Some(0));
        assert_eq!(bank.role_channel(ProbeRole::Food), Some(1));
    }

    #[test]
    fn role_needs_a_configured_probe() {
        let mut bank: ProbeBank<FixedAdc, 8> = ProbeBank::new();
        assert_eq!(
            bank.assign_role(4, ProbeRole::Air),
            Err(ControlError::SensorUnavailable { channel: 4 })
        );
    }

    #[test]
    fn removing_a_probe_clears_its_role() {
        let mut bank: ProbeBank<FixedAdc, 8> = ProbeBank::new();
        bank.add_probe(0, FixedAdc(u16::MAX / 2)).unwrap();
        bank.assign_role(0, ProbeRole::Air).unwrap();

        bank.remove_probe(0).unwrap();
        assert_eq!(bank.role_channel(ProbeRole::Air), None);
        assert!(!bank.is_configured(0));
    }

    #[test]
    fn read_all_maps_empty_channels_to_none() {
        let mut bank: ProbeBank<FixedAdc, 4> = ProbeBank::new();
        bank.add_probe(1, FixedAdc(u16::MAX / 2 + 1)).unwrap();

        let temps = bank.read_all();
        assert!(temps[0].is_none());
        assert!(temps[1].is_some());
        assert!(temps[2].is_none());
        assert!(temps[3].is_none());
    }
}
