//! Constants for the Control Engine
//!
//! Centralized, documented constants used throughout the crate. All numeric
//! values live here with their purpose, source, and units spelled out.
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. When adding new constants, document source and units
//! 3. Tunables that vary per deployment belong in [`crate::config`], not here

// ===== CONTROL DEFAULTS =====

/// Default significant temperature difference (°C).
///
/// A deviation smaller than this is treated as "on target". All deviation
/// and trend bands derive from this single value, so retuning a deployment
/// means changing one number.
pub const DEFAULT_PRECISION_C: f32 = 5.0;

/// Default sampling interval (seconds).
///
/// Charcoal fires have minutes of thermal inertia; sampling faster than
/// this mostly measures sensor noise.
pub const DEFAULT_SAMPLE_INTERVAL_S: f32 = 10.0;

/// Default history capacity (samples).
///
/// 60 samples at the default 10 s interval = the last 10 minutes of
/// readings, enough context for trend estimation across a lid-open event.
pub const DEFAULT_HISTORY_CAPACITY: usize = 60;

/// Hard upper bound on history capacity (samples).
///
/// Sizes the fixed backing storage; configured capacities must not exceed
/// this. 256 samples of f32 is 1 KiB, fine for small targets.
pub const MAX_HISTORY: usize = 256;

// ===== THERMISTOR CIRCUIT =====

/// Fixed series resistor in the divider (Ω).
///
/// Each probe is wired with a 100 kΩ 5% resistor between the supply rail
/// and the ADC input.
pub const FIXED_RESISTOR_OHMS: f32 = 100_000.0;

/// Thermistor nominal resistance R₀ at the calibration temperature (Ω).
pub const NOMINAL_RESISTANCE_OHMS: f32 = 100_000.0;

/// Thermistor calibration temperature T₀ (°C).
pub const NOMINAL_TEMPERATURE_C: f32 = 25.0;

/// Thermistor Beta coefficient (K).
///
/// Typical for 100 kΩ NTC food/pit probes. Source: common NTC datasheets.
pub const BETA_COEFFICIENT: f32 = 3950.0;

/// Celsius-to-Kelvin offset.
pub const KELVIN_OFFSET: f32 = 273.15;

/// Full-scale ADC count.
///
/// Readings arrive left-aligned to 16 bits regardless of the converter's
/// native resolution, so full scale is 65535.
pub const ADC_FULL_SCALE: u16 = u16::MAX;

// ===== FAN =====

/// PWM duty cycle (percent) for each speed level, Off through High.
///
/// The low entry is 35% because small 5 V blowers stall below roughly a
/// third of full duty.
pub const FAN_DUTY_PCT: [u8; 4] = [0, 35, 65, 90];

// ===== PROBES =====

/// Number of channels on the probe bank's ADC.
pub const MAX_PROBES: usize = 8;
