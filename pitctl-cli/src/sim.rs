//! First-order smoker simulator
//!
//! A lumped thermal model standing in for a real pit: the charcoal bed adds
//! a little heat on its own, the blower multiplies that, and the pit loses
//! heat toward ambient in proportion to how far above ambient it sits.
//!
//! ```text
//! dT/dt = base + gain · duty/100 − loss · (T − ambient)
//! ```
//!
//! [`simulated_pit`] splits the model into a [`SimSource`] / [`SimFan`] pair
//! sharing one state behind a mutex, so the pair plugs straight into a
//! `ControlLoop` in place of a thermistor and a PWM pin. Simulated time
//! advances by one sample interval per temperature read.

use std::sync::{Arc, Mutex, MutexGuard};

use pitctl_core::fan::duty_percent;
use pitctl_core::{ControlError, FanActuator, FanSpeed, TemperatureSource};

/// Lumped thermal state of the simulated pit
#[derive(Debug)]
pub struct PitModel {
    temperature_c: f32,
    ambient_c: f32,
    duty_pct: u8,
}

impl PitModel {
    /// Charcoal bed output with the blower stopped (°C/s)
    const BASE_HEAT_C_PER_S: f32 = 0.02;
    /// Additional output at 100 % blower duty (°C/s)
    const FAN_HEAT_C_PER_S: f32 = 0.5;
    /// Loss coefficient toward ambient (1/s)
    const LOSS_PER_S: f32 = 0.005;

    /// A cold pit sitting at ambient
    pub fn new(ambient_c: f32) -> Self {
        Self {
            temperature_c: ambient_c,
            ambient_c,
            duty_pct: 0,
        }
    }

    /// Advance the model by `dt_s` seconds
    pub fn step(&mut self, dt_s: f32) {
        let heating =
            Self::BASE_HEAT_C_PER_S + Self::FAN_HEAT_C_PER_S * f32::from(self.duty_pct) / 100.0;
        let cooling = Self::LOSS_PER_S * (self.temperature_c - self.ambient_c);
        self.temperature_c += (heating - cooling) * dt_s;
    }

    /// Current pit temperature (°C)
    pub fn temperature_c(&self) -> f32 {
        self.temperature_c
    }

    /// Current blower duty (percent)
    pub fn duty_pct(&self) -> u8 {
        self.duty_pct
    }

    /// Set the blower duty (percent)
    pub fn set_duty_pct(&mut self, duty_pct: u8) {
        self.duty_pct = duty_pct;
    }
}

/// Split a pit model into its control-loop collaborators
///
/// `step_s` is how much simulated time passes per temperature read; pass the
/// loop's sample interval to run the simulation at wall-clock speed.
pub fn simulated_pit(ambient_c: f32, step_s: f32) -> (SimSource, SimFan) {
    let model = Arc::new(Mutex::new(PitModel::new(ambient_c)));
    (
        SimSource {
            model: Arc::clone(&model),
            step_s,
        },
        SimFan { model },
    )
}

// A panicked holder can't leave the model half-updated (both writers mutate
// plain scalars), so a poisoned lock is safe to clear and reuse.
fn lock(model: &Mutex<PitModel>) -> MutexGuard<'_, PitModel> {
    model.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Temperature side of the simulated pit
pub struct SimSource {
    model: Arc<Mutex<PitModel>>,
    step_s: f32,
}

impl TemperatureSource for SimSource {
    type Error = ControlError;

    fn read_temperature_c(&mut self) -> Result<f32, ControlError> {
        let mut model = lock(&self.model);
        model.step(self.step_s);
        Ok(model.temperature_c())
    }
}

/// Blower side of the simulated pit
pub struct SimFan {
    model: Arc<Mutex<PitModel>>,
}

impl FanActuator for SimFan {
    type Error = core::convert::Infallible;

    fn set_speed(&mut self, speed: FanSpeed) -> Result<(), Self::Error> {
        lock(&self.model).set_duty_pct(duty_percent(speed));
        Ok(())
    }
}
