//! PWM Fan Driver
//!
//! Maps discrete speed levels onto PWM duty cycles and drives whatever
//! platform PWM sits behind the [`PwmOutput`] seam. The duty table lives in
//! [`crate::constants::FAN_DUTY_PCT`]; level-to-duty mapping is a pure
//! function so the table is testable without a pin.

use crate::constants::FAN_DUTY_PCT;
use crate::policy::FanSpeed;
use crate::traits::FanActuator;

/// Duty cycle (percent) for a speed level
pub fn duty_percent(speed: FanSpeed) -> u8 {
    FAN_DUTY_PCT[usize::from(speed.level())]
}

/// One PWM output pin, duty in percent
pub trait PwmOutput {
    /// Error produced by the PWM peripheral
    type Error;

    /// Set the duty cycle, 0 through 100 percent
    fn set_duty_percent(&mut self, percent: u8) -> Result<(), Self::Error>;
}

/// A fan on a PWM pin
#[derive(Debug)]
pub struct PwmFan<P> {
    pwm: P,
}

impl<P> PwmFan<P> {
    /// Wrap a PWM output as a fan
    pub fn new(pwm: P) -> Self {
        Self { pwm }
    }

    /// Give the pin back
    pub fn into_inner(self) -> P {
        self.pwm
    }
}

impl<P: PwmOutput> FanActuator for PwmFan<P> {
    type Error = P::Error;

    fn set_speed(&mut self, speed: FanSpeed) -> Result<(), P::Error> {
        self.pwm.set_duty_percent(duty_percent(speed))
    }
}
