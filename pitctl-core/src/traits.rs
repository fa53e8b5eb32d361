//! Seams for the External Collaborators
//!
//! The control loop only ever sees these two traits. Everything hardware-
//! specific (ADC wiring, PWM drivers, simulators, test doubles) lives behind
//! them. Keep them narrow - one method each is all the loop needs.

use crate::policy::FanSpeed;

/// Something that can produce the current temperature in Celsius
pub trait TemperatureSource {
    /// Error produced when the source cannot be read
    type Error;

    /// Read the current temperature (°C)
    ///
    /// A failure here is fatal for the tick: implementations must not paper
    /// over it with a stale or default value.
    fn read_temperature_c(&mut self) -> Result<f32, Self::Error>;
}

/// Something that can run at a discrete speed level
pub trait FanActuator {
    /// Error produced when the command cannot be applied
    type Error;

    /// Command the given speed
    fn set_speed(&mut self, speed: FanSpeed) -> Result<(), Self::Error>;
}

impl<T: TemperatureSource + ?Sized> TemperatureSource for &mut T {
    type Error = T::Error;

    fn read_temperature_c(&mut self) -> Result<f32, Self::Error> {
        (**self).read_temperature_c()
    }
}

impl<F: FanActuator + ?Sized> FanActuator for &mut F {
    type Error = F::Error;

    fn set_speed(&mut self, speed: FanSpeed) -> Result<(), Self::Error> {
        (**self).set_speed(speed)
    }
}
