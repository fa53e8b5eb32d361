//! Control Loop Orchestration
//!
//! ## Overview
//!
//! Ties the pieces together. Each tick runs the same fixed pipeline:
//!
//! ```text
//! sample → push history → deviation → trend → policy → actuate → sleep
//! ```
//!
//! [`Controller`] owns the per-tick state (history window, policy, last
//! commanded speed) and exposes the pipeline as a single pure-ish method,
//! [`Controller::observe`], which takes a sample and returns a
//! [`TickStatus`] snapshot. That keeps the whole decision path testable
//! without clocks, threads, or hardware.
//!
//! [`ControlLoop`] (std only) adds the wall-clock part: reading the
//! temperature source, commanding the fan, and sleeping out the interval
//! between ticks with a cooperative cancellation flag.
//!
//! ## Concurrency Model
//!
//! Strictly one logical thread. The history window has exactly one writer
//! and one reader (the loop itself), so there is nothing to lock. The only
//! shared state is the cancellation flag, an `AtomicBool` the owner may set
//! from anywhere. Observers get [`TickStatus`] copies, never a reference
//! into the history.
//!
//! ## Failure Model
//!
//! - A source failure aborts the run; no substitute value is invented.
//! - A non-finite sample is rejected before it reaches the history, so a
//!   failed tick never corrupts the window.
//! - The loop itself never parks the fan; the owning process decides what a
//!   safe shutdown looks like and calls [`ControlLoop::park`].

use crate::config::ControlConfig;
use crate::errors::{ControlError, ControlResult};
use crate::history::SampleHistory;
use crate::policy::{ControlPolicy, FanSpeed};
use crate::trend::{SimpleSlope, TrendStrategy};

/// Read-only snapshot of one tick, for status output and fan-out
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickStatus {
    /// The sample taken this tick (°C)
    pub temperature_c: f32,
    /// Target minus sample (°C); positive means the pit is too cold
    pub deviation_c: f32,
    /// Estimated rate of change (°C/s)
    pub trend_c_per_s: f32,
    /// Speed in effect after this tick
    pub speed: FanSpeed,
    /// The command produced this tick, if the policy produced one
    pub commanded: Option<FanSpeed>,
}

/// Per-tick decision state: history, policy, and the standing speed
#[derive(Debug, Clone)]
pub struct Controller<T: TrendStrategy = SimpleSlope> {
    config: ControlConfig,
    history: SampleHistory,
    policy: ControlPolicy,
    strategy: T,
    speed: FanSpeed,
}

impl Controller<SimpleSlope> {
    /// Build a controller with the default trend estimator
    ///
    /// Fails with `InvalidConfiguration` if any tunable is out of range;
    /// the loop never starts on a bad configuration.
    pub fn new(config: ControlConfig) -> ControlResult<Self> {
        Self::with_strategy(config, SimpleSlope)
    }
}

impl<T: TrendStrategy> Controller<T> {
    /// Build a controller with a custom trend estimator
    pub fn with_strategy(config: ControlConfig, strategy: T) -> ControlResult<Self> {
        config.validate()?;

        Ok(Self {
            history: SampleHistory::new(config.history_capacity)?,
            policy: ControlPolicy::from_precision(config.precision_c),
            strategy,
            speed: FanSpeed::Off,
            config,
        })
    }

    /// Run one tick of the decision pipeline on a fresh sample
    ///
    /// Rejects non-finite samples without touching the history. Otherwise:
    /// push, compute deviation and trend, consult the policy, and record the
    /// new standing speed if a command was produced.
    pub fn observe(&mut self, sample_c: f32) -> ControlResult<TickStatus> {
        if !sample_c.is_finite() {
            #[cfg(feature = "log")]
            log::warn!("discarding non-finite sample: {sample_c}");

            return Err(ControlError::InvalidReading { value: sample_c });
        }

        self.history.push(sample_c);

        let deviation_c = self.config.target_c - sample_c;
        let trend_c_per_s = self
            .strategy
            .rate_of_change(self.history.values(), self.config.sample_interval_s);

        let commanded = self.policy.decide(deviation_c, trend_c_per_s);
        if let Some(speed) = commanded {
            self.speed = speed;
        }

        #[cfg(feature = "log")]
        log::debug!(
            "tick: temp={sample_c:.1}°C deviation={deviation_c:.1}°C \
             trend={trend_c_per_s:.4}°C/s speed={:?} commanded={commanded:?}",
            self.speed,
        );

        Ok(TickStatus {
            temperature_c: sample_c,
            deviation_c,
            trend_c_per_s,
            speed: self.speed,
            commanded,
        })
    }

    /// The configuration this controller was built with
    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// The speed currently in effect
    pub fn speed(&self) -> FanSpeed {
        self.speed
    }

    /// The sample window
    pub fn history(&self) -> &SampleHistory {
        &self.history
    }

    /// Force the standing speed, bypassing the policy
    ///
    /// Used by owners that park the fan on shutdown so the next run starts
    /// from a truthful state.
    pub fn override_speed(&mut self, speed: FanSpeed) {
        self.speed = speed;
    }
}

#[cfg(feature = "std")]
pub use self::looping::ControlLoop;

#[cfg(feature = "std")]
mod looping {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::{Duration, Instant};

    use super::{Controller, TickStatus};
    use crate::errors::{ControlError, ControlResult};
    use crate::policy::FanSpeed;
    use crate::traits::{FanActuator, TemperatureSource};
    use crate::trend::{SimpleSlope, TrendStrategy};

    /// How often the inter-tick sleep rechecks the cancellation flag
    const CANCEL_POLL: Duration = Duration::from_millis(100);

    /// Blocking sample → decide → actuate → sleep loop
    ///
    /// Runs until cancelled or until a tick fails. Source and actuator
    /// errors convert into [`ControlError`] and abort the run.
    pub struct ControlLoop<S, F, T: TrendStrategy = SimpleSlope> {
        controller: Controller<T>,
        source: S,
        fan: F,
    }

    impl<S, F, T> ControlLoop<S, F, T>
    where
        S: TemperatureSource,
        F: FanActuator,
        S::Error: Into<ControlError>,
        F::Error: Into<ControlError>,
        T: TrendStrategy,
    {
        /// Wire a controller to its collaborators
        pub fn new(controller: Controller<T>, source: S, fan: F) -> Self {
            Self {
                controller,
                source,
                fan,
            }
        }

        /// Run ticks until `cancel` is set or a tick fails
        ///
        /// `on_status` sees every tick's snapshot. The fan is commanded only
        /// when the policy produced a decision this tick. Cancellation is
        /// polled during the inter-tick sleep, so shutdown latency is a
        /// fraction of a second rather than a full interval.
        pub fn run(
            &mut self,
            cancel: &AtomicBool,
            mut on_status: impl FnMut(&TickStatus),
        ) -> ControlResult<()> {
            while !cancel.load(Ordering::Relaxed) {
                let sample_c = self.source.read_temperature_c().map_err(Into::into)?;
                let status = self.controller.observe(sample_c)?;

                if let Some(speed) = status.commanded {
                    self.fan.set_speed(speed).map_err(Into::into)?;
                }

                on_status(&status);
                self.sleep_interval(cancel);
            }

            Ok(())
        }

        /// Drive the fan to `Off`
        ///
        /// For the owning process to call once the loop has exited, so an
        /// interrupted cook never leaves the blower feeding the fire.
        pub fn park(&mut self) -> ControlResult<()> {
            self.fan.set_speed(FanSpeed::Off).map_err(Into::into)?;
            self.controller.override_speed(FanSpeed::Off);
            Ok(())
        }

        /// The wrapped controller
        pub fn controller(&self) -> &Controller<T> {
            &self.controller
        }

        /// Tear the loop back into its parts
        pub fn into_parts(self) -> (Controller<T>, S, F) {
            (self.controller, self.source, self.fan)
        }

        fn sleep_interval(&self, cancel: &AtomicBool) {
            let interval = Duration::from_secs_f32(self.controller.config().sample_interval_s);
            let deadline = Instant::now() + interval;

            while !cancel.load(Ordering::Relaxed) {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    break;
                }
                std::thread::sleep(remaining.min(CANCEL_POLL));
            }
        }
    }
}
