//! Trend Estimation Over the Sample History
//!
//! ## Overview
//!
//! Reduces the sample window to a single signed rate of change: how fast the
//! pit temperature is moving, in °C per second. The control policy combines
//! this with the deviation from target to pick a fan speed - a pit that is
//! 30 °C low but already climbing fast needs less air than one that is
//! 30 °C low and flat.
//!
//! ## The Heuristic
//!
//! [`SimpleSlope`] averages the adjacent-sample deltas and divides by the
//! sampling interval, then amplifies the result by the dispersion of those
//! deltas:
//!
//! ```text
//! slope = mean(Δy) / Δx · (1 + var(Δy) / 100)
//! ```
//!
//! A plain mean slope underreacts when the recent window is volatile - a
//! brief spike mostly cancels itself out of the average. The multiplicative
//! variance penalty makes the controller more aggressive exactly when the
//! readings are noisy. This is deliberately non-physical: it is not the
//! derivative of any fitted curve, and for a steady series the penalty
//! vanishes (the variance of constant deltas is zero), leaving the exact
//! per-interval delta.
//!
//! The variance is the population form (divisor `n`, the number of deltas),
//! so two-sample windows are handled without special cases.
//!
//! A fitted-curve estimator (regression plus derivative at the newest point)
//! would track curvature better; it can slot in behind [`TrendStrategy`]
//! without touching the controller.

/// Strategy seam for rate-of-change estimation
///
/// Implementations must return `0.0` for windows of fewer than two samples:
/// no trend can be computed from a single point, so "no change" is the only
/// safe answer.
pub trait TrendStrategy {
    /// Estimate the rate of change in value units per second
    ///
    /// `samples` is oldest-to-newest with implicit equal spacing of
    /// `interval_s` seconds between neighbours.
    fn rate_of_change(&self, samples: &[f32], interval_s: f32) -> f32;
}

/// Variance-amplified mean slope (the default estimator)
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleSlope;

impl TrendStrategy for SimpleSlope {
    fn rate_of_change(&self, samples: &[f32], interval_s: f32) -> f32 {
        simple_slope(samples, interval_s)
    }
}

/// Mean per-interval change, expressed per second and amplified by the
/// dispersion of the adjacent deltas
///
/// Returns `0.0` for fewer than two samples.
pub fn simple_slope(samples: &[f32], delta_x: f32) -> f32 {
    if samples.len() < 2 {
        return 0.0;
    }

    let n = (samples.len() - 1) as f32;

    let mut delta_sum = 0.0_f32;
    for pair in samples.windows(2) {
        delta_sum += pair[1] - pair[0];
    }
    let mean_delta = delta_sum / n;

    let mut square_sum = 0.0_f32;
    for pair in samples.windows(2) {
        let residual = (pair[1] - pair[0]) - mean_delta;
        square_sum += residual * residual;
    }
    let variance = square_sum / n;

    let avg_slope = mean_delta / delta_x;
    avg_slope * (1.0 + variance / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_short_means_no_change() {
        assert_eq!(simple_slope(&[], 1.0), 0.0);
        assert_eq!(simple_slope(&[10.0], 1.0), 0.0);
    }

    #[test]
    fn constant_delta_is_exact() {
        // Zero dispersion: the penalty term contributes nothing and the
        // result is exactly the per-interval delta.
        assert_eq!(simple_slope(&[0.0, 1.0, 2.0, 3.0], 1.0), 1.0);
        assert_eq!(simple_slope(&[0.0, 1.0, 2.0, 3.0, 4.0], 1.0), 1.0);
        assert_eq!(simple_slope(&[0.0, 10.0, 20.0, 30.0], 1.0), 10.0);
        assert_eq!(simple_slope(&[0.0, 100.0, 200.0, 300.0], 1.0), 100.0);
    }

    #[test]
    fn falling_series_is_negative() {
        assert_eq!(simple_slope(&[30.0, 20.0, 10.0, 0.0], 1.0), -10.0);
    }

    #[test]
    fn spacing_converts_to_per_second() {
        // 1 °C per 10 s sample = 0.1 °C/s
        assert_eq!(simple_slope(&[0.0, 1.0, 2.0, 3.0], 10.0), 0.1);
    }

    #[test]
    fn dispersion_amplifies_the_trend() {
        // Equal mean delta, different spread: the volatile series must
        // produce a strictly larger trend.
        let steady = simple_slope(&[0.0, 1.0, 2.0, 3.0], 1.0);
        let volatile = simple_slope(&[0.0, 0.0, 2.0, 3.0], 1.0);

        assert!(steady < volatile);
        assert_eq!(steady, 1.0);
    }

    #[test]
    fn strategy_delegates() {
        let estimator = SimpleSlope;
        assert_eq!(estimator.rate_of_change(&[0.0, 2.0, 4.0], 1.0), 2.0);
    }
}
