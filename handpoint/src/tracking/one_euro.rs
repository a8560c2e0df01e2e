//! Adaptive low-pass filter (one-euro) for a single scalar signal.
//!
//! Smooth when the signal is slow (less jitter), responsive when it moves
//! fast (less lag).  Timestamps may arrive at irregular intervals.

use std::f64::consts::PI;

/// Smallest time step accepted between samples, in seconds.
const MIN_DT_S: f64 = 1e-6;

// ── Config ─────────────────────────────────────────────────

/// Tuning for one adaptive filter instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    /// Minimum cutoff frequency (Hz). Lower = smoother at rest.
    pub min_cutoff: f64,
    /// Speed coefficient. Higher = less lag during fast motion.
    pub beta: f64,
    /// Cutoff frequency (Hz) for the derivative estimate.
    pub d_cutoff: f64,
}

impl FilterConfig {
    /// Cursor axes in display pixels: heavy, steady pointer.
    pub fn cursor() -> Self {
        Self {
            min_cutoff: 1.0,
            beta: 0.005,
            d_cutoff: 1.0,
        }
    }

    /// Hand scale in display pixels: changes slowly, suppress size jitter.
    pub fn scale() -> Self {
        Self {
            min_cutoff: 0.5,
            beta: 0.0008,
            d_cutoff: 1.0,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::cursor()
    }
}

// ── Filter ─────────────────────────────────────────────────

/// Stored state after the first sample.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FilterState {
    value: f64,
    derivative: f64,
    timestamp_ms: f64,
}

/// One-euro filter over one scalar signal.
#[derive(Debug, Clone)]
pub struct AdaptiveFilter {
    config: FilterConfig,
    state: Option<FilterState>,
}

impl AdaptiveFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Low-pass coefficient for cutoff `cutoff` at sampling period `dt_s`.
    fn smoothing_factor(dt_s: f64, cutoff: f64) -> f64 {
        let tau = 1.0 / (2.0 * PI * cutoff);
        1.0 / (1.0 + tau / dt_s)
    }

    /// Filter a single value.
    ///
    /// The first call after construction or `reset` returns `raw` unchanged.
    pub fn update(&mut self, raw: f64, timestamp_ms: f64) -> f64 {
        let prev = match self.state {
            Some(s) => s,
            None => {
                self.state = Some(FilterState {
                    value: raw,
                    derivative: 0.0,
                    timestamp_ms,
                });
                return raw;
            }
        };

        let dt_s = ((timestamp_ms - prev.timestamp_ms) / 1000.0).max(MIN_DT_S);

        // 1. Estimate derivative and smooth it with a fixed cutoff
        let dx = (raw - prev.value) / dt_s;
        let a_d = Self::smoothing_factor(dt_s, self.config.d_cutoff);
        let dx_hat = prev.derivative + a_d * (dx - prev.derivative);

        // 2. Adaptive cutoff: more smoothing when slow, less when fast
        let cutoff = self.config.min_cutoff + self.config.beta * dx_hat.abs();
        let a = Self::smoothing_factor(dt_s, cutoff);

        // 3. Blend
        let x_hat = prev.value + a * (raw - prev.value);

        self.state = Some(FilterState {
            value: x_hat,
            derivative: dx_hat,
            timestamp_ms,
        });
        x_hat
    }

    /// Last filtered value, if any sample has been seen.
    pub fn value(&self) -> Option<f64> {
        self.state.map(|s| s.value)
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Reset filter state; the next sample passes through unchanged.
    pub fn reset(&mut self) {
        self.state = None;
    }
}

impl Default for AdaptiveFilter {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_identity() {
        let mut f = AdaptiveFilter::new(FilterConfig::cursor());
        assert_eq!(f.update(123.456, 0.0), 123.456);
        assert!(f.is_initialized());
    }

    #[test]
    fn test_first_sample_identity_after_reset() {
        let mut f = AdaptiveFilter::new(FilterConfig::scale());
        f.update(10.0, 0.0);
        f.update(50.0, 16.0);
        f.reset();
        assert!(!f.is_initialized());
        assert_eq!(f.update(-7.25, 32.0), -7.25);
    }

    #[test]
    fn test_constant_input_stays_constant() {
        let mut f = AdaptiveFilter::new(FilterConfig::cursor());
        for i in 0..100 {
            let out = f.update(42.0, i as f64 * 16.0);
            assert_eq!(out, 42.0, "tick {} drifted to {}", i, out);
        }
    }

    #[test]
    fn test_converges_to_step() {
        let mut f = AdaptiveFilter::new(FilterConfig::cursor());
        f.update(0.0, 0.0);
        let mut out = 0.0;
        for i in 1..=600 {
            out = f.update(100.0, i as f64 * 16.0);
        }
        assert!((out - 100.0).abs() < 1e-3, "expected ~100, got {}", out);
    }

    #[test]
    fn test_smooths_step() {
        let mut f = AdaptiveFilter::new(FilterConfig::cursor());
        f.update(0.0, 0.0);
        let out = f.update(100.0, 16.0);
        assert!(out > 0.0 && out < 100.0, "expected partial step, got {}", out);
    }

    #[test]
    fn test_duplicate_timestamp_is_finite() {
        let mut f = AdaptiveFilter::new(FilterConfig::cursor());
        f.update(1.0, 100.0);
        let out = f.update(2.0, 100.0);
        assert!(out.is_finite());
        assert!((1.0..=2.0).contains(&out));
    }

    #[test]
    fn test_faster_motion_less_lag() {
        // Larger jump -> larger derivative -> higher cutoff -> follows a bigger fraction.
        let cfg = FilterConfig {
            min_cutoff: 1.0,
            beta: 0.05,
            d_cutoff: 1.0,
        };
        let mut slow = AdaptiveFilter::new(cfg);
        let mut fast = AdaptiveFilter::new(cfg);
        slow.update(0.0, 0.0);
        fast.update(0.0, 0.0);
        let slow_out = slow.update(1.0, 16.0);
        let fast_out = fast.update(100.0, 16.0) / 100.0;
        assert!(fast_out > slow_out, "fast {} vs slow {}", fast_out, slow_out);
    }
}
