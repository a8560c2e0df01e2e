//! Hand closeness tracking.
//!
//! Smooths the raw hand size (in display pixels) and remaps it to a
//! normalized intensity `t` in `[0, 1]` between a calibrated "far" and
//! "near" size.  `t` drives visual feedback only; it has no gesture meaning.

use tracing::{debug, trace};

use super::geometry::hand_scale_px;
use super::landmarks::{HandFrame, Viewport};
use super::one_euro::{AdaptiveFilter, FilterConfig};

// ── Config ─────────────────────────────────────────────────

/// Configuration for the closeness remap.
#[derive(Debug, Clone)]
pub struct ScaleConfig {
    /// Filter tuning for the pixel hand scale.
    pub filter: FilterConfig,
    /// Smoothed hand scale (px) mapped to `t = 0`.
    pub far_px: f32,
    /// Smoothed hand scale (px) mapped to `t = 1`.
    pub near_px: f32,
    /// Interval between calibration diagnostics (ms).
    pub diagnostic_interval_ms: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig::scale(),
            far_px: 70.0,
            near_px: 150.0,
            diagnostic_interval_ms: 1200.0,
        }
    }
}

// ── Diagnostics ────────────────────────────────────────────

/// Raw vs smoothed scale sample, for calibrating `far_px`/`near_px`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSample {
    pub raw_px: f32,
    pub smoothed_px: f32,
    pub t: f32,
}

// ── Easing ─────────────────────────────────────────────────

/// Smoothstep easing on `[0, 1]`, monotone non-decreasing.
pub fn ease(u: f32) -> f32 {
    let u = u.clamp(0.0, 1.0);
    u * u * (3.0 - 2.0 * u)
}

/// Clamped-linear remap of `px` between `far` and `near`, then eased.
pub fn closeness(px: f32, far: f32, near: f32) -> f32 {
    let span = near - far;
    if span.abs() <= f32::EPSILON {
        return if px >= near { 1.0 } else { 0.0 };
    }
    ease(((px - far) / span).clamp(0.0, 1.0))
}

// ── Tracker ────────────────────────────────────────────────

/// Smoothed hand-size tracker.
#[derive(Debug, Clone)]
pub struct ScaleTracker {
    config: ScaleConfig,
    filter: AdaptiveFilter,
    /// Most recent intensity.
    t: f32,
    /// Most recent raw/smoothed sample.
    last_sample: Option<ScaleSample>,
    /// Timestamp of the last emitted diagnostic.
    last_diagnostic_ms: Option<f64>,
}

impl ScaleTracker {
    pub fn new(config: ScaleConfig) -> Self {
        let filter = AdaptiveFilter::new(config.filter);
        Self {
            config,
            filter,
            t: 0.0,
            last_sample: None,
            last_diagnostic_ms: None,
        }
    }

    /// Feed one frame and return the intensity `t`.
    pub fn update(&mut self, frame: &HandFrame, viewport: &Viewport, timestamp_ms: f64) -> f32 {
        let raw_px = hand_scale_px(frame, viewport);
        let smoothed_px = self.filter.update(raw_px as f64, timestamp_ms) as f32;
        self.t = closeness(smoothed_px, self.config.far_px, self.config.near_px);
        self.last_sample = Some(ScaleSample {
            raw_px,
            smoothed_px,
            t: self.t,
        });
        trace!("scale raw={:.1}px smoothed={:.1}px t={:.3}", raw_px, smoothed_px, self.t);
        self.t
    }

    /// Current intensity without consuming a sample.
    pub fn intensity(&self) -> f32 {
        self.t
    }

    pub fn last_sample(&self) -> Option<ScaleSample> {
        self.last_sample
    }

    /// Return the latest sample if the diagnostic interval has elapsed.
    pub fn poll_diagnostic(&mut self, timestamp_ms: f64) -> Option<ScaleSample> {
        let sample = self.last_sample?;
        let due = match self.last_diagnostic_ms {
            Some(last) => timestamp_ms - last >= self.config.diagnostic_interval_ms,
            None => true,
        };
        if !due {
            return None;
        }
        self.last_diagnostic_ms = Some(timestamp_ms);
        debug!(
            "Scale calibration: raw={:.1}px smoothed={:.1}px t={:.2} (far={:.0} near={:.0})",
            sample.raw_px, sample.smoothed_px, sample.t, self.config.far_px, self.config.near_px,
        );
        Some(sample)
    }

    /// Reset filter state.  The last intensity is kept for display.
    pub fn reset(&mut self) {
        self.filter.reset();
        self.last_sample = None;
    }

    /// Generate s-expression for IPC status.
    pub fn status_sexp(&self) -> String {
        match self.last_sample {
            Some(s) => format!(
                "(:t {:.3} :raw-px {:.1} :smoothed-px {:.1} :far-px {:.0} :near-px {:.0})",
                self.t, s.raw_px, s.smoothed_px, self.config.far_px, self.config.near_px,
            ),
            None => format!(
                "(:t {:.3} :raw-px nil :smoothed-px nil :far-px {:.0} :near-px {:.0})",
                self.t, self.config.far_px, self.config.near_px,
            ),
        }
    }
}

impl Default for ScaleTracker {
    fn default() -> Self {
        Self::new(ScaleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::HandPose;

    #[test]
    fn test_closeness_clamped() {
        assert_eq!(closeness(10.0, 70.0, 150.0), 0.0);
        assert_eq!(closeness(70.0, 70.0, 150.0), 0.0);
        assert_eq!(closeness(150.0, 70.0, 150.0), 1.0);
        assert_eq!(closeness(400.0, 70.0, 150.0), 1.0);
        let mid = closeness(110.0, 70.0, 150.0);
        assert!((mid - 0.5).abs() < 1e-6, "expected 0.5, got {}", mid);
    }

    #[test]
    fn test_closeness_monotone() {
        let mut prev = closeness(0.0, 70.0, 150.0);
        for i in 1..=300 {
            let t = closeness(i as f32, 70.0, 150.0);
            assert!(t >= prev, "t decreased at {}px: {} < {}", i, t, prev);
            assert!((0.0..=1.0).contains(&t));
            prev = t;
        }
    }

    #[test]
    fn test_closeness_degenerate_span() {
        assert_eq!(closeness(99.0, 100.0, 100.0), 0.0);
        assert_eq!(closeness(100.0, 100.0, 100.0), 1.0);
    }

    #[test]
    fn test_first_update_unsmoothed() {
        let mut tracker = ScaleTracker::default();
        let vp = Viewport::new(1000.0, 1000.0);
        // scale 0.11 * 1000 = 110px -> halfway between 70 and 150
        let frame = HandPose::open(0.5, 0.5).with_scale(0.11).frame();
        let t = tracker.update(&frame, &vp, 0.0);
        assert!((t - 0.5).abs() < 1e-3, "expected ~0.5, got {}", t);
        let sample = tracker.last_sample().expect("sample recorded");
        assert_eq!(sample.raw_px, sample.smoothed_px);
    }

    #[test]
    fn test_diagnostic_interval() {
        let mut tracker = ScaleTracker::default();
        let vp = Viewport::new(800.0, 600.0);
        let frame = HandPose::open(0.5, 0.5).frame();

        assert!(tracker.poll_diagnostic(0.0).is_none(), "no sample yet");
        tracker.update(&frame, &vp, 0.0);
        assert!(tracker.poll_diagnostic(0.0).is_some());
        tracker.update(&frame, &vp, 500.0);
        assert!(tracker.poll_diagnostic(500.0).is_none());
        tracker.update(&frame, &vp, 1200.0);
        assert!(tracker.poll_diagnostic(1200.0).is_some());
    }

    #[test]
    fn test_reset_keeps_intensity() {
        let mut tracker = ScaleTracker::default();
        let vp = Viewport::new(1000.0, 1000.0);
        let frame = HandPose::open(0.5, 0.5).with_scale(0.2).frame();
        tracker.update(&frame, &vp, 0.0);
        assert_eq!(tracker.intensity(), 1.0);
        tracker.reset();
        assert_eq!(tracker.intensity(), 1.0);
        assert!(tracker.last_sample().is_none());
    }

    #[test]
    fn test_status_sexp() {
        let tracker = ScaleTracker::default();
        let sexp = tracker.status_sexp();
        assert!(sexp.contains(":raw-px nil"));
        assert!(sexp.contains(":far-px 70"));
        assert!(sexp.contains(":near-px 150"));
    }
}
