//! Pinch detection: thumb tip to index tip, debounced with hysteresis.
//!
//! The detector exposes only the level (`is_closed`).  Edges and the
//! "consume once" policy belong to the interpreter.

use tracing::debug;

use super::geometry::normalized_distance;
use super::hysteresis::{Hysteresis, HysteresisConfig, Transition};
use super::landmarks::{HandFrame, HandLandmark};

/// Configuration for pinch detection.
#[derive(Debug, Clone)]
pub struct PinchConfig {
    /// Normalized distance below which a frame counts toward closing.
    pub on_threshold: f32,
    /// Normalized distance above which a frame counts toward opening.
    pub off_threshold: f32,
    /// Frame counts for closing/opening.
    pub debounce: HysteresisConfig,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            on_threshold: 0.30,
            off_threshold: 0.60,
            debounce: HysteresisConfig::new(2, 3),
        }
    }
}

/// Debounced pinch state machine.
#[derive(Debug, Clone)]
pub struct PinchDetector {
    config: PinchConfig,
    latch: Hysteresis,
    last_distance: Option<f32>,
}

impl PinchDetector {
    pub fn new(config: PinchConfig) -> Self {
        let latch = Hysteresis::new(config.debounce);
        Self {
            config,
            latch,
            last_distance: None,
        }
    }

    /// Thumb tip to index tip distance, in hand-scale units.
    pub fn pinch_distance(frame: &HandFrame) -> f32 {
        normalized_distance(frame, HandLandmark::ThumbTip, HandLandmark::IndexTip)
    }

    /// Feed one frame and return whether the pinch is closed.
    pub fn update(&mut self, frame: &HandFrame) -> bool {
        self.update_distance(Self::pinch_distance(frame))
    }

    /// Feed a precomputed normalized distance.
    pub fn update_distance(&mut self, norm_dist: f32) -> bool {
        self.last_distance = Some(norm_dist);
        let engage = norm_dist < self.config.on_threshold;
        let release = norm_dist > self.config.off_threshold;
        match self.latch.step(engage, release) {
            Transition::Engaged => debug!("Pinch closed (dist={:.3})", norm_dist),
            Transition::Released => debug!("Pinch opened (dist={:.3})", norm_dist),
            Transition::None => {}
        }
        self.latch.is_engaged()
    }

    pub fn is_closed(&self) -> bool {
        self.latch.is_engaged()
    }

    /// (on_streak, off_streak).
    pub fn streaks(&self) -> (u32, u32) {
        self.latch.streaks()
    }

    pub fn reset(&mut self) {
        self.latch.reset();
        self.last_distance = None;
    }

    /// Generate s-expression for IPC status.
    pub fn status_sexp(&self) -> String {
        let (on, off) = self.streaks();
        let dist = self
            .last_distance
            .map(|d| format!("{:.3}", d))
            .unwrap_or_else(|| "nil".to_string());
        format!(
            "(:closed {} :distance {} :on-streak {} :off-streak {})",
            if self.is_closed() { "t" } else { "nil" },
            dist,
            on,
            off,
        )
    }
}

impl Default for PinchDetector {
    fn default() -> Self {
        Self::new(PinchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::HandPose;

    #[test]
    fn test_activation_on_nth_frame() {
        let mut pinch = PinchDetector::default();
        let on_frames = PinchConfig::default().debounce.on_frames;
        for i in 1..on_frames {
            assert!(!pinch.update_distance(0.10), "closed early on frame {}", i);
        }
        assert!(pinch.update_distance(0.10), "should close on frame {}", on_frames);
        assert_eq!(pinch.streaks(), (0, 0));
    }

    #[test]
    fn test_hysteresis_gap_never_toggles() {
        let mut pinch = PinchDetector::default();
        for i in 0..500 {
            let d = if i % 2 == 0 { 0.31 } else { 0.59 };
            assert!(!pinch.update_distance(d), "toggled at tick {}", i);
        }

        // Same from the closed side.
        pinch.update_distance(0.1);
        pinch.update_distance(0.1);
        assert!(pinch.is_closed());
        for i in 0..500 {
            let d = if i % 2 == 0 { 0.31 } else { 0.59 };
            assert!(pinch.update_distance(d), "released at tick {}", i);
        }
    }

    #[test]
    fn test_release_needs_off_frames() {
        let mut pinch = PinchDetector::default();
        pinch.update_distance(0.1);
        pinch.update_distance(0.1);
        assert!(pinch.is_closed());

        assert!(pinch.update_distance(0.9));
        assert!(pinch.update_distance(0.9));
        assert!(pinch.update_distance(0.5), "in-gap frame breaks the release streak");
        assert!(pinch.update_distance(0.9));
        assert!(pinch.update_distance(0.9));
        assert!(!pinch.update_distance(0.9));
    }

    #[test]
    fn test_single_frame_noise_rejected() {
        let mut pinch = PinchDetector::default();
        for _ in 0..10 {
            pinch.update_distance(0.8);
            pinch.update_distance(0.1);
        }
        assert!(!pinch.is_closed());
    }

    #[test]
    fn test_from_frames() {
        let mut pinch = PinchDetector::default();
        let closed = HandPose::pinch(0.5, 0.8, 0.1).frame();
        let d = PinchDetector::pinch_distance(&closed);
        assert!((d - 0.1).abs() < 1e-3, "expected ~0.1, got {}", d);

        assert!(!pinch.update(&closed));
        assert!(pinch.update(&closed));

        let open = HandPose::open(0.5, 0.8).frame();
        assert!(PinchDetector::pinch_distance(&open) > 0.6);
    }

    #[test]
    fn test_reset() {
        let mut pinch = PinchDetector::default();
        pinch.update_distance(0.1);
        pinch.update_distance(0.1);
        pinch.reset();
        assert!(!pinch.is_closed());
        assert_eq!(pinch.streaks(), (0, 0));
        assert!(pinch.status_sexp().contains(":distance nil"));
    }

    #[test]
    fn test_status_sexp() {
        let mut pinch = PinchDetector::default();
        pinch.update_distance(0.25);
        let sexp = pinch.status_sexp();
        assert!(sexp.contains(":closed nil"));
        assert!(sexp.contains(":distance 0.250"));
        assert!(sexp.contains(":on-streak 1"));
    }
}
