//! Thumbs-up pose: geometric classifier plus debounce.
//!
//! The classifier is stateless and re-evaluated every frame.  Debounce is
//! stricter than pinch since a false positive closes the open view.

use tracing::debug;

use super::geometry::{hand_scale_norm, landmark_distance};
use super::hysteresis::{Hysteresis, HysteresisConfig, Transition};
use super::landmarks::{HandFrame, HandLandmark};

/// Configuration for thumbs-up detection.
#[derive(Debug, Clone)]
pub struct ThumbsUpConfig {
    /// Tip-to-MCP distance (hand-scale units) under which a finger counts as curled.
    pub curl_threshold: f32,
    /// Frame counts for engaging/releasing.
    pub debounce: HysteresisConfig,
}

impl Default for ThumbsUpConfig {
    fn default() -> Self {
        Self {
            curl_threshold: 1.10,
            debounce: HysteresisConfig::new(4, 4),
        }
    }
}

/// Thumb chain extended upward: tip above IP above MCP, and tip above wrist.
/// Image `y` grows downward.
pub fn thumb_is_up(frame: &HandFrame) -> bool {
    let tip = frame.get(HandLandmark::ThumbTip);
    let ip = frame.get(HandLandmark::ThumbIp);
    let mcp = frame.get(HandLandmark::ThumbMcp);
    let wrist = frame.get(HandLandmark::Wrist);
    tip.y < ip.y && ip.y < mcp.y && tip.y < wrist.y
}

/// A finger is folded if its tip is below its PIP joint or close to its MCP.
fn finger_is_folded(
    frame: &HandFrame,
    (tip, pip, mcp): (HandLandmark, HandLandmark, HandLandmark),
    scale: f32,
    curl_threshold: f32,
) -> bool {
    frame.get(tip).y > frame.get(pip).y
        || landmark_distance(frame, tip, mcp) / scale < curl_threshold
}

/// Raw, undebounced thumbs-up classification.
pub fn is_thumbs_up(frame: &HandFrame, curl_threshold: f32) -> bool {
    if !thumb_is_up(frame) {
        return false;
    }
    let scale = hand_scale_norm(frame);
    HandLandmark::finger_chains()
        .into_iter()
        .all(|chain| finger_is_folded(frame, chain, scale, curl_threshold))
}

/// Debounced thumbs-up detector.
#[derive(Debug, Clone)]
pub struct ThumbsUpDetector {
    config: ThumbsUpConfig,
    latch: Hysteresis,
}

impl ThumbsUpDetector {
    pub fn new(config: ThumbsUpConfig) -> Self {
        let latch = Hysteresis::new(config.debounce);
        Self { config, latch }
    }

    /// Classify one frame and return the debounced state.
    pub fn update(&mut self, frame: &HandFrame) -> bool {
        let raw = is_thumbs_up(frame, self.config.curl_threshold);
        self.update_raw(raw)
    }

    /// Feed a precomputed raw classification.
    pub fn update_raw(&mut self, raw: bool) -> bool {
        match self.latch.step(raw, !raw) {
            Transition::Engaged => debug!("Thumbs-up engaged"),
            Transition::Released => debug!("Thumbs-up released"),
            Transition::None => {}
        }
        self.latch.is_engaged()
    }

    pub fn is_active(&self) -> bool {
        self.latch.is_engaged()
    }

    /// Keep the detector active until the pose is observed to go fully
    /// inactive, so one sustained pose cannot fire twice.
    pub fn hold_active(&mut self) {
        self.latch.hold_engaged();
    }

    pub fn streaks(&self) -> (u32, u32) {
        self.latch.streaks()
    }

    pub fn reset(&mut self) {
        self.latch.reset();
    }

    /// Generate s-expression for IPC status.
    pub fn status_sexp(&self) -> String {
        let (on, off) = self.streaks();
        format!(
            "(:active {} :on-streak {} :off-streak {})",
            if self.is_active() { "t" } else { "nil" },
            on,
            off,
        )
    }
}

impl Default for ThumbsUpDetector {
    fn default() -> Self {
        Self::new(ThumbsUpConfig::default())
    }
}
