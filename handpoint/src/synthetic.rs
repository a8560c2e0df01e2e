//! Deterministic synthetic hand poses.
//!
//! Builds plausible 21-landmark frames for a handful of poses, positioned by
//! wrist location and sized by hand scale (wrist to index MCP).  Used by the
//! headless driver and by tests in place of a live detector.

use crate::tracking::landmarks::{
    DetectionResult, HandFrame, HandLandmark, Landmark, LANDMARK_COUNT,
};

use HandLandmark::*;

/// Default hand scale in normalized image units.
pub const DEFAULT_SCALE: f32 = 0.1;

/// Pose shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoseKind {
    /// All fingers extended, thumb out to the side.
    Open,
    /// Fingers extended, thumb tip `gap` hand-scales from the index tip.
    Pinch { gap: f32 },
    /// Thumb pointing up, other fingers curled.
    ThumbsUp,
    /// All fingers curled, thumb tucked.
    Fist,
}

// Offsets from the wrist in hand-scale units, image y grows downward.
// Index MCP sits exactly one unit above the wrist.
const FINGERS_EXTENDED: [(HandLandmark, f32, f32); 16] = [
    (IndexMcp, 0.0, -1.0),
    (IndexPip, 0.0, -1.45),
    (IndexDip, 0.0, -1.85),
    (IndexTip, 0.0, -2.3),
    (MiddleMcp, 0.3, -0.95),
    (MiddlePip, 0.3, -1.45),
    (MiddleDip, 0.3, -1.9),
    (MiddleTip, 0.3, -2.4),
    (RingMcp, 0.55, -0.85),
    (RingPip, 0.55, -1.3),
    (RingDip, 0.55, -1.7),
    (RingTip, 0.55, -2.2),
    (PinkyMcp, 0.8, -0.7),
    (PinkyPip, 0.8, -1.05),
    (PinkyDip, 0.8, -1.45),
    (PinkyTip, 0.8, -1.9),
];

const FINGERS_CURLED: [(HandLandmark, f32, f32); 16] = [
    (IndexMcp, 0.0, -1.0),
    (IndexPip, 0.35, -1.0),
    (IndexDip, 0.45, -0.8),
    (IndexTip, 0.35, -0.7),
    (MiddleMcp, 0.1, -0.8),
    (MiddlePip, 0.4, -0.8),
    (MiddleDip, 0.5, -0.6),
    (MiddleTip, 0.4, -0.5),
    (RingMcp, 0.15, -0.6),
    (RingPip, 0.42, -0.58),
    (RingDip, 0.5, -0.42),
    (RingTip, 0.4, -0.35),
    (PinkyMcp, 0.2, -0.4),
    (PinkyPip, 0.42, -0.38),
    (PinkyDip, 0.48, -0.25),
    (PinkyTip, 0.4, -0.2),
];

const THUMB_SIDEWAYS: [(HandLandmark, f32, f32); 4] = [
    (ThumbCmc, -0.3, -0.2),
    (ThumbMcp, -0.6, -0.35),
    (ThumbIp, -0.85, -0.4),
    (ThumbTip, -1.1, -0.35),
];

const THUMB_UP: [(HandLandmark, f32, f32); 4] = [
    (ThumbCmc, -0.2, -0.2),
    (ThumbMcp, -0.3, -0.5),
    (ThumbIp, -0.35, -0.9),
    (ThumbTip, -0.4, -1.3),
];

const THUMB_TUCKED: [(HandLandmark, f32, f32); 4] = [
    (ThumbCmc, -0.2, -0.2),
    (ThumbMcp, -0.3, -0.5),
    (ThumbIp, -0.1, -0.7),
    (ThumbTip, 0.1, -0.4),
];

/// A synthetic hand pose at a given position and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPose {
    /// Wrist position in normalized image space.
    pub wrist_x: f32,
    pub wrist_y: f32,
    /// Wrist to index MCP distance.
    pub scale: f32,
    pub kind: PoseKind,
}

impl HandPose {
    pub fn new(kind: PoseKind, wrist_x: f32, wrist_y: f32) -> Self {
        Self {
            wrist_x,
            wrist_y,
            scale: DEFAULT_SCALE,
            kind,
        }
    }

    pub fn open(wrist_x: f32, wrist_y: f32) -> Self {
        Self::new(PoseKind::Open, wrist_x, wrist_y)
    }

    pub fn pinch(wrist_x: f32, wrist_y: f32, gap: f32) -> Self {
        Self::new(PoseKind::Pinch { gap }, wrist_x, wrist_y)
    }

    pub fn thumbs_up(wrist_x: f32, wrist_y: f32) -> Self {
        Self::new(PoseKind::ThumbsUp, wrist_x, wrist_y)
    }

    pub fn fist(wrist_x: f32, wrist_y: f32) -> Self {
        Self::new(PoseKind::Fist, wrist_x, wrist_y)
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    fn place(&self, dx: f32, dy: f32) -> Landmark {
        Landmark::new(self.wrist_x + dx * self.scale, self.wrist_y + dy * self.scale, 0.0)
    }

    fn apply(&self, frame: &mut HandFrame, offsets: &[(HandLandmark, f32, f32)]) {
        for &(which, dx, dy) in offsets {
            frame.set(which, self.place(dx, dy));
        }
    }

    /// Build the landmark frame.
    pub fn frame(&self) -> HandFrame {
        let mut frame = HandFrame::new([Landmark::default(); LANDMARK_COUNT]);
        frame.set(Wrist, self.place(0.0, 0.0));

        match self.kind {
            PoseKind::Open => {
                self.apply(&mut frame, &FINGERS_EXTENDED);
                self.apply(&mut frame, &THUMB_SIDEWAYS);
            }
            PoseKind::Pinch { gap } => {
                self.apply(&mut frame, &FINGERS_EXTENDED);
                self.apply(&mut frame, &THUMB_SIDEWAYS);
                // Bring the thumb tip `gap` units left of the index tip,
                // with the IP joint halfway between.
                let (_, tip_dx, tip_dy) = FINGERS_EXTENDED[3];
                frame.set(ThumbTip, self.place(tip_dx - gap, tip_dy));
                frame.set(ThumbIp, self.place((tip_dx - gap - 0.6) / 2.0, (tip_dy - 0.35) / 2.0));
            }
            PoseKind::ThumbsUp => {
                self.apply(&mut frame, &FINGERS_CURLED);
                self.apply(&mut frame, &THUMB_UP);
            }
            PoseKind::Fist => {
                self.apply(&mut frame, &FINGERS_CURLED);
                self.apply(&mut frame, &THUMB_TUCKED);
            }
        }
        frame
    }

    /// Wrap the frame in a detection result.
    pub fn at(&self, timestamp_ms: f64) -> DetectionResult {
        DetectionResult::present(self.frame(), timestamp_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::geometry::{hand_scale_norm, normalized_distance};

    #[test]
    fn test_scale_is_exact() {
        for pose in [
            HandPose::open(0.5, 0.8),
            HandPose::thumbs_up(0.3, 0.6).with_scale(0.15),
            HandPose::fist(0.7, 0.7).with_scale(0.05),
        ] {
            let s = hand_scale_norm(&pose.frame());
            assert!((s - pose.scale).abs() < 1e-5, "{:?}: scale {}", pose.kind, s);
        }
    }

    #[test]
    fn test_pinch_gap() {
        for gap in [0.05, 0.1, 0.45, 0.8] {
            let frame = HandPose::pinch(0.5, 0.8, gap).frame();
            let d = normalized_distance(&frame, ThumbTip, IndexTip);
            assert!((d - gap).abs() < 1e-3, "gap {} measured {}", gap, d);
        }
    }

    #[test]
    fn test_all_landmarks_in_image() {
        for pose in [
            HandPose::open(0.5, 0.8),
            HandPose::pinch(0.5, 0.8, 0.1),
            HandPose::thumbs_up(0.5, 0.8),
            HandPose::fist(0.5, 0.8),
        ] {
            for lm in pose.frame().landmarks() {
                assert!((0.0..=1.0).contains(&lm.x) && (0.0..=1.0).contains(&lm.y));
            }
        }
    }
}
