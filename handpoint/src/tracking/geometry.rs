//! Landmark geometry: distances, hand scale, screen projection.
//!
//! All functions are pure.  Distances are measured in normalized landmark
//! space; dividing by [`hand_scale_norm`] makes thresholds independent of
//! hand size and camera distance.

use super::landmarks::{HandFrame, HandLandmark, Landmark, ScreenPoint, Viewport};

/// Floor for the hand scale so normalized distances stay finite.
pub const MIN_HAND_SCALE: f32 = 1e-4;

/// Euclidean distance between two landmarks.
pub fn distance(a: &Landmark, b: &Landmark) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dz = b.z - a.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Distance between two landmarks of the same frame.
pub fn landmark_distance(frame: &HandFrame, a: HandLandmark, b: HandLandmark) -> f32 {
    distance(&frame.get(a), &frame.get(b))
}

/// Wrist to index MCP distance, the reference unit for normalized distances.
pub fn hand_scale_norm(frame: &HandFrame) -> f32 {
    landmark_distance(frame, HandLandmark::Wrist, HandLandmark::IndexMcp).max(MIN_HAND_SCALE)
}

/// `distance(a, b) / hand_scale_norm(frame)`.
pub fn normalized_distance(frame: &HandFrame, a: HandLandmark, b: HandLandmark) -> f32 {
    landmark_distance(frame, a, b) / hand_scale_norm(frame)
}

/// Hand scale in display pixels, for the closeness intensity only.
pub fn hand_scale_px(frame: &HandFrame, viewport: &Viewport) -> f32 {
    hand_scale_norm(frame) * viewport.min_side()
}

/// Project a landmark into viewport pixels, mirroring the horizontal axis so
/// on-screen motion follows the user's own left/right.
pub fn project_to_screen(landmark: &Landmark, viewport: &Viewport) -> ScreenPoint {
    ScreenPoint {
        x: (1.0 - landmark.x) * viewport.width,
        y: landmark.y * viewport.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::landmarks::LANDMARK_COUNT;

    fn frame_with(points: &[(HandLandmark, Landmark)]) -> HandFrame {
        let mut frame = HandFrame::new([Landmark::default(); LANDMARK_COUNT]);
        for (which, lm) in points {
            frame.set(*which, *lm);
        }
        frame
    }

    #[test]
    fn test_distance() {
        let a = Landmark::new(0.0, 0.0, 0.0);
        let b = Landmark::new(3.0, 4.0, 0.0);
        assert!((distance(&a, &b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_hand_scale_norm() {
        let frame = frame_with(&[
            (HandLandmark::Wrist, Landmark::new(0.5, 0.8, 0.0)),
            (HandLandmark::IndexMcp, Landmark::new(0.5, 0.6, 0.0)),
        ]);
        assert!((hand_scale_norm(&frame) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_scale_floored() {
        let frame = frame_with(&[]);
        assert_eq!(hand_scale_norm(&frame), MIN_HAND_SCALE);
        let d = normalized_distance(&frame, HandLandmark::ThumbTip, HandLandmark::IndexTip);
        assert!(d.is_finite());
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_hand_scale_px_uses_min_side() {
        let frame = frame_with(&[
            (HandLandmark::Wrist, Landmark::new(0.5, 0.8, 0.0)),
            (HandLandmark::IndexMcp, Landmark::new(0.5, 0.6, 0.0)),
        ]);
        let px = hand_scale_px(&frame, &Viewport::new(1920.0, 1000.0));
        assert!((px - 200.0).abs() < 1e-3, "expected 200px, got {}", px);
    }

    #[test]
    fn test_projection_mirrors_x() {
        let vp = Viewport::new(1000.0, 500.0);
        let p = project_to_screen(&Landmark::new(0.25, 0.5, 0.0), &vp);
        assert!((p.x - 750.0).abs() < 1e-3);
        assert!((p.y - 250.0).abs() < 1e-3);

        let left_edge = project_to_screen(&Landmark::new(1.0, 0.0, 0.0), &vp);
        assert_eq!(left_edge.x, 0.0);
    }
}
