//! Hand landmark data structures.
//!
//! Models the 21-point hand landmark set produced by a monocular hand
//! detector, in normalized image coordinates.  Also carries the display
//! viewport and screen-space point types shared by the trackers.

// ── Landmark indices ───────────────────────────────────────

/// The 21 anatomical landmarks of one detected hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// Total number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

impl HandLandmark {
    /// Convert landmark enum to array index (0-20).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// String representation for IPC.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wrist => "wrist",
            Self::ThumbCmc => "thumb-cmc",
            Self::ThumbMcp => "thumb-mcp",
            Self::ThumbIp => "thumb-ip",
            Self::ThumbTip => "thumb-tip",
            Self::IndexMcp => "index-mcp",
            Self::IndexPip => "index-pip",
            Self::IndexDip => "index-dip",
            Self::IndexTip => "index-tip",
            Self::MiddleMcp => "middle-mcp",
            Self::MiddlePip => "middle-pip",
            Self::MiddleDip => "middle-dip",
            Self::MiddleTip => "middle-tip",
            Self::RingMcp => "ring-mcp",
            Self::RingPip => "ring-pip",
            Self::RingDip => "ring-dip",
            Self::RingTip => "ring-tip",
            Self::PinkyMcp => "pinky-mcp",
            Self::PinkyPip => "pinky-pip",
            Self::PinkyDip => "pinky-dip",
            Self::PinkyTip => "pinky-tip",
        }
    }

    /// (tip, pip, mcp) for the four non-thumb fingers.
    pub fn finger_chains() -> [(HandLandmark, HandLandmark, HandLandmark); 4] {
        [
            (Self::IndexTip, Self::IndexPip, Self::IndexMcp),
            (Self::MiddleTip, Self::MiddlePip, Self::MiddleMcp),
            (Self::RingTip, Self::RingPip, Self::RingMcp),
            (Self::PinkyTip, Self::PinkyPip, Self::PinkyMcp),
        ]
    }
}

// ── Landmark ───────────────────────────────────────────────

/// One tracked point in normalized image space.
///
/// `x` and `y` are in `[0, 1]` with `y` growing downward; `z` is the
/// detector's relative depth estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

// ── Hand frame ─────────────────────────────────────────────

/// Full landmark set for one detected hand at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct HandFrame {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl HandFrame {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    /// Build a frame from a flat `[x, y, z] * 21` slice as delivered by a
    /// detector binding.  Returns `None` unless the slice holds exactly 63 values.
    pub fn from_slice(flat: &[f32]) -> Option<Self> {
        if flat.len() != LANDMARK_COUNT * 3 {
            return None;
        }
        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (i, chunk) in flat.chunks_exact(3).enumerate() {
            landmarks[i] = Landmark::new(chunk[0], chunk[1], chunk[2]);
        }
        Some(Self { landmarks })
    }

    /// Get a landmark by anatomical name.
    pub fn get(&self, landmark: HandLandmark) -> Landmark {
        self.landmarks[landmark.index()]
    }

    /// Mutable access, used by pose builders.
    pub fn set(&mut self, landmark: HandLandmark, value: Landmark) {
        self.landmarks[landmark.index()] = value;
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }
}

// ── Detection result ───────────────────────────────────────

/// Output of the external detector for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    /// Zero or one detected hand.
    pub hand: Option<HandFrame>,
    /// Monotonic timestamp in milliseconds.
    pub timestamp_ms: f64,
}

impl DetectionResult {
    pub fn present(hand: HandFrame, timestamp_ms: f64) -> Self {
        Self {
            hand: Some(hand),
            timestamp_ms,
        }
    }

    pub fn absent(timestamp_ms: f64) -> Self {
        Self {
            hand: None,
            timestamp_ms,
        }
    }
}

// ── Display space ──────────────────────────────────────────

/// Display viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Dimensions are clamped to at least one pixel.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

/// A point in display pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
