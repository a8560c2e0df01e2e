//! Hand landmark stream interpretation.
//!
//! Provides:
//! - `landmarks`: 21-point hand frames, viewport and screen types
//! - `one_euro`: adaptive low-pass filter for one scalar signal
//! - `geometry`: distances, hand scale, screen projection
//! - `scale` / `cursor`: smoothed closeness intensity and cursor
//! - `hysteresis`: two-state debounce latch shared by the gesture detectors
//! - `pinch` / `thumbs_up`: debounced gesture detectors
//! - `hover`: dwell-filtered hover target selection
//! - `interpreter`: per-tick orchestration and event emission

pub mod cursor;
pub mod geometry;
pub mod hover;
pub mod hysteresis;
pub mod interpreter;
pub mod landmarks;
pub mod one_euro;
pub mod pinch;
pub mod scale;
pub mod thumbs_up;

pub use cursor::{CursorConfig, CursorTracker};
pub use hover::{HoverChange, HoverConfig, HoverStabilizer};
pub use hysteresis::{Hysteresis, HysteresisConfig, LatchState};
pub use interpreter::{
    CloseGesture, FrameInterpreter, HitTest, InterpreterConfig, InterpreterEvent, Mode,
    PointerState, TargetClass, TickOutput, TrackingStatus,
};
pub use landmarks::{DetectionResult, HandFrame, HandLandmark, Landmark, ScreenPoint, Viewport};
pub use one_euro::{AdaptiveFilter, FilterConfig};
pub use pinch::{PinchConfig, PinchDetector};
pub use scale::{ScaleConfig, ScaleSample, ScaleTracker};
pub use thumbs_up::{ThumbsUpConfig, ThumbsUpDetector};
