//! handpoint - hand-landmark pointing and gesture interface.
//!
//! Turns a noisy per-frame stream of hand landmarks into a smoothed screen
//! cursor, a closeness intensity, and debounced Open/Close/hover events.

pub mod synthetic;
pub mod tracking;

pub use tracking::{
    CloseGesture, DetectionResult, FrameInterpreter, HandFrame, HitTest, InterpreterConfig,
    InterpreterEvent, Mode, PointerState, ScreenPoint, TargetClass, TickOutput, TrackingStatus,
    Viewport,
};
