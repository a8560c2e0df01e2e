//! Per-frame landmark stream interpreter.
//!
//! Drives the cursor and scale trackers, the pinch and thumbs-up detectors
//! and the hover stabilizer from one detection result per tick, and emits
//! the pointer state plus discrete Open/Close/hover events.  The host owns
//! timing: each call to [`FrameInterpreter::advance`] is one synchronous
//! tick with no internal scheduling.

use std::fmt::Debug;

use tracing::{debug, info};

use super::cursor::{CursorConfig, CursorTracker};
use super::hover::{HoverChange, HoverConfig, HoverStabilizer};
use super::landmarks::{DetectionResult, HandFrame, ScreenPoint, Viewport};
use super::pinch::{PinchConfig, PinchDetector};
use super::scale::{ScaleConfig, ScaleSample, ScaleTracker};
use super::thumbs_up::{ThumbsUpConfig, ThumbsUpDetector};

// ── Mode ───────────────────────────────────────────────────

/// Interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Pointing at selectable items; pinch opens.
    Browsing,
    /// An item is open; thumbs-up closes.
    Viewing,
}

impl Mode {
    /// String representation for IPC.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Browsing => "browsing",
            Self::Viewing => "viewing",
        }
    }

    /// Target class eligible for hover in this mode.
    pub fn eligible_class(&self) -> TargetClass {
        match self {
            Self::Browsing => TargetClass::Item,
            Self::Viewing => TargetClass::CloseAffordance,
        }
    }
}

/// Classes of hit-test targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetClass {
    /// A selectable item (e.g. a thumbnail).
    Item,
    /// The viewer's close button.
    CloseAffordance,
}

/// Which gestures close the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseGesture {
    /// Only a debounced thumbs-up closes; pinch is inert while viewing.
    ThumbsUp,
    /// Thumbs-up, or a pinch while the close affordance is hovered.
    ThumbsUpOrPinch,
}

impl CloseGesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThumbsUp => "thumbs-up",
            Self::ThumbsUpOrPinch => "thumbs-up-or-pinch",
        }
    }
}

// ── Hit testing ────────────────────────────────────────────

/// Hit-test capability supplied by the presentation layer.
///
/// Returns the topmost element of class `class` under `point`, if any.
pub trait HitTest<T> {
    fn hit_test(&self, point: ScreenPoint, class: TargetClass) -> Option<T>;
}

impl<T, F> HitTest<T> for F
where
    F: Fn(ScreenPoint, TargetClass) -> Option<T>,
{
    fn hit_test(&self, point: ScreenPoint, class: TargetClass) -> Option<T> {
        self(point, class)
    }
}

// ── Output ─────────────────────────────────────────────────

/// Discrete events emitted by a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum InterpreterEvent<T> {
    /// The committed hover target changed.
    HoverChanged { previous: Option<T>, next: Option<T> },
    /// An item was opened.
    Open(T),
    /// The viewer was closed.
    Close,
}

impl<T> From<HoverChange<T>> for InterpreterEvent<T> {
    fn from(change: HoverChange<T>) -> Self {
        Self::HoverChanged {
            previous: change.previous,
            next: change.next,
        }
    }
}

/// Hand tracking status for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingStatus {
    /// A hand is present this tick.
    Tracking,
    /// No hand, but still inside the grace window; output is held.
    Holding,
    /// No hand beyond the grace window, or never seen.
    Lost,
}

impl TrackingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tracking => "tracking",
            Self::Holding => "holding",
            Self::Lost => "lost",
        }
    }
}

/// Continuous pointer output.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerState<T> {
    /// Smoothed cursor in display pixels; `None` until a hand is first seen.
    pub cursor: Option<ScreenPoint>,
    /// Closeness intensity in `[0, 1]`.
    pub intensity: f32,
    pub mode: Mode,
    pub hovered: Option<T>,
    pub tracking: TrackingStatus,
    /// Timestamp of the last tick with a hand (ms).
    pub last_seen_ms: Option<f64>,
}

/// Everything one tick produces.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutput<T> {
    pub pointer: PointerState<T>,
    pub events: Vec<InterpreterEvent<T>>,
    /// Periodic raw/smoothed scale sample for calibration.
    pub diagnostic: Option<ScaleSample>,
}

// ── Config ─────────────────────────────────────────────────

/// Configuration for the interpreter and all of its components.
#[derive(Debug, Clone)]
pub struct InterpreterConfig {
    /// When disabled, ticks return the held output with no events.
    pub enabled: bool,
    /// Tolerated hand absence before all state is reset (ms).
    pub grace_ms: f64,
    pub close_gesture: CloseGesture,
    pub cursor: CursorConfig,
    pub scale: ScaleConfig,
    pub pinch: PinchConfig,
    pub thumbs_up: ThumbsUpConfig,
    pub hover: HoverConfig,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            grace_ms: 350.0,
            close_gesture: CloseGesture::ThumbsUp,
            cursor: CursorConfig::default(),
            scale: ScaleConfig::default(),
            pinch: PinchConfig::default(),
            thumbs_up: ThumbsUpConfig::default(),
            hover: HoverConfig::default(),
        }
    }
}

// ── Interpreter ────────────────────────────────────────────

/// Session-long interpreter state.  One instance per session.
pub struct FrameInterpreter<T> {
    /// Configuration.
    config: InterpreterConfig,
    mode: Mode,
    cursor: CursorTracker,
    scale: ScaleTracker,
    pinch: PinchDetector,
    thumbs_up: ThumbsUpDetector,
    hover: HoverStabilizer<T>,
    /// Item opened in the viewer.
    selected: Option<T>,
    /// Previous tick's pinch level, for edge detection.
    prev_pinch: bool,
    /// Previous tick's thumbs-up level, for edge detection.
    prev_thumbs_up: bool,
    last_seen_ms: Option<f64>,
    last_tick_ms: Option<f64>,
    /// Set once the grace window has expired and state was reset.
    lost: bool,
    /// Output of the last processed tick.
    pointer: PointerState<T>,
}

impl<T: Clone + PartialEq + Debug> FrameInterpreter<T> {
    pub fn new(config: InterpreterConfig) -> Self {
        Self {
            mode: Mode::Browsing,
            cursor: CursorTracker::new(config.cursor.clone()),
            scale: ScaleTracker::new(config.scale.clone()),
            pinch: PinchDetector::new(config.pinch.clone()),
            thumbs_up: ThumbsUpDetector::new(config.thumbs_up.clone()),
            hover: HoverStabilizer::new(config.hover.clone()),
            selected: None,
            prev_pinch: false,
            prev_thumbs_up: false,
            last_seen_ms: None,
            last_tick_ms: None,
            lost: true,
            pointer: PointerState {
                cursor: None,
                intensity: 0.0,
                mode: Mode::Browsing,
                hovered: None,
                tracking: TrackingStatus::Lost,
                last_seen_ms: None,
            },
            config,
        }
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    pub fn hovered(&self) -> Option<&T> {
        self.hover.current()
    }

    /// Enable or pause interpretation.  While paused, ticks return the held
    /// output with no events.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        info!("Hand interpreter {}", if enabled { "enabled" } else { "disabled" });
    }

    /// Pointer state of the last processed tick.
    pub fn pointer(&self) -> &PointerState<T> {
        &self.pointer
    }

    /// Process one detection result.
    pub fn advance<H: HitTest<T>>(
        &mut self,
        detection: &DetectionResult,
        viewport: &Viewport,
        hit_test: &H,
    ) -> TickOutput<T> {
        if !self.config.enabled {
            return self.held();
        }

        let ts = detection.timestamp_ms;
        if let Some(last) = self.last_tick_ms {
            if ts <= last {
                return self.held();
            }
        }
        self.last_tick_ms = Some(ts);

        let mut events = Vec::new();
        let (tracking, diagnostic) = match &detection.hand {
            Some(frame) => {
                self.hand_present(frame, ts, viewport, hit_test, &mut events);
                (TrackingStatus::Tracking, self.scale.poll_diagnostic(ts))
            }
            None => (self.hand_absent(ts, &mut events), None),
        };

        self.pointer = self.snapshot(tracking);
        TickOutput {
            pointer: self.pointer.clone(),
            events,
            diagnostic,
        }
    }

    fn hand_present<H: HitTest<T>>(
        &mut self,
        frame: &HandFrame,
        ts: f64,
        viewport: &Viewport,
        hit_test: &H,
        events: &mut Vec<InterpreterEvent<T>>,
    ) {
        if self.lost {
            debug!("Hand acquired at {:.0}ms", ts);
        }
        self.last_seen_ms = Some(ts);
        self.lost = false;

        let cursor = self.cursor.update(frame, viewport, ts);
        self.scale.update(frame, viewport, ts);

        let raw_hit = hit_test.hit_test(cursor, self.mode.eligible_class());
        if let Some(change) = self.hover.update(raw_hit, ts) {
            events.push(change.into());
        }

        let pinching = self.pinch.update(frame);
        let pinch_edge = pinching && !self.prev_pinch;
        self.prev_pinch = pinching;

        let thumbs_up = self.thumbs_up.update(frame);
        let thumbs_up_edge = thumbs_up && !self.prev_thumbs_up;
        self.prev_thumbs_up = thumbs_up;

        match self.mode {
            Mode::Browsing => {
                if pinch_edge {
                    match self.hover.current().cloned() {
                        Some(item) => self.enter_viewing(item, events),
                        None => debug!("Pinch with nothing hovered; ignored"),
                    }
                }
            }
            Mode::Viewing => {
                let pinch_close = pinch_edge
                    && self.config.close_gesture == CloseGesture::ThumbsUpOrPinch
                    && self.hover.current().is_some();
                if thumbs_up_edge || pinch_close {
                    self.exit_viewing(events);
                    // The pose that fired stays latched until it is seen fully released.
                    self.thumbs_up.hold_active();
                    self.prev_thumbs_up = self.thumbs_up.is_active();
                }
            }
        }
    }

    fn hand_absent(&mut self, ts: f64, events: &mut Vec<InterpreterEvent<T>>) -> TrackingStatus {
        match self.last_seen_ms {
            Some(seen) if ts - seen <= self.config.grace_ms => TrackingStatus::Holding,
            Some(seen) => {
                if !self.lost {
                    debug!(
                        "Hand lost for {:.0}ms (grace {:.0}ms); resetting trackers",
                        ts - seen,
                        self.config.grace_ms
                    );
                    self.expire(events);
                }
                TrackingStatus::Lost
            }
            None => TrackingStatus::Lost,
        }
    }

    /// Hard reset of filters, detectors and hover.  Mode is preserved.
    fn expire(&mut self, events: &mut Vec<InterpreterEvent<T>>) {
        if let Some(change) = self.hover.clear() {
            events.push(change.into());
        }
        self.cursor.reset();
        self.scale.reset();
        self.pinch.reset();
        self.thumbs_up.reset();
        self.prev_pinch = false;
        self.prev_thumbs_up = false;
        self.lost = true;
    }

    fn enter_viewing(&mut self, item: T, events: &mut Vec<InterpreterEvent<T>>) {
        info!("Open {:?}", item);
        self.selected = Some(item.clone());
        self.mode = Mode::Viewing;
        events.push(InterpreterEvent::Open(item));
        // Items are not eligible while viewing.
        if let Some(change) = self.hover.clear() {
            events.push(change.into());
        }
    }

    fn exit_viewing(&mut self, events: &mut Vec<InterpreterEvent<T>>) {
        info!("Close {:?}", self.selected);
        self.mode = Mode::Browsing;
        self.selected = None;
        events.push(InterpreterEvent::Close);
        if let Some(change) = self.hover.clear() {
            events.push(change.into());
        }
    }

    /// Open `item` from a non-gesture input.  No-op while already viewing.
    pub fn open(&mut self, item: T) -> Vec<InterpreterEvent<T>> {
        let mut events = Vec::new();
        if self.mode == Mode::Viewing {
            debug!("Open {:?} ignored; already viewing {:?}", item, self.selected);
            return events;
        }
        self.enter_viewing(item, &mut events);
        self.refresh_pointer();
        events
    }

    /// Close the viewer from a non-gesture input.  No-op while browsing.
    pub fn close(&mut self) -> Vec<InterpreterEvent<T>> {
        let mut events = Vec::new();
        if self.mode == Mode::Browsing {
            return events;
        }
        self.exit_viewing(&mut events);
        self.refresh_pointer();
        events
    }

    /// Discard all session state.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    fn held(&self) -> TickOutput<T> {
        TickOutput {
            pointer: self.pointer.clone(),
            events: Vec::new(),
            diagnostic: None,
        }
    }

    fn refresh_pointer(&mut self) {
        self.pointer.mode = self.mode;
        self.pointer.hovered = self.hover.current().cloned();
    }

    fn snapshot(&self, tracking: TrackingStatus) -> PointerState<T> {
        PointerState {
            cursor: self.cursor.last_known(),
            intensity: self.scale.intensity(),
            mode: self.mode,
            hovered: self.hover.current().cloned(),
            tracking,
            last_seen_ms: self.last_seen_ms,
        }
    }

    /// Generate s-expression for IPC status.
    pub fn status_sexp(&self) -> String {
        let cursor = self
            .pointer
            .cursor
            .map(|p| format!("({:.1} {:.1})", p.x, p.y))
            .unwrap_or_else(|| "nil".to_string());
        format!(
            "(:enabled {} :mode {} :tracking {} :cursor {} :intensity {:.3} :selected {} :pinch {} :thumbs-up {} :hover {} :scale {})",
            if self.config.enabled { "t" } else { "nil" },
            self.mode.as_str(),
            self.pointer.tracking.as_str(),
            cursor,
            self.pointer.intensity,
            self.selected
                .as_ref()
                .map(|s| format!("\"{:?}\"", s))
                .unwrap_or_else(|| "nil".to_string()),
            self.pinch.status_sexp(),
            self.thumbs_up.status_sexp(),
            self.hover.status_sexp(),
            self.scale.status_sexp(),
        )
    }

    /// Generate s-expression for IPC config.
    pub fn config_sexp(&self) -> String {
        let c = &self.config;
        format!(
            "(:enabled {} :grace-ms {:.0} :close-gesture {} :pinch-on {:.2} :pinch-off {:.2} :pinch-frames ({} {}) :thumbs-curl {:.2} :thumbs-frames ({} {}) :dwell-ms {:.0} :far-px {:.0} :near-px {:.0})",
            if c.enabled { "t" } else { "nil" },
            c.grace_ms,
            c.close_gesture.as_str(),
            c.pinch.on_threshold,
            c.pinch.off_threshold,
            c.pinch.debounce.on_frames,
            c.pinch.debounce.off_frames,
            c.thumbs_up.curl_threshold,
            c.thumbs_up.debounce.on_frames,
            c.thumbs_up.debounce.off_frames,
            c.hover.dwell_ms,
            c.scale.far_px,
            c.scale.near_px,
        )
    }
}

impl<T: Clone + PartialEq + Debug> Default for FrameInterpreter<T> {
    fn default() -> Self {
        Self::new(InterpreterConfig::default())
    }
}

// ── Tests ──────────────────────────────────────────────────
