//! Headless scripted session.
//!
//! Drives a `FrameInterpreter` with synthetic hand frames against a grid
//! of items and a close button, at a fixed frame rate, and logs every
//! event.  Used for smoke testing and tuning without a camera.

use std::fmt;

use anyhow::bail;
use tracing::{debug, info};

use handpoint::synthetic::{HandPose, PoseKind, DEFAULT_SCALE};
use handpoint::{
    CloseGesture, DetectionResult, FrameInterpreter, HitTest, InterpreterConfig,
    InterpreterEvent, Mode, ScreenPoint, TargetClass, Viewport,
};

/// Side of the square close button in the top-right corner (px).
const CLOSE_BUTTON_PX: f32 = 120.0;

/// Index fingertip offset from the wrist for extended-finger poses, in hand-scale units.
const INDEX_TIP_DY: f32 = -2.3;

// ── Config ─────────────────────────────────────────────────

/// Headless session configuration.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
    /// Simulated camera frame rate.
    pub fps: f64,
    /// Grid columns.
    pub columns: u32,
    /// Grid rows.
    pub rows: u32,
    /// Item the script opens.
    pub item: u32,
    pub close_gesture: CloseGesture,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 30.0,
            columns: 4,
            rows: 3,
            item: 2,
            close_gesture: CloseGesture::ThumbsUp,
        }
    }
}

impl HeadlessConfig {
    /// Parse a "WxH" resolution string. Returns (width, height) or None.
    pub fn parse_resolution(s: &str) -> Option<(u32, u32)> {
        let (w, h) = s.split_once('x')?;
        let w = w.parse::<u32>().ok()?;
        let h = h.parse::<u32>().ok()?;
        if w > 0 && h > 0 {
            Some((w, h))
        } else {
            None
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.fps > 0.0 && self.fps.is_finite()) {
            bail!("frame rate must be positive, got {}", self.fps);
        }
        if self.columns == 0 || self.rows == 0 {
            bail!("grid must have at least one cell, got {}x{}", self.columns, self.rows);
        }
        if self.item >= self.columns * self.rows {
            bail!("item {} outside a {}x{} grid", self.item, self.columns, self.rows);
        }
        Ok(())
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f32, self.height as f32)
    }
}

// ── Grid hit-test ──────────────────────────────────────────

/// Hit-test targets of the headless scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridTarget {
    Item(u32),
    Close,
}

impl fmt::Display for GridTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(id) => write!(f, "item-{}", id),
            Self::Close => write!(f, "close"),
        }
    }
}

/// Items tile the viewport; the close button covers the top-right corner.
#[derive(Debug, Clone)]
pub struct GridScene {
    viewport: Viewport,
    columns: u32,
    rows: u32,
}

impl GridScene {
    pub fn new(viewport: Viewport, columns: u32, rows: u32) -> Self {
        Self {
            viewport,
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    fn cell_size(&self) -> (f32, f32) {
        (
            self.viewport.width / self.columns as f32,
            self.viewport.height / self.rows as f32,
        )
    }

    pub fn item_center(&self, item: u32) -> ScreenPoint {
        let (cw, ch) = self.cell_size();
        let col = item % self.columns;
        let row = item / self.columns;
        ScreenPoint::new((col as f32 + 0.5) * cw, (row as f32 + 0.5) * ch)
    }

    pub fn close_center(&self) -> ScreenPoint {
        ScreenPoint::new(self.viewport.width - CLOSE_BUTTON_PX / 2.0, CLOSE_BUTTON_PX / 2.0)
    }
}

impl HitTest<GridTarget> for GridScene {
    fn hit_test(&self, point: ScreenPoint, class: TargetClass) -> Option<GridTarget> {
        if point.x < 0.0
            || point.y < 0.0
            || point.x >= self.viewport.width
            || point.y >= self.viewport.height
        {
            return None;
        }
        match class {
            TargetClass::Item => {
                let (cw, ch) = self.cell_size();
                let col = ((point.x / cw) as u32).min(self.columns - 1);
                let row = ((point.y / ch) as u32).min(self.rows - 1);
                Some(GridTarget::Item(row * self.columns + col))
            }
            TargetClass::CloseAffordance => {
                let inside = point.x >= self.viewport.width - CLOSE_BUTTON_PX
                    && point.y < CLOSE_BUTTON_PX;
                inside.then_some(GridTarget::Close)
            }
        }
    }
}

// ── Script ─────────────────────────────────────────────────

/// One scripted phase: hold a pose (or no hand) at a screen point.
#[derive(Debug, Clone, Copy)]
struct Step {
    label: &'static str,
    pose: Option<PoseKind>,
    target: ScreenPoint,
    duration_ms: f64,
}

/// Wrist position that puts an extended index fingertip on `target`.
fn pose_at(kind: PoseKind, target: ScreenPoint, viewport: &Viewport) -> HandPose {
    let tip_x = 1.0 - target.x / viewport.width;
    let tip_y = target.y / viewport.height;
    HandPose::new(kind, tip_x, tip_y - INDEX_TIP_DY * DEFAULT_SCALE)
}

fn script(config: &HeadlessConfig, scene: &GridScene) -> Vec<Step> {
    let item = scene.item_center(config.item);
    let close = scene.close_center();
    let close_pose = match config.close_gesture {
        CloseGesture::ThumbsUp => PoseKind::ThumbsUp,
        CloseGesture::ThumbsUpOrPinch => PoseKind::Pinch { gap: 0.1 },
    };
    vec![
        Step {
            label: "approach",
            pose: Some(PoseKind::Open),
            target: item,
            duration_ms: 400.0,
        },
        Step {
            label: "pinch",
            pose: Some(PoseKind::Pinch { gap: 0.1 }),
            target: item,
            duration_ms: 200.0,
        },
        Step {
            label: "release",
            pose: Some(PoseKind::Open),
            target: item,
            duration_ms: 300.0,
        },
        Step {
            label: "dropout",
            pose: None,
            target: item,
            duration_ms: 200.0,
        },
        Step {
            label: "to-close",
            pose: Some(PoseKind::Open),
            target: close,
            duration_ms: 800.0,
        },
        Step {
            label: "close",
            pose: Some(close_pose),
            target: close,
            duration_ms: 400.0,
        },
        Step {
            label: "rest",
            pose: Some(PoseKind::Open),
            target: item,
            duration_ms: 300.0,
        },
        Step {
            label: "leave",
            pose: None,
            target: item,
            duration_ms: 600.0,
        },
    ]
}

// ── Run ────────────────────────────────────────────────────

/// Event counts for one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    pub ticks: u64,
    pub opens: Vec<GridTarget>,
    pub closes: u32,
    pub hover_changes: u32,
    pub diagnostics: u32,
    pub final_mode: Option<Mode>,
}

/// Run the scripted session to completion.
pub fn run(config: &HeadlessConfig) -> anyhow::Result<SessionSummary> {
    config.validate()?;

    let viewport = config.viewport();
    let scene = GridScene::new(viewport, config.columns, config.rows);
    let mut interp = FrameInterpreter::new(InterpreterConfig {
        close_gesture: config.close_gesture,
        ..InterpreterConfig::default()
    });
    let frame_ms = 1000.0 / config.fps;

    info!(
        "headless session: {}x{} @ {:.0}fps, {}x{} grid, close via {}",
        config.width,
        config.height,
        config.fps,
        config.columns,
        config.rows,
        config.close_gesture.as_str()
    );
    debug!("config {}", interp.config_sexp());

    let mut summary = SessionSummary::default();
    let mut now = 0.0;
    for step in script(config, &scene) {
        debug!("step {} ({:.0}ms)", step.label, step.duration_ms);
        let end = now + step.duration_ms;
        while now < end {
            let detection = match step.pose {
                Some(kind) => pose_at(kind, step.target, &viewport).at(now),
                None => DetectionResult::absent(now),
            };
            let out = interp.advance(&detection, &viewport, &scene);
            summary.ticks += 1;
            if out.diagnostic.is_some() {
                summary.diagnostics += 1;
            }
            for event in out.events {
                match event {
                    InterpreterEvent::Open(target) => {
                        info!("[{:>6.0}ms] open {}", now, target);
                        summary.opens.push(target);
                    }
                    InterpreterEvent::Close => {
                        info!("[{:>6.0}ms] close", now);
                        summary.closes += 1;
                    }
                    InterpreterEvent::HoverChanged { previous, next } => {
                        info!("[{:>6.0}ms] hover {:?} -> {:?}", now, previous, next);
                        summary.hover_changes += 1;
                    }
                }
            }
            now += frame_ms;
        }
    }

    summary.final_mode = Some(interp.mode());
    info!("session done: {}", interp.status_sexp());
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolution() {
        assert_eq!(HeadlessConfig::parse_resolution("1280x720"), Some((1280, 720)));
        assert_eq!(HeadlessConfig::parse_resolution("0x720"), None);
        assert_eq!(HeadlessConfig::parse_resolution("1280"), None);
        assert_eq!(HeadlessConfig::parse_resolution("axb"), None);
    }

    #[test]
    fn test_validate() {
        assert!(HeadlessConfig::default().validate().is_ok());
        let bad_fps = HeadlessConfig { fps: 0.0, ..HeadlessConfig::default() };
        assert!(bad_fps.validate().is_err());
        let bad_item = HeadlessConfig { item: 12, ..HeadlessConfig::default() };
        assert!(bad_item.validate().is_err());
    }

    #[test]
    fn test_grid_hit_test() {
        let scene = GridScene::new(Viewport::new(1200.0, 600.0), 4, 3);
        let center = scene.item_center(6);
        assert_eq!(scene.hit_test(center, TargetClass::Item), Some(GridTarget::Item(6)));
        assert_eq!(scene.hit_test(center, TargetClass::CloseAffordance), None);
        assert_eq!(
            scene.hit_test(scene.close_center(), TargetClass::CloseAffordance),
            Some(GridTarget::Close)
        );
        assert_eq!(scene.hit_test(ScreenPoint::new(-1.0, 10.0), TargetClass::Item), None);
    }

    #[test]
    fn test_pose_at_puts_fingertip_on_target() {
        let vp = Viewport::new(1280.0, 720.0);
        let target = ScreenPoint::new(400.0, 300.0);
        let frame = pose_at(PoseKind::Open, target, &vp).frame();
        let tip = handpoint::tracking::geometry::project_to_screen(
            &frame.get(handpoint::tracking::HandLandmark::IndexTip),
            &vp,
        );
        assert!((tip.x - target.x).abs() < 0.5 && (tip.y - target.y).abs() < 0.5);
    }

    #[test]
    fn test_scripted_session_opens_and_closes() {
        let summary = run(&HeadlessConfig::default()).expect("session runs");
        assert_eq!(summary.opens, vec![GridTarget::Item(2)]);
        assert_eq!(summary.closes, 1);
        assert_eq!(summary.final_mode, Some(Mode::Browsing));
        assert!(summary.diagnostics >= 1);
    }
}
