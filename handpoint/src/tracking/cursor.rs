//! Smoothed screen cursor driven by the index fingertip.

use tracing::trace;

use super::geometry::project_to_screen;
use super::landmarks::{HandFrame, HandLandmark, ScreenPoint, Viewport};
use super::one_euro::{AdaptiveFilter, FilterConfig};

/// Configuration for cursor smoothing.
#[derive(Debug, Clone)]
pub struct CursorConfig {
    /// Tuning shared by both axis filters (each axis owns its own instance).
    pub filter: FilterConfig,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig::cursor(),
        }
    }
}

/// Index-fingertip cursor with per-axis adaptive filtering.
///
/// Holds the last smoothed position so the orchestrator can keep the
/// cursor still across short dropouts.  `reset` clears the filters but not
/// the last known position.
#[derive(Debug, Clone)]
pub struct CursorTracker {
    x: AdaptiveFilter,
    y: AdaptiveFilter,
    last_known: Option<ScreenPoint>,
}

impl CursorTracker {
    pub fn new(config: CursorConfig) -> Self {
        Self {
            x: AdaptiveFilter::new(config.filter),
            y: AdaptiveFilter::new(config.filter),
            last_known: None,
        }
    }

    /// Project, smooth and record the fingertip position.
    pub fn update(
        &mut self,
        frame: &HandFrame,
        viewport: &Viewport,
        timestamp_ms: f64,
    ) -> ScreenPoint {
        let raw = project_to_screen(&frame.get(HandLandmark::IndexTip), viewport);
        let smoothed = ScreenPoint {
            x: self.x.update(raw.x as f64, timestamp_ms) as f32,
            y: self.y.update(raw.y as f64, timestamp_ms) as f32,
        };
        trace!(
            "cursor raw=({:.1}, {:.1}) smoothed=({:.1}, {:.1})",
            raw.x,
            raw.y,
            smoothed.x,
            smoothed.y
        );
        self.last_known = Some(smoothed);
        smoothed
    }

    /// Most recent smoothed position, without consuming a sample.
    pub fn last_known(&self) -> Option<ScreenPoint> {
        self.last_known
    }

    /// Clear both axis filters.  Only call once a dropout is confirmed as a
    /// loss; transient occlusions should keep the filters warm.
    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }

    pub fn is_warm(&self) -> bool {
        self.x.is_initialized() && self.y.is_initialized()
    }
}

impl Default for CursorTracker {
    fn default() -> Self {
        Self::new(CursorConfig::default())
    }
}
