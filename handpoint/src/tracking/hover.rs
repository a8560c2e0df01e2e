//! Dwell-filtered hover target selection.
//!
//! A raw per-frame hit-test result becomes the committed hover target only
//! after it has stayed the same for the dwell duration.  Every hover change
//! is delayed by the dwell window; single-frame hit-test noise never
//! commits.

use std::fmt::Debug;

use tracing::debug;

/// Configuration for hover dwell.
#[derive(Debug, Clone)]
pub struct HoverConfig {
    /// Milliseconds a candidate must stay stable before it is committed.
    pub dwell_ms: f64,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self { dwell_ms: 70.0 }
    }
}

/// A committed hover change.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverChange<T> {
    pub previous: Option<T>,
    pub next: Option<T>,
}

/// Hover stabilizer over an opaque target identity.
#[derive(Debug, Clone)]
pub struct HoverStabilizer<T> {
    config: HoverConfig,
    /// Committed hover target.
    current: Option<T>,
    /// Target under evaluation.
    candidate: Option<T>,
    /// When the candidate was first seen (ms).
    candidate_since_ms: f64,
}

impl<T: Clone + PartialEq + Debug> HoverStabilizer<T> {
    pub fn new(config: HoverConfig) -> Self {
        Self {
            config,
            current: None,
            candidate: None,
            candidate_since_ms: 0.0,
        }
    }

    /// Feed one raw hit and return a change if one was committed.
    pub fn update(&mut self, raw_hit: Option<T>, timestamp_ms: f64) -> Option<HoverChange<T>> {
        if raw_hit != self.candidate {
            self.candidate = raw_hit;
            self.candidate_since_ms = timestamp_ms;
        }

        // Dwell is also checked on the frame the candidate appears, so a
        // zero dwell commits immediately.
        if self.candidate != self.current
            && timestamp_ms - self.candidate_since_ms >= self.config.dwell_ms
        {
            let previous = std::mem::replace(&mut self.current, self.candidate.clone());
            debug!("Hover committed: {:?} -> {:?}", previous, self.current);
            return Some(HoverChange {
                previous,
                next: self.current.clone(),
            });
        }

        None
    }

    /// Committed hover target.
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    pub fn candidate(&self) -> Option<&T> {
        self.candidate.as_ref()
    }

    /// Drop both committed and candidate targets.  Returns the change if a
    /// target was committed.
    pub fn clear(&mut self) -> Option<HoverChange<T>> {
        self.candidate = None;
        self.candidate_since_ms = 0.0;
        let previous = self.current.take()?;
        debug!("Hover cleared: {:?}", previous);
        Some(HoverChange {
            previous: Some(previous),
            next: None,
        })
    }

    /// Generate s-expression for IPC status.
    pub fn status_sexp(&self) -> String {
        let fmt = |t: Option<&T>| {
            t.map(|t| format!("\"{:?}\"", t))
                .unwrap_or_else(|| "nil".to_string())
        };
        format!(
            "(:current {} :candidate {} :dwell-ms {:.0})",
            fmt(self.current.as_ref()),
            fmt(self.candidate.as_ref()),
            self.config.dwell_ms,
        )
    }
}

impl<T: Clone + PartialEq + Debug> Default for HoverStabilizer<T> {
    fn default() -> Self {
        Self::new(HoverConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commits_after_dwell() {
        let mut hover: HoverStabilizer<u32> = HoverStabilizer::default();
        assert!(hover.update(Some(1), 0.0).is_none());
        assert!(hover.update(Some(1), 33.0).is_none());
        assert!(hover.update(Some(1), 66.0).is_none());
        let change = hover.update(Some(1), 70.0).expect("commit at dwell");
        assert_eq!(
            change,
            HoverChange {
                previous: None,
                next: Some(1),
            }
        );
        assert_eq!(hover.current(), Some(&1));
    }

    #[test]
    fn test_commits_exactly_once() {
        let mut hover: HoverStabilizer<u32> = HoverStabilizer::default();
        let mut commits = 0;
        for i in 0..20 {
            if hover.update(Some(7), i as f64 * 16.0).is_some() {
                commits += 1;
            }
        }
        assert_eq!(commits, 1);
    }

    #[test]
    fn test_short_candidate_never_commits() {
        let mut hover: HoverStabilizer<u32> = HoverStabilizer::default();
        assert!(hover.update(Some(1), 0.0).is_none());
        assert!(hover.update(Some(1), 50.0).is_none());
        assert!(hover.update(Some(2), 69.0).is_none());
        assert!(hover.update(Some(2), 100.0).is_none());
        assert_eq!(hover.current(), None);
        assert!(hover.update(Some(2), 139.0).is_some());
        assert_eq!(hover.current(), Some(&2));
    }

    #[test]
    fn test_flicker_does_not_change_hover() {
        let mut hover: HoverStabilizer<&str> = HoverStabilizer::default();
        hover.update(Some("a"), 0.0);
        hover.update(Some("a"), 100.0);
        assert_eq!(hover.current(), Some(&"a"));

        // Cursor jitter across a boundary: one frame each.
        for i in 0..10 {
            let hit = if i % 2 == 0 { Some("b") } else { Some("a") };
            assert!(hover.update(hit, 116.0 + i as f64 * 16.0).is_none());
        }
        assert_eq!(hover.current(), Some(&"a"));
    }

    #[test]
    fn test_exit_is_dwelled_too() {
        let mut hover: HoverStabilizer<u32> = HoverStabilizer::default();
        hover.update(Some(3), 0.0);
        hover.update(Some(3), 80.0);
        assert!(hover.update(None, 100.0).is_none());
        assert_eq!(hover.current(), Some(&3));
        let change = hover.update(None, 170.0).expect("exit after dwell");
        assert_eq!(
            change,
            HoverChange {
                previous: Some(3),
                next: None,
            }
        );
    }

    #[test]
    fn test_clear() {
        let mut hover: HoverStabilizer<u32> = HoverStabilizer::default();
        assert!(hover.clear().is_none());
        hover.update(Some(4), 0.0);
        hover.update(Some(4), 80.0);
        let change = hover.clear().expect("had a target");
        assert_eq!(change.previous, Some(4));
        assert!(hover.current().is_none());
        assert!(hover.candidate().is_none());
    }

    #[test]
    fn test_status_sexp() {
        let mut hover: HoverStabilizer<u32> = HoverStabilizer::default();
        assert!(hover.status_sexp().contains(":current nil"));
        hover.update(Some(9), 0.0);
        let sexp = hover.status_sexp();
        assert!(sexp.contains(":candidate \"9\""));
        assert!(sexp.contains(":dwell-ms 70"));
    }
}
