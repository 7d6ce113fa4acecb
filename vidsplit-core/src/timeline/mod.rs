//! Timeline segmentation model.
//!
//! [`TimelineState`] owns the split points and the deactivated-segment set
//! for the current media session. Split points partition `[0, total)` into
//! half-open segments; deactivated segments are excluded from export. All
//! state is in-memory and reset whenever a new session is created.

pub mod history;
pub mod planner;

use log::debug;
use thiserror::Error;

use history::{Edit, EditHistory};
pub use planner::SegmentPlan;

/// Timeline edit errors
#[derive(Error, Debug, PartialEq)]
pub enum TimelineError {
    #[error("split point {point:.1}s is outside (0, {total:.1})")]
    OutOfRange { point: f64, total: f64 },
}

#[derive(Debug, Default)]
pub struct TimelineState {
    total_duration: f64,
    splits: Vec<f64>,
    deactivated: Vec<(f64, f64)>,
    history: EditHistory,
}

impl TimelineState {
    pub fn new(total_duration: f64) -> Self {
        Self {
            total_duration,
            ..Default::default()
        }
    }

    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Re-bound the timeline once a deferred duration arrives from the
    /// duration source. Splits that fall outside the new range are dropped;
    /// deactivation entries referencing dropped boundaries become orphaned
    /// and are thereby reactivated.
    pub fn set_total_duration(&mut self, total: f64) {
        self.total_duration = total;
        self.splits.retain(|&t| t > 0.0 && t < total);
    }

    /// Insert a split point, keeping the set sorted and unique.
    ///
    /// Fails with [`TimelineError::OutOfRange`] outside `(0, total)`.
    /// Re-adding an existing point is a no-op that records no edit. A
    /// successful insert is recorded in history and clears any pending redo.
    pub fn add_split(&mut self, t: f64) -> Result<(), TimelineError> {
        if t <= 0.0 || t >= self.total_duration {
            return Err(TimelineError::OutOfRange {
                point: t,
                total: self.total_duration,
            });
        }

        match self.splits.binary_search_by(|probe| probe.total_cmp(&t)) {
            Ok(_) => debug!("Split point {t:.1}s already present; ignoring"),
            Err(pos) => {
                self.splits.insert(pos, t);
                self.history.record(Edit::AddSplit(t));
            }
        }
        Ok(())
    }

    pub fn splits(&self) -> &[f64] {
        &self.splits
    }

    pub fn deactivated(&self) -> &[(f64, f64)] {
        &self.deactivated
    }

    /// The sorted boundary sequence `{0, total} ∪ splits`.
    ///
    /// Empty while the total duration is unknown (≤ 0); otherwise always has
    /// at least two strictly increasing elements.
    pub fn boundaries(&self) -> Vec<f64> {
        if self.total_duration <= 0.0 {
            return Vec::new();
        }
        let mut boundaries = Vec::with_capacity(self.splits.len() + 2);
        boundaries.push(0.0);
        boundaries.extend_from_slice(&self.splits);
        boundaries.push(self.total_duration);
        boundaries
    }

    /// Flip the deactivation state of the segment containing `at`.
    ///
    /// The containing segment is located by `boundary[i] <= at <
    /// boundary[i+1]`; the last segment is closed at its right edge so
    /// `at == total` still resolves. No-op on an empty timeline.
    pub fn toggle_deactivation(&mut self, at: f64) {
        let boundaries = self.boundaries();
        if boundaries.len() < 2 {
            return;
        }

        for (i, pair) in boundaries.windows(2).enumerate() {
            let (start, end) = (pair[0], pair[1]);
            let is_last = i == boundaries.len() - 2;
            let contains = at >= start && (at < end || (is_last && at <= end));
            if !contains {
                continue;
            }

            if let Some(pos) = self
                .deactivated
                .iter()
                .position(|&entry| entry == (start, end))
            {
                self.deactivated.remove(pos);
                debug!("Reactivated segment [{start:.1}, {end:.1})");
            } else {
                self.deactivated.push((start, end));
                debug!("Deactivated segment [{start:.1}, {end:.1})");
            }
            return;
        }
    }

    /// The full boundary-derived partition tagged active/inactive.
    ///
    /// Pure with respect to observable state; deactivation entries that no
    /// longer match any current boundary pair are simply ignored.
    pub fn segments(&self) -> Vec<SegmentPlan> {
        planner::plan_segments(&self.boundaries(), &self.deactivated)
    }

    /// Reverse the most recent split addition (LIFO over edits, not the
    /// largest time value). No-op when there is nothing to undo.
    pub fn undo(&mut self) {
        if let Some(Edit::AddSplit(t)) = self.history.pop_undo() {
            self.splits.retain(|&s| s != t);
            debug!("Undo: removed split point {t:.1}s");
        }
    }

    /// Re-apply the most recently undone split addition. No-op when there is
    /// nothing to redo.
    pub fn redo(&mut self) {
        if let Some(Edit::AddSplit(t)) = self.history.pop_redo() {
            if let Err(pos) = self.splits.binary_search_by(|probe| probe.total_cmp(&t)) {
                self.splits.insert(pos, t);
            }
            debug!("Redo: restored split point {t:.1}s");
        }
    }

    /// Reset to an empty timeline over a new total duration. Used when a new
    /// media session replaces the current one.
    pub fn reset(&mut self, total_duration: f64) {
        self.total_duration = total_duration;
        self.splits.clear();
        self.deactivated.clear();
        self.history.clear();
    }
}
