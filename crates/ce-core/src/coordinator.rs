//! Selection coordinator
//!
//! Brushes in the statistical views are turned into [`BrushEvent`] values
//! and fed to [`SelectionCoordinator::apply`]. The coordinator enforces that
//! at most one control owns the brush, recomputes the selected ids and
//! returns the [`SelectionEffect`]s the caller has to carry out (clearing a
//! demoted brush, re-rendering the map).

use tracing::{debug, trace};

use crate::extract::ExtractedPoint;
use crate::selection::{ControlId, IdSet, SelectionState, SharedIdSet};

/// Axis of the extracted points a 1-D brush runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Region covered by a brush, in data coordinates. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrushRange {
    /// 1-D brush over one axis
    Interval { axis: Axis, lo: f64, hi: f64 },
    /// 2-D brush over both axes
    Rect { x: (f64, f64), y: (f64, f64) },
}

impl BrushRange {
    /// 1-D range with its bounds put in order
    pub fn interval(axis: Axis, a: f64, b: f64) -> Self {
        BrushRange::Interval {
            axis,
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    /// 2-D range with both bounds put in order
    pub fn rect(x: (f64, f64), y: (f64, f64)) -> Self {
        BrushRange::Rect {
            x: (x.0.min(x.1), x.0.max(x.1)),
            y: (y.0.min(y.1), y.0.max(y.1)),
        }
    }

    pub fn contains(&self, point: &ExtractedPoint) -> bool {
        match *self {
            BrushRange::Interval { axis, lo, hi } => {
                let value = match axis {
                    Axis::X => point.x,
                    Axis::Y => point.y,
                };
                lo <= value && value <= hi
            }
            BrushRange::Rect { x, y } => {
                x.0 <= point.x && point.x <= x.1 && y.0 <= point.y && point.y <= y.1
            }
        }
    }
}

/// Input to the coordinator's transition function
#[derive(Debug, Clone, PartialEq)]
pub enum BrushEvent {
    /// A brush was created, moved or resized
    Updated { owner: ControlId, range: BrushRange },
    /// A brush was removed
    Cleared { owner: ControlId },
}

/// Work the caller must carry out after a transition, in order
#[derive(Debug, Clone)]
pub enum SelectionEffect {
    /// Remove the visual brush of a control that lost ownership
    ClearBrush(ControlId),
    /// Re-render the map under this filter (`None` means unfiltered)
    RenderMap(Option<SharedIdSet>),
}

/// Identifiers of every point inside `range`, independent of point order
pub fn select_ids(points: &[ExtractedPoint], range: &BrushRange) -> IdSet {
    points
        .iter()
        .filter(|point| range.contains(point))
        .map(|point| point.id.clone())
        .collect()
}

/// Sole writer of the [`SelectionState`]
#[derive(Debug, Default)]
pub struct SelectionCoordinator {
    state: SelectionState,
}

impl SelectionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access for views
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Apply one event against the points the brushed view is showing.
    pub fn apply(&mut self, event: BrushEvent, points: &[ExtractedPoint]) -> Vec<SelectionEffect> {
        match event {
            BrushEvent::Updated { owner, range } => {
                let mut effects = Vec::with_capacity(2);

                if let Some(previous) = self.state.owner() {
                    if previous != owner {
                        debug!("Brush ownership moves from {} to {}", previous, owner);
                        self.state.clear();
                        effects.push(SelectionEffect::ClearBrush(previous));
                    }
                }

                let ids = select_ids(points, &range);
                debug!("Brush {} selected {} of {} counties", owner, ids.len(), points.len());
                self.state.set(owner, ids);

                effects.push(SelectionEffect::RenderMap(self.state.filter().cloned()));
                effects
            }
            BrushEvent::Cleared { owner } => {
                if self.state.owner() != Some(owner) {
                    trace!("Ignoring clear from {} which does not own the brush", owner);
                    return Vec::new();
                }

                debug!("Brush {} cleared", owner);
                self.state.clear();
                vec![SelectionEffect::RenderMap(None)]
            }
        }
    }
}
