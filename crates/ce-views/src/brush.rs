//! Drag-to-brush interaction shared by the histograms and the scatterplot

use ce_core::{Axis, BrushEvent, BrushRange, ControlId};
use egui::{Color32, Stroke};
use egui_plot::{PlotPoints, PlotUi, Polygon};

/// Which axes a brush spans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushMode {
    /// 1-D brush dragged along the plot's x axis, selecting on the given data axis
    Interval(Axis),
    /// 2-D rectangular brush
    Rect,
}

/// Brush state of one view.
///
/// Dragging creates or replaces the brush and emits `Updated`; a click without
/// a drag removes it and emits `Cleared`.
#[derive(Debug, Clone)]
pub struct BrushSurface {
    owner: ControlId,
    mode: BrushMode,
    anchor: Option<[f64; 2]>,
    range: Option<BrushRange>,
}

impl BrushSurface {
    pub fn new(owner: ControlId, mode: BrushMode) -> Self {
        Self {
            owner,
            mode,
            anchor: None,
            range: None,
        }
    }

    pub fn mode(&self) -> BrushMode {
        self.mode
    }

    pub fn range(&self) -> Option<BrushRange> {
        self.range
    }

    /// Forget the brush silently, used when another view takes ownership
    pub fn clear(&mut self) {
        self.anchor = None;
        self.range = None;
    }

    /// Read this frame's pointer input from inside a plot closure
    pub fn interact(&mut self, plot_ui: &PlotUi) -> Option<BrushEvent> {
        let response = plot_ui.response();
        let pointer = plot_ui.pointer_coordinate().map(|p| [p.x, p.y]);

        if response.drag_started() {
            if let Some(at) = pointer {
                self.begin(at);
            }
        }

        let mut event = None;
        if response.dragged() {
            if let Some(at) = pointer {
                event = self.drag_to(at);
            }
        }
        if response.drag_released() {
            self.anchor = None;
        }
        if response.clicked() {
            event = self.click();
        }
        event
    }

    pub fn begin(&mut self, at: [f64; 2]) {
        self.anchor = Some(at);
    }

    /// Extend the brush from the anchor to `at`. Zero-size drags emit nothing.
    pub fn drag_to(&mut self, at: [f64; 2]) -> Option<BrushEvent> {
        let anchor = self.anchor?;
        let range = match self.mode {
            BrushMode::Interval(axis) => {
                if anchor[0] == at[0] {
                    return None;
                }
                BrushRange::interval(axis, anchor[0], at[0])
            }
            BrushMode::Rect => {
                if anchor[0] == at[0] || anchor[1] == at[1] {
                    return None;
                }
                BrushRange::rect((anchor[0], at[0]), (anchor[1], at[1]))
            }
        };

        if self.range == Some(range) {
            return None;
        }
        self.range = Some(range);
        Some(BrushEvent::Updated {
            owner: self.owner,
            range,
        })
    }

    pub fn click(&mut self) -> Option<BrushEvent> {
        self.anchor = None;
        self.range.take().map(|_| BrushEvent::Cleared { owner: self.owner })
    }

    /// Shade the brushed region; 1-D brushes span the visible y range
    pub fn draw(&self, plot_ui: &mut PlotUi, color: Color32) {
        let Some(range) = self.range else {
            return;
        };
        let bounds = plot_ui.plot_bounds();
        let ((x0, x1), (y0, y1)) = match range {
            BrushRange::Interval { lo, hi, .. } => ((lo, hi), (bounds.min()[1], bounds.max()[1])),
            BrushRange::Rect { x, y } => (x, y),
        };

        plot_ui.polygon(
            Polygon::new(PlotPoints::new(vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]]))
                .fill_color(color.gamma_multiply(0.25))
                .stroke(Stroke::new(1.0, color))
                .name("Brush"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_drag_emits_normalized_interval() {
        let owner = Uuid::new_v4();
        let mut brush = BrushSurface::new(owner, BrushMode::Interval(Axis::Y));

        brush.begin([8.0, 3.0]);
        let event = brush.drag_to([5.0, 100.0]);

        assert_eq!(
            event,
            Some(BrushEvent::Updated {
                owner,
                range: BrushRange::Interval { axis: Axis::Y, lo: 5.0, hi: 8.0 },
            })
        );
        // same range again is not re-emitted
        assert_eq!(brush.drag_to([5.0, 0.0]), None);
    }

    #[test]
    fn test_rect_brush_needs_area() {
        let owner = Uuid::new_v4();
        let mut brush = BrushSurface::new(owner, BrushMode::Rect);

        brush.begin([1.0, 1.0]);
        assert_eq!(brush.drag_to([4.0, 1.0]), None);

        let event = brush.drag_to([0.0, 3.0]);
        assert_eq!(
            event,
            Some(BrushEvent::Updated {
                owner,
                range: BrushRange::Rect { x: (0.0, 1.0), y: (1.0, 3.0) },
            })
        );
    }

    #[test]
    fn test_click_clears_only_an_existing_brush() {
        let owner = Uuid::new_v4();
        let mut brush = BrushSurface::new(owner, BrushMode::Interval(Axis::X));
        assert_eq!(brush.click(), None);

        brush.begin([0.0, 0.0]);
        brush.drag_to([2.0, 0.0]);
        assert_eq!(brush.click(), Some(BrushEvent::Cleared { owner }));
        assert!(brush.range().is_none());
    }

    #[test]
    fn test_silent_clear_drops_range() {
        let mut brush = BrushSurface::new(Uuid::new_v4(), BrushMode::Interval(Axis::X));
        brush.begin([0.0, 0.0]);
        brush.drag_to([2.0, 0.0]);

        brush.clear();
        assert!(brush.range().is_none());
        assert_eq!(brush.drag_to([3.0, 0.0]), None);
    }
}
