//! Scatter plot implementation

use ce_core::{extent, AttributeSelection, ExtractedPoint};
use egui::{Color32, Ui};
use egui_plot::{MarkerShape, Plot, PlotPoints, Points};

use crate::brush::{BrushMode, BrushSurface};
use crate::{SpaceView, SpaceViewId, ViewerContext};

/// Configuration for scatter plot view
#[derive(Clone)]
pub struct ScatterConfig {
    pub point_radius: f32,
    pub point_color: Color32,
    pub brushed_color: Color32,
    /// Hover distance as a fraction of the visible plot size
    pub hover_threshold: f64,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            point_radius: 2.5,
            point_color: Color32::from_rgb(0x46, 0x82, 0xb4),
            brushed_color: Color32::from_rgb(255, 165, 0),
            hover_threshold: 0.02,
        }
    }
}

/// Index of the point nearest `pointer`, measured relative to the visible plot size
pub fn nearest_point(points: &[ExtractedPoint], pointer: [f64; 2], size: [f64; 2], threshold: f64) -> Option<usize> {
    let (w, h) = (size[0].max(f64::EPSILON), size[1].max(f64::EPSILON));
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let dx = (p.x - pointer[0]) / w;
            let dy = (p.y - pointer[1]) / h;
            (i, (dx * dx + dy * dy).sqrt())
        })
        .filter(|&(_, dist)| dist < threshold)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// 2-D brushable scatterplot of the X/Y extraction
pub struct ScatterView {
    id: SpaceViewId,
    title: String,
    pub config: ScatterConfig,

    // State
    x_extent: Option<(f64, f64)>,
    y_extent: Option<(f64, f64)>,
    brush: BrushSurface,
}

impl ScatterView {
    pub fn new(id: SpaceViewId, config: ScatterConfig) -> Self {
        Self {
            id,
            title: "Scatterplot".to_string(),
            config,
            x_extent: None,
            y_extent: None,
            brush: BrushSurface::new(id, BrushMode::Rect),
        }
    }

    fn rebuild(&mut self, ctx: &ViewerContext) {
        self.x_extent = extent(ctx.points.iter().map(|p| p.x));
        self.y_extent = extent(ctx.points.iter().map(|p| p.y));
        self.title = format!("{} vs {}", ctx.attributes.x.label(), ctx.attributes.y.label());
    }
}

impl SpaceView for ScatterView {
    fn id(&self) -> SpaceViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "ScatterView"
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        if self.x_extent.is_none() {
            self.rebuild(ctx);
        }
        let (Some(x_extent), Some(y_extent)) = (self.x_extent, self.y_extent) else {
            ui.centered_and_justified(|ui| {
                ui.label("No data to display");
            });
            return;
        };

        ui.heading(&self.title);

        let plot = Plot::new(self.id)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_boxed_zoom(false)
            .allow_scroll(false)
            .show_x(false)
            .show_y(false)
            .include_x(x_extent.0)
            .include_x(x_extent.1)
            .include_y(y_extent.0)
            .include_y(y_extent.1)
            .x_axis_label(ctx.attributes.x.label())
            .y_axis_label(ctx.attributes.y.label());

        let points = &ctx.points;
        let brush = &mut self.brush;
        let config = &self.config;

        let plot_response = plot.show(ui, |plot_ui| {
            let range = brush.range();
            let (inside, outside): (Vec<&ExtractedPoint>, Vec<&ExtractedPoint>) = points
                .iter()
                .partition(|p| range.map_or(false, |r| r.contains(p)));

            let to_plot = |subset: &[&ExtractedPoint]| PlotPoints::new(subset.iter().map(|p| [p.x, p.y]).collect());
            plot_ui.points(
                Points::new(to_plot(&outside[..]))
                    .shape(MarkerShape::Circle)
                    .radius(config.point_radius)
                    .color(config.point_color),
            );
            if !inside.is_empty() {
                plot_ui.points(
                    Points::new(to_plot(&inside[..]))
                        .shape(MarkerShape::Circle)
                        .radius(config.point_radius)
                        .color(config.brushed_color),
                );
            }

            brush.draw(plot_ui, config.brushed_color);
            let event = brush.interact(plot_ui);

            let bounds = plot_ui.plot_bounds();
            let hovered = plot_ui.pointer_coordinate().and_then(|pointer| {
                nearest_point(
                    points,
                    [pointer.x, pointer.y],
                    [bounds.width(), bounds.height()],
                    config.hover_threshold,
                )
            });
            (event, hovered)
        });

        let (event, hovered) = plot_response.inner;
        if let Some(event) = event {
            ctx.emit(event);
        }
        if let Some(point) = hovered.and_then(|i| ctx.points.get(i)) {
            plot_response.response.on_hover_text(format!(
                "{}\n{}: {:.2}\n{}: {:.2}",
                point.display_name,
                ctx.attributes.x.label(),
                point.x,
                ctx.attributes.y.label(),
                point.y
            ));
        }
    }

    fn on_attributes_changed(&mut self, ctx: &ViewerContext, previous: AttributeSelection) {
        if previous.x == ctx.attributes.x && previous.y == ctx.attributes.y {
            return;
        }
        self.brush.clear();
        self.rebuild(ctx);
    }

    fn clear_brush(&mut self) {
        self.brush.clear();
    }

    fn brush_mut(&mut self) -> Option<&mut BrushSurface> {
        Some(&mut self.brush)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{context, record};
    use ce_core::CountyId;

    fn point(id: &str, x: f64, y: f64) -> ExtractedPoint {
        ExtractedPoint {
            id: CountyId::new(id),
            display_name: id.to_string(),
            x,
            y,
        }
    }

    #[test]
    fn test_nearest_point_scales_by_plot_size() {
        let points = vec![point("a", 10.0, 1000.0), point("b", 12.0, 40_000.0)];

        assert_eq!(nearest_point(&points, [10.1, 1200.0], [20.0, 50_000.0], 0.02), Some(0));
        assert_eq!(nearest_point(&points, [12.0, 39_500.0], [20.0, 50_000.0], 0.02), Some(1));
        assert_eq!(nearest_point(&points, [16.0, 20_000.0], [20.0, 50_000.0], 0.02), None);
        assert_eq!(nearest_point(&[], [0.0, 0.0], [1.0, 1.0], 0.02), None);
    }

    #[test]
    fn test_title_and_extents_follow_attributes() {
        let ctx = context(
            vec![
                record("01001", [4.0, 40_000.0, 1.0, 1.0, 1.0, 1.0]),
                record("01003", [12.0, 65_000.0, 1.0, 1.0, 1.0, 1.0]),
            ],
            Vec::new(),
        );
        let mut view = ScatterView::new(SpaceViewId::new_v4(), ScatterConfig::default());
        view.rebuild(&ctx);

        assert_eq!(view.title(), "Poverty Value vs MHI value");
        assert_eq!(view.x_extent, Some((4.0, 12.0)));
        assert_eq!(view.y_extent, Some((40_000.0, 65_000.0)));
    }

    #[test]
    fn test_map_selector_keeps_brush() {
        let mut ctx = context(vec![record("01001", [4.0, 40_000.0, 1.0, 1.0, 1.0, 1.0])], Vec::new());
        let mut view = ScatterView::new(SpaceViewId::new_v4(), ScatterConfig::default());
        view.rebuild(&ctx);
        view.brush.begin([0.0, 0.0]);
        view.brush.drag_to([10.0, 50_000.0]);

        let previous = ctx.attributes;
        ctx.set_attributes(AttributeSelection { map: ce_core::Attribute::Unemployment, ..previous });
        view.on_attributes_changed(&ctx, previous);
        assert!(view.brush.range().is_some());

        let previous = ctx.attributes;
        ctx.set_attributes(AttributeSelection { y: ce_core::Attribute::Obesity, ..previous });
        view.on_attributes_changed(&ctx, previous);
        assert!(view.brush.range().is_none());
    }
}
