//! Histogram implementation

use ce_core::{Attribute, AttributeSelection, Axis, ExtractedPoint};
use egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::brush::{BrushMode, BrushSurface};
use crate::{SpaceView, SpaceViewId, ViewerContext};

/// Configuration for histogram view
#[derive(Clone)]
pub struct HistogramConfig {
    /// Approximate number of bin thresholds
    pub thresholds: usize,

    /// Bar color
    pub bar_color: Color32,

    /// Brush color
    pub brush_color: Color32,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            thresholds: 20,
            bar_color: Color32::from_rgb(0x46, 0x82, 0xb4),
            brush_color: Color32::from_rgb(255, 165, 0),
        }
    }
}

/// One histogram bin. Half-open `[x0, x1)` except the last, which is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub x0: f64,
    pub x1: f64,
    pub count: usize,
}

/// Step between "nice" ticks: 1, 2 or 5 times a power of ten
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let step0 = (stop - start).abs() / count.max(1) as f64;
    let mut step1 = 10f64.powf(step0.log10().floor());
    let error = step0 / step1;
    if error >= 50f64.sqrt() {
        step1 *= 10.0;
    } else if error >= 10f64.sqrt() {
        step1 *= 5.0;
    } else if error >= 2f64.sqrt() {
        step1 *= 2.0;
    }
    step1
}

/// Roughly `count` round values covering `[start, stop]`
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if stop <= start {
        return vec![start];
    }

    let step = tick_step(start, stop, count);
    if step >= 1.0 {
        let i0 = (start / step).ceil() as i64;
        let i1 = (stop / step).floor() as i64;
        (i0..=i1).map(|i| i as f64 * step).collect()
    } else {
        // divide by the inverse to keep decimal ticks exact
        let inv = (1.0 / step).round();
        let i0 = (start * inv).ceil() as i64;
        let i1 = (stop * inv).floor() as i64;
        (i0..=i1).map(|i| i as f64 / inv).collect()
    }
}

/// Bin the values inside `domain` at nice thresholds. NaN and out-of-domain values are skipped.
pub fn bin_values(values: &[f64], domain: (f64, f64), thresholds: usize) -> Vec<Bin> {
    let (lo, hi) = domain;
    if hi <= lo {
        let count = values.iter().filter(|&&v| v == lo).count();
        return vec![Bin { x0: lo, x1: lo, count }];
    }

    let mut edges = vec![lo];
    edges.extend(nice_ticks(lo, hi, thresholds).into_iter().filter(|&t| t > lo && t < hi));
    edges.push(hi);

    let mut bins: Vec<Bin> = edges
        .windows(2)
        .map(|w| Bin {
            x0: w[0],
            x1: w[1],
            count: 0,
        })
        .collect();

    let last = bins.len() - 1;
    for &value in values {
        if value.is_nan() || value < lo || value > hi {
            continue;
        }
        let index = (edges.partition_point(|&edge| edge <= value) - 1).min(last);
        bins[index].count += 1;
    }

    bins
}

/// Histogram over one coordinate of the extracted points
pub struct HistogramView {
    id: SpaceViewId,
    title: String,
    axis: Axis,
    pub config: HistogramConfig,

    // State
    attribute: Option<Attribute>,
    bins: Vec<Bin>,
    brush: BrushSurface,
}

impl HistogramView {
    /// `axis` picks the X or Y selector and the coordinate of the shared extraction
    pub fn new(id: SpaceViewId, axis: Axis, config: HistogramConfig) -> Self {
        Self {
            id,
            title: "Histogram".to_string(),
            axis,
            config,
            attribute: None,
            bins: Vec::new(),
            brush: BrushSurface::new(id, BrushMode::Interval(axis)),
        }
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    fn coordinate(&self, point: &ExtractedPoint) -> f64 {
        match self.axis {
            Axis::X => point.x,
            Axis::Y => point.y,
        }
    }

    fn selected_attribute(&self, attributes: &AttributeSelection) -> Attribute {
        match self.axis {
            Axis::X => attributes.x,
            Axis::Y => attributes.y,
        }
    }

    fn rebuild(&mut self, ctx: &ViewerContext) {
        let attribute = self.selected_attribute(&ctx.attributes);
        let values: Vec<f64> = ctx.points.iter().map(|p| self.coordinate(p)).collect();
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        self.bins = if values.is_empty() {
            Vec::new()
        } else {
            bin_values(&values, (0.0, max.max(0.0)), self.config.thresholds)
        };
        self.title = format!("Histogram of {}", attribute.label());
        self.attribute = Some(attribute);
        tracing::debug!("{}: {} bins over {} values", self.title, self.bins.len(), values.len());
    }
}

impl SpaceView for HistogramView {
    fn id(&self) -> SpaceViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "HistogramView"
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        if self.attribute.is_none() {
            self.rebuild(ctx);
        }
        let Some(attribute) = self.attribute else {
            return;
        };

        if self.bins.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label("No data to display");
            });
            return;
        }

        ui.heading(&self.title);

        let max_count = self.bins.iter().map(|b| b.count).max().unwrap_or(0);
        let x_max = self.bins.last().map(|b| b.x1).unwrap_or(0.0);

        let plot = Plot::new(self.id)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_boxed_zoom(false)
            .allow_scroll(false)
            .show_x(false)
            .show_y(false)
            .include_x(0.0)
            .include_x(x_max)
            .include_y(0.0)
            .include_y(max_count as f64)
            .x_axis_label(attribute.label())
            .y_axis_label("Count");

        let bins = &self.bins;
        let brush = &mut self.brush;
        let config = &self.config;

        let plot_response = plot.show(ui, |plot_ui| {
            let bars: Vec<Bar> = bins
                .iter()
                .map(|bin| {
                    Bar::new((bin.x0 + bin.x1) / 2.0, bin.count as f64)
                        .width((bin.x1 - bin.x0) * 0.95)
                        .fill(config.bar_color)
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).color(config.bar_color).name("Count"));

            brush.draw(plot_ui, config.brush_color);
            let event = brush.interact(plot_ui);

            let hovered = plot_ui.pointer_coordinate().and_then(|pointer| {
                bins.iter()
                    .find(|bin| bin.x0 <= pointer.x && pointer.x < bin.x1 && pointer.y <= bin.count as f64)
                    .copied()
            });
            (event, hovered)
        });

        let (event, hovered) = plot_response.inner;
        if let Some(event) = event {
            ctx.emit(event);
        }
        if let Some(bin) = hovered {
            plot_response.response.on_hover_text(format!("Count: {}", bin.count));
        }
    }

    fn on_attributes_changed(&mut self, ctx: &ViewerContext, previous: AttributeSelection) {
        if self.selected_attribute(&previous) == self.selected_attribute(&ctx.attributes) {
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
    use ce_core::BrushEvent;

    #[test]
    fn test_nice_ticks() {
        let ticks = nice_ticks(0.0, 100.0, 20);
        assert_eq!(ticks.len(), 21);
        assert_eq!(ticks[1], 5.0);
        assert_eq!(ticks[20], 100.0);

        assert_eq!(nice_ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(tick_step(0.0, 37.0, 20), 2.0);
        assert_eq!(tick_step(0.0, 73000.0, 20), 5000.0);
    }

    #[test]
    fn test_bins_are_half_open_with_closed_last_bin() {
        let bins = bin_values(&[0.0, 5.0, 5.0, 10.0, 99.0, 100.0, f64::NAN], (0.0, 100.0), 20);

        assert_eq!(bins.len(), 20);
        assert_eq!(bins[0], Bin { x0: 0.0, x1: 5.0, count: 1 });
        assert_eq!(bins[1].count, 2);
        assert_eq!(bins[2].count, 1);
        assert_eq!(bins[19], Bin { x0: 95.0, x1: 100.0, count: 2 });
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 6);
    }

    #[test]
    fn test_uneven_domain_ends_with_partial_bin() {
        let bins = bin_values(&[36.5, 37.0], (0.0, 37.0), 20);
        assert_eq!(bins.len(), 19);
        assert_eq!(bins[18], Bin { x0: 36.0, x1: 37.0, count: 2 });
    }

    #[test]
    fn test_degenerate_domain_is_one_bin() {
        let bins = bin_values(&[0.0, 0.0], (0.0, 0.0), 20);
        assert_eq!(bins, vec![Bin { x0: 0.0, x1: 0.0, count: 2 }]);
    }

    #[test]
    fn test_view_bins_selected_axis() {
        let ctx = context(
            vec![
                record("01001", [4.0, 40_000.0, 1.0, 1.0, 1.0, 1.0]),
                record("01003", [12.0, 65_000.0, 1.0, 1.0, 1.0, 1.0]),
                record("01005", [f64::NAN, 30_000.0, 1.0, 1.0, 1.0, 1.0]),
            ],
            Vec::new(),
        );

        let mut view = HistogramView::new(SpaceViewId::new_v4(), Axis::Y, HistogramConfig::default());
        view.rebuild(&ctx);

        assert_eq!(view.title(), "Histogram of MHI value");
        assert_eq!(view.bins().iter().map(|b| b.count).sum::<usize>(), 2);
        assert_eq!(view.bins()[0].x0, 0.0);
        assert_eq!(view.bins().last().map(|b| b.x1), Some(65_000.0));
    }

    #[test]
    fn test_brush_survives_unrelated_selector_changes() {
        let mut ctx = context(
            vec![
                record("01001", [4.0, 40_000.0, 1.0, 1.0, 1.0, 1.0]),
                record("01003", [12.0, 65_000.0, 1.0, 1.0, 1.0, 1.0]),
            ],
            Vec::new(),
        );
        let mut view = HistogramView::new(SpaceViewId::new_v4(), Axis::X, HistogramConfig::default());
        view.rebuild(&ctx);
        view.brush.begin([3.0, 0.0]);
        assert!(view.brush.drag_to([5.0, 0.0]).is_some());

        // map and Y selectors do not touch the X histogram
        let previous = ctx.attributes;
        ctx.set_attributes(AttributeSelection {
            map: Attribute::Obesity,
            y: Attribute::Unemployment,
            ..previous
        });
        view.on_attributes_changed(&ctx, previous);
        assert!(view.brush.range().is_some());
        assert!(matches!(view.brush.click(), Some(BrushEvent::Cleared { .. })));

        view.brush.begin([3.0, 0.0]);
        view.brush.drag_to([5.0, 0.0]);
        let previous = ctx.attributes;
        ctx.set_attributes(AttributeSelection { x: Attribute::FoodStamp, ..previous });
        view.on_attributes_changed(&ctx, previous);
        assert!(view.brush.range().is_none());
        assert_eq!(view.title(), "Histogram of Food Stamp Value");
    }
}
