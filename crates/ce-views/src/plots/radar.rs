//! Radar chart of attribute averages

use std::f64::consts::PI;

use ce_core::{Attribute, AttributeSelection, CountyRecord, SharedIdSet};
use egui::{Align2, Color32, Stroke, Ui};
use egui_plot::{Line, Plot, PlotPoints, PlotUi, Polygon, Text};

use crate::{SpaceView, SpaceViewId, ViewerContext};

/// Configuration for radar view
#[derive(Clone)]
pub struct RadarConfig {
    pub num_rings: usize,
    pub fill_color: Color32,
    pub line_width: f32,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            num_rings: 5,
            fill_color: Color32::from_rgb(0x46, 0x82, 0xb4),
            line_width: 2.0,
        }
    }
}

/// Mean of each attribute over `records`, in [`Attribute::ALL`] order.
///
/// Missing values are skipped per attribute; an attribute without any values averages to 0.
pub fn attribute_means<'a>(records: impl IntoIterator<Item = &'a CountyRecord>) -> [f64; 6] {
    let mut sums = [0.0; 6];
    let mut counts = [0usize; 6];
    for record in records {
        for (i, &value) in record.values().iter().enumerate() {
            if !value.is_nan() {
                sums[i] += value;
                counts[i] += 1;
            }
        }
    }
    std::array::from_fn(|i| if counts[i] == 0 { 0.0 } else { sums[i] / counts[i] as f64 })
}

/// Six-axis radar of attribute averages over the selection or the current extraction
pub struct RadarView {
    id: SpaceViewId,
    title: String,
    pub config: RadarConfig,

    // State
    filter: Option<SharedIdSet>,
    means: Option<[f64; 6]>,
}

impl RadarView {
    pub fn new(id: SpaceViewId, config: RadarConfig) -> Self {
        Self {
            id,
            title: "All Counties".to_string(),
            config,
            filter: None,
            means: None,
        }
    }

    pub fn means(&self) -> Option<[f64; 6]> {
        self.means
    }

    fn rebuild(&mut self, ctx: &ViewerContext) {
        let dataset = &ctx.dataset;
        match &self.filter {
            Some(filter) => {
                let records: Vec<&CountyRecord> = filter.iter().filter_map(|id| dataset.record(id)).collect();
                self.title = format!("Filtered Data ({} counties)", records.len());
                self.means = Some(attribute_means(records));
            }
            None => {
                let records: Vec<&CountyRecord> = ctx.points.iter().filter_map(|p| dataset.record(&p.id)).collect();
                self.title = format!("All Counties ({})", records.len());
                self.means = Some(attribute_means(records));
            }
        }
    }

    fn plot_radar(&self, plot_ui: &mut PlotUi, means: &[f64; 6]) {
        let num_axes = Attribute::ALL.len();
        let angle_step = 2.0 * PI / num_axes as f64;
        // clockwise from the top
        let angle = |i: usize| PI / 2.0 - i as f64 * angle_step;

        let max_mean = means.iter().copied().fold(0.0_f64, f64::max);
        let radar_max = if max_mean > 0.0 { max_mean } else { 1.0 };

        // Concentric rings
        for ring in 1..=self.config.num_rings {
            let radius = ring as f64 / self.config.num_rings as f64;
            let points: Vec<[f64; 2]> = (0..=num_axes)
                .map(|i| [radius * angle(i).cos(), radius * angle(i).sin()])
                .collect();
            plot_ui.line(Line::new(PlotPoints::new(points)).color(Color32::from_gray(120)).width(0.5));
        }

        // Axes and labels
        for (i, attribute) in Attribute::ALL.iter().enumerate() {
            let (cos, sin) = (angle(i).cos(), angle(i).sin());
            plot_ui.line(
                Line::new(PlotPoints::new(vec![[0.0, 0.0], [cos, sin]]))
                    .color(Color32::from_gray(120))
                    .width(0.5),
            );
            plot_ui.text(
                Text::new([1.15 * cos, 1.15 * sin].into(), attribute.label())
                    .color(Color32::from_gray(200))
                    .anchor(Align2::CENTER_CENTER),
            );
        }

        let polygon: Vec<[f64; 2]> = means
            .iter()
            .enumerate()
            .map(|(i, &mean)| {
                let r = mean / radar_max;
                [r * angle(i).cos(), r * angle(i).sin()]
            })
            .collect();

        plot_ui.polygon(
            Polygon::new(PlotPoints::new(polygon))
                .fill_color(self.config.fill_color.gamma_multiply(0.4))
                .stroke(Stroke::new(self.config.line_width, self.config.fill_color))
                .name("Average"),
        );
    }
}

impl SpaceView for RadarView {
    fn id(&self) -> SpaceViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "RadarView"
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        if self.means.is_none() {
            self.rebuild(ctx);
        }
        let Some(means) = self.means else {
            return;
        };

        ui.heading(&self.title);

        let plot = Plot::new(self.id)
            .data_aspect(1.0)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_boxed_zoom(false)
            .allow_scroll(false)
            .show_axes(false)
            .show_grid(false)
            .show_x(false)
            .show_y(false)
            .include_x(-1.4)
            .include_x(1.4)
            .include_y(-1.3)
            .include_y(1.3);

        let plot_response = plot.show(ui, |plot_ui| {
            self.plot_radar(plot_ui, &means);
        });

        if plot_response.response.hovered() {
            let text = Attribute::ALL
                .iter()
                .zip(means.iter())
                .map(|(attribute, mean)| format!("{}: {:.2}", attribute.label(), mean))
                .collect::<Vec<_>>()
                .join("\n");
            plot_response.response.on_hover_text(text);
        }
    }

    fn on_attributes_changed(&mut self, ctx: &ViewerContext, previous: AttributeSelection) {
        // the unfiltered population is the X/Y extraction
        if previous.x != ctx.attributes.x || previous.y != ctx.attributes.y {
            self.rebuild(ctx);
        }
    }

    fn on_selection_change(&mut self, ctx: &ViewerContext, filter: Option<&SharedIdSet>) {
        self.filter = filter.cloned();
        self.rebuild(ctx);
    }
}
