//! Gradient legend for the choropleth

use ce_core::color_scale::{NO_DATA_FILL, MUTED_FILL};
use ce_core::ColorScale;
use egui::{Align2, Color32, FontId, Mesh, Pos2, Rect, Rounding, Sense, Shape, Stroke, Ui, Vec2};

/// Number of gradient stops
pub const LEGEND_STOPS: usize = 11;

/// Number of labelled ticks under the gradient
pub const LEGEND_TICKS: usize = 5;

/// Evenly spaced `(t, value)` ticks over the domain
pub fn legend_ticks(domain: (f64, f64), count: usize) -> Vec<(f32, f64)> {
    if count < 2 {
        return vec![(0.0, domain.0)];
    }
    (0..count)
        .map(|i| {
            let t = i as f64 / (count - 1) as f64;
            (t as f32, domain.0 + t * (domain.1 - domain.0))
        })
        .collect()
}

/// Compact tick label: whole numbers for large values, one decimal otherwise
pub fn format_tick(value: f64) -> String {
    if value.abs() >= 1000.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Draw the legend for `scale` into the next row of `ui`
pub fn legend_ui(ui: &mut Ui, scale: &ColorScale) {
    let stops = scale.gradient_stops(LEGEND_STOPS);
    let text_color = ui.visuals().text_color();

    ui.horizontal(|ui| {
        ui.label(scale.attribute().label());

        let Some(domain) = scale.domain() else {
            ui.label("No data");
            return;
        };

        let width = ui.available_width().clamp(120.0, 320.0);
        let (rect, _) = ui.allocate_exact_size(Vec2::new(width, 34.0), Sense::hover());
        let bar = Rect::from_min_size(rect.min, Vec2::new(width, 12.0));
        let painter = ui.painter_at(rect);

        let mut mesh = Mesh::default();
        for pair in stops.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            let x0 = bar.left() + t0 * bar.width();
            let x1 = bar.left() + t1 * bar.width();
            let base = mesh.vertices.len() as u32;
            mesh.colored_vertex(Pos2::new(x0, bar.top()), c0);
            mesh.colored_vertex(Pos2::new(x1, bar.top()), c1);
            mesh.colored_vertex(Pos2::new(x1, bar.bottom()), c1);
            mesh.colored_vertex(Pos2::new(x0, bar.bottom()), c0);
            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base, base + 2, base + 3);
        }
        painter.add(Shape::mesh(mesh));
        painter.rect_stroke(bar, Rounding::ZERO, Stroke::new(0.5, Color32::from_gray(80)));

        for (t, value) in legend_ticks(domain, LEGEND_TICKS) {
            let x = bar.left() + t * bar.width();
            painter.line_segment(
                [Pos2::new(x, bar.bottom()), Pos2::new(x, bar.bottom() + 4.0)],
                Stroke::new(1.0, text_color),
            );
            let anchor = match t {
                t if t <= 0.0 => Align2::LEFT_TOP,
                t if t >= 1.0 => Align2::RIGHT_TOP,
                _ => Align2::CENTER_TOP,
            };
            painter.text(
                Pos2::new(x, bar.bottom() + 5.0),
                anchor,
                format_tick(value),
                FontId::proportional(10.0),
                text_color,
            );
        }

        ui.add_space(8.0);
        swatch(ui, NO_DATA_FILL, "No data");
        swatch(ui, MUTED_FILL, "Not selected");
    });
}

fn swatch(ui: &mut Ui, color: Color32, label: &str) {
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
    ui.painter().rect_filled(rect, Rounding::ZERO, color);
    ui.painter().rect_stroke(rect, Rounding::ZERO, Stroke::new(0.5, Color32::from_gray(80)));
    ui.label(label);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_span_domain() {
        let ticks = legend_ticks((10.0, 20.0), LEGEND_TICKS);
        assert_eq!(ticks, vec![(0.0, 10.0), (0.25, 12.5), (0.5, 15.0), (0.75, 17.5), (1.0, 20.0)]);
    }

    #[test]
    fn test_tick_labels() {
        assert_eq!(format_tick(12.34), "12.3");
        assert_eq!(format_tick(52_345.6), "52346");
        assert_eq!(format_tick(1_000.0), "1000");
        assert_eq!(format_tick(-2_500.0), "-2500");
    }
}
