//! Choropleth color scale

use egui::Color32;

use crate::extract::extent;
use crate::model::{Attribute, CountyRecord};

/// Light end of the sequential range (`#c7d9e9`)
pub const RANGE_LOW: Color32 = Color32::from_rgb(0xc7, 0xd9, 0xe9);

/// Dark end of the sequential range (`#4682b4`, steel blue)
pub const RANGE_HIGH: Color32 = Color32::from_rgb(0x46, 0x82, 0xb4);

/// Counties outside the active filter (`#eeeeee`)
pub const MUTED_FILL: Color32 = Color32::from_rgb(0xee, 0xee, 0xee);

/// Counties without a value for the attribute (`#cccccc`)
pub const NO_DATA_FILL: Color32 = Color32::from_rgb(0xcc, 0xcc, 0xcc);

/// Used for every value when the domain is degenerate
pub const FALLBACK_COLOR: Color32 = RANGE_LOW;

/// Linear mapping from an attribute's `[min, max]` to a two-color range.
///
/// Values outside the domain are clamped to the ends of the range.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    attribute: Attribute,
    domain: Option<(f64, f64)>,
    low: Color32,
    high: Color32,
}

impl ColorScale {
    /// Build the scale for `attribute` from every record, ignoring missing values
    pub fn build(attribute: Attribute, records: &[CountyRecord]) -> Self {
        let domain = extent(records.iter().map(|r| r.value(attribute)));
        if domain.is_none() {
            tracing::warn!("No values for {}, map falls back to a constant color", attribute);
        }
        Self {
            attribute,
            domain,
            low: RANGE_LOW,
            high: RANGE_HIGH,
        }
    }

    /// Replace the output range
    pub fn with_range(mut self, low: Color32, high: Color32) -> Self {
        self.low = low;
        self.high = high;
        self
    }

    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// `[min, max]` of the attribute, `None` when every value is missing
    pub fn domain(&self) -> Option<(f64, f64)> {
        self.domain
    }

    pub fn color(&self, value: f64) -> Color32 {
        let Some((min, max)) = self.domain else {
            return FALLBACK_COLOR;
        };
        if value.is_nan() {
            return FALLBACK_COLOR;
        }
        if max <= min {
            return self.low;
        }
        let t = ((value - min) / (max - min)).clamp(0.0, 1.0);
        lerp_color(self.low, self.high, t as f32)
    }

    /// `n` evenly spaced colors from `min` to `max` for the legend.
    ///
    /// Empty when the domain is degenerate.
    pub fn gradient_stops(&self, n: usize) -> Vec<(f32, Color32)> {
        let Some((min, max)) = self.domain else {
            return Vec::new();
        };
        if n < 2 {
            return vec![(0.0, self.color(min))];
        }
        (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64;
                (t as f32, self.color(min + t * (max - min)))
            })
            .collect()
    }
}

/// Interpolate in RGB, rounding each channel
pub fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let channel = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgb(channel(a.r(), b.r()), channel(a.g(), b.g()), channel(a.b(), b.b()))
}
