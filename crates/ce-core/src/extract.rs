//! Attribute extraction for the statistical views

use serde::{Deserialize, Serialize};

use crate::model::{Attribute, CountyId, CountyRecord};

/// The three attribute selectors of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSelection {
    /// Drives the first histogram and the scatterplot X axis
    pub x: Attribute,
    /// Drives the second histogram and the scatterplot Y axis
    pub y: Attribute,
    /// Drives the choropleth coloring
    pub map: Attribute,
}

impl Default for AttributeSelection {
    fn default() -> Self {
        Self {
            x: Attribute::Poverty,
            y: Attribute::MedianHouseholdIncome,
            map: Attribute::Poverty,
        }
    }
}

/// A county projected onto the currently selected X/Y attributes
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPoint {
    pub id: CountyId,
    pub display_name: String,
    pub x: f64,
    pub y: f64,
}

/// Project records onto two attributes, keeping only rows where both are present.
///
/// Source order is preserved.
pub fn extract_points(records: &[CountyRecord], x: Attribute, y: Attribute) -> Vec<ExtractedPoint> {
    records
        .iter()
        .filter_map(|record| {
            let px = record.value_opt(x)?;
            let py = record.value_opt(y)?;
            Some(ExtractedPoint {
                id: record.id.clone(),
                display_name: record.display_name.clone(),
                x: px,
                y: py,
            })
        })
        .collect()
}

/// `[min, max]` of the non-missing values, `None` if there are none
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
