//! Linked views for the county explorer

pub mod brush;
pub mod plots;
mod space_view;
mod viewport;

pub use brush::{BrushMode, BrushSurface};
pub use plots::{HistogramView, MapView, RadarView, ScatterView};
pub use space_view::{SpaceView, SpaceViewId};
pub use viewport::{DashboardViews, Viewport};

use std::sync::Arc;

use ce_core::{extract_points, AttributeSelection, BrushEvent, ExtractedPoint};
use ce_data::Dataset;
use parking_lot::Mutex;

/// Context passed to views during rendering
#[derive(Clone)]
pub struct ViewerContext {
    /// The loaded, immutable dataset
    pub dataset: Arc<Dataset>,

    /// Current attribute selectors
    pub attributes: AttributeSelection,

    /// Records projected onto the X/Y attributes, shared by the statistical views
    pub points: Arc<Vec<ExtractedPoint>>,

    /// Brush events emitted this frame, drained by the app after the views ran
    pub brush_events: Arc<Mutex<Vec<BrushEvent>>>,
}

impl ViewerContext {
    pub fn new(dataset: Arc<Dataset>, attributes: AttributeSelection) -> Self {
        let points = Arc::new(extract_points(dataset.records(), attributes.x, attributes.y));
        Self {
            dataset,
            attributes,
            points,
            brush_events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Swap in new selectors, re-extracting only when X or Y changed
    pub fn set_attributes(&mut self, attributes: AttributeSelection) {
        if attributes.x != self.attributes.x || attributes.y != self.attributes.y {
            self.points = Arc::new(extract_points(self.dataset.records(), attributes.x, attributes.y));
        }
        self.attributes = attributes;
    }

    pub fn emit(&self, event: BrushEvent) {
        self.brush_events.lock().push(event);
    }

    pub fn take_events(&self) -> Vec<BrushEvent> {
        std::mem::take(&mut *self.brush_events.lock())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use ce_core::{AttributeSelection, CountyId, CountyRecord};
    use ce_data::{BoundaryFeature, Dataset};
    use geo_types::{polygon, MultiPolygon};

    use crate::ViewerContext;

    pub fn record(id: &str, values: [f64; 6]) -> CountyRecord {
        CountyRecord::new(CountyId::new(id), format!("County {}", id), values)
    }

    /// Unit square boundary with its lower-left corner at (`lon`, `lat`)
    pub fn square(id: &str, lon: f64, lat: f64) -> BoundaryFeature {
        BoundaryFeature {
            id: CountyId::new(id),
            geometry: MultiPolygon::new(vec![polygon![
                (x: lon, y: lat),
                (x: lon + 1.0, y: lat),
                (x: lon + 1.0, y: lat + 1.0),
                (x: lon, y: lat + 1.0),
                (x: lon, y: lat),
            ]]),
        }
    }

    pub fn context(records: Vec<CountyRecord>, boundaries: Vec<BoundaryFeature>) -> ViewerContext {
        ViewerContext::new(Arc::new(Dataset::new(records, boundaries)), AttributeSelection::default())
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{context, record};
    use ce_core::{Attribute, AttributeSelection, BrushEvent};
    use uuid::Uuid;

    #[test]
    fn test_points_follow_xy_selection() {
        let mut ctx = context(
            vec![
                record("01001", [10.0, 50.0, 1.0, 1.0, 1.0, f64::NAN]),
                record("01003", [20.0, f64::NAN, 1.0, 1.0, 1.0, 5.0]),
            ],
            Vec::new(),
        );
        assert_eq!(ctx.points.len(), 1);

        ctx.set_attributes(AttributeSelection {
            x: Attribute::Poverty,
            y: Attribute::Unemployment,
            map: Attribute::Poverty,
        });
        assert_eq!(ctx.points.len(), 1);
        assert_eq!(ctx.points[0].id.as_str(), "01003");
    }

    #[test]
    fn test_events_are_drained_once() {
        let ctx = context(Vec::new(), Vec::new());
        let owner = Uuid::new_v4();
        ctx.emit(BrushEvent::Cleared { owner });

        assert_eq!(ctx.take_events(), vec![BrushEvent::Cleared { owner }]);
        assert!(ctx.take_events().is_empty());
    }
}
