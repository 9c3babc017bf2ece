//! Core functionality for the county explorer
//!
//! This crate provides the data model shared by every view, the linked
//! selection state and its coordinator, and the choropleth color scale.

pub mod color_scale;
pub mod coordinator;
pub mod extract;
pub mod model;
pub mod selection;

// Re-export commonly used types
pub use color_scale::ColorScale;
pub use coordinator::{Axis, BrushEvent, BrushRange, SelectionCoordinator, SelectionEffect};
pub use extract::{extent, extract_points, AttributeSelection, ExtractedPoint};
pub use model::{Attribute, CountyId, CountyRecord};
pub use selection::{ControlId, IdSet, SelectionState, SharedIdSet};
