//! Space view abstraction - base trait for all dockable views

use ce_core::{AttributeSelection, SharedIdSet};
use egui::Ui;
use uuid::Uuid;

use crate::{BrushSurface, ViewerContext};

/// Unique identifier for a space view; doubles as the brush owner id
pub type SpaceViewId = Uuid;

/// Base trait for all space views
pub trait SpaceView: Send + Sync {
    /// Get the unique ID of this view
    fn id(&self) -> SpaceViewId;

    /// Get the title of this view
    fn title(&self) -> &str;

    /// Get the view type
    fn view_type(&self) -> &str;

    /// Draw the UI
    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui);

    /// The attribute selectors changed from `previous`; `ctx` already carries the new extraction
    fn on_attributes_changed(&mut self, _ctx: &ViewerContext, _previous: AttributeSelection) {}

    /// The linked selection changed (`None` means unfiltered)
    fn on_selection_change(&mut self, _ctx: &ViewerContext, _filter: Option<&SharedIdSet>) {}

    /// Drop the visual brush without emitting an event
    fn clear_brush(&mut self) {}

    /// The view's brush, for views that can be brushed
    fn brush_mut(&mut self) -> Option<&mut BrushSurface> {
        None
    }
}
