//! Viewport - the docked dashboard layout

use std::collections::HashMap;

use egui::Ui;
use egui_dock::{DockArea, DockState, NodeIndex, TabViewer};

use crate::{SpaceView, SpaceViewId, ViewerContext};

/// Owns the dashboard's views and their dock layout
pub struct Viewport {
    dock_state: DockState<SpaceViewId>,
    space_views: HashMap<SpaceViewId, Box<dyn SpaceView>>,
}

/// The five views of the dashboard
pub struct DashboardViews {
    pub map: Box<dyn SpaceView>,
    pub histogram_x: Box<dyn SpaceView>,
    pub histogram_y: Box<dyn SpaceView>,
    pub scatter: Box<dyn SpaceView>,
    pub radar: Box<dyn SpaceView>,
}

impl Viewport {
    /// Map on the left with both histograms under it, scatterplot and radar stacked on the right
    pub fn dashboard(views: DashboardViews) -> Self {
        let DashboardViews {
            map,
            histogram_x,
            histogram_y,
            scatter,
            radar,
        } = views;

        let mut dock_state = DockState::new(vec![map.id()]);
        let surface = dock_state.main_surface_mut();
        let [left, right] = surface.split_right(NodeIndex::root(), 0.55, vec![scatter.id()]);
        surface.split_below(right, 0.5, vec![radar.id()]);
        let [_, histograms] = surface.split_below(left, 0.62, vec![histogram_x.id()]);
        surface.split_right(histograms, 0.5, vec![histogram_y.id()]);

        let space_views = [map, histogram_x, histogram_y, scatter, radar]
            .into_iter()
            .map(|view| (view.id(), view))
            .collect();

        Self {
            dock_state,
            space_views,
        }
    }

    pub fn view_mut(&mut self, id: SpaceViewId) -> Option<&mut Box<dyn SpaceView>> {
        self.space_views.get_mut(&id)
    }

    pub fn for_each_view_mut(&mut self, mut f: impl FnMut(&mut dyn SpaceView)) {
        for view in self.space_views.values_mut() {
            f(view.as_mut());
        }
    }

    pub fn len(&self) -> usize {
        self.space_views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.space_views.is_empty()
    }

    /// Draw the viewport
    pub fn ui(&mut self, ui: &mut Ui, viewer_context: &ViewerContext) {
        DockArea::new(&mut self.dock_state)
            .show_close_buttons(false)
            .draggable_tabs(true)
            .show_inside(
                ui,
                &mut ViewportTabViewer {
                    space_views: &mut self.space_views,
                    viewer_context,
                },
            );
    }
}

/// Tab viewer for egui_dock
struct ViewportTabViewer<'a> {
    space_views: &'a mut HashMap<SpaceViewId, Box<dyn SpaceView>>,
    viewer_context: &'a ViewerContext,
}

impl<'a> TabViewer for ViewportTabViewer<'a> {
    type Tab = SpaceViewId;

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        match self.space_views.get(tab) {
            Some(view) => view.title().into(),
            None => "Unknown".into(),
        }
    }

    fn ui(&mut self, ui: &mut Ui, tab: &mut Self::Tab) {
        if let Some(view) = self.space_views.get_mut(tab) {
            view.ui(self.viewer_context, ui);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stub {
        id: SpaceViewId,
        cleared: bool,
    }

    impl SpaceView for Stub {
        fn id(&self) -> SpaceViewId {
            self.id
        }
        fn title(&self) -> &str {
            if self.cleared {
                "cleared"
            } else {
                "stub"
            }
        }
        fn view_type(&self) -> &str {
            "Stub"
        }
        fn ui(&mut self, _ctx: &ViewerContext, _ui: &mut Ui) {}
        fn clear_brush(&mut self) {
            self.cleared = true;
        }
    }

    fn stub() -> Box<dyn SpaceView> {
        Box::new(Stub {
            id: SpaceViewId::new_v4(),
            cleared: false,
        })
    }

    #[test]
    fn test_dashboard_holds_all_views() {
        let scatter = stub();
        let scatter_id = scatter.id();
        let mut viewport = Viewport::dashboard(DashboardViews {
            map: stub(),
            histogram_x: stub(),
            histogram_y: stub(),
            scatter,
            radar: stub(),
        });

        assert_eq!(viewport.len(), 5);

        let view = viewport.view_mut(scatter_id).unwrap();
        assert_eq!(view.title(), "stub");
        view.clear_brush();
        assert_eq!(view.title(), "cleared");
        assert!(viewport.view_mut(SpaceViewId::new_v4()).is_none());
    }
}
