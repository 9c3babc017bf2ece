//! Application state and frame loop

use std::sync::Arc;

use ce_core::{AttributeSelection, Axis, BrushEvent, SelectionCoordinator, SelectionEffect};
use ce_data::{load_dataset, Dataset, LoadConfig};
use ce_ui::{apply_theme, control_bar, error_panel, status_bar, AttributeChange, Theme};
use ce_views::plots::histogram::HistogramConfig;
use ce_views::plots::map::MapConfig;
use ce_views::plots::radar::RadarConfig;
use ce_views::plots::scatter::ScatterConfig;
use ce_views::{
    DashboardViews, HistogramView, MapView, RadarView, ScatterView, SpaceView, ViewerContext, Viewport,
};
use eframe::egui::{self, CentralPanel, Context};
use parking_lot::Mutex;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::{DashboardConfig, DataSource};
use crate::demo::{demo_dataset, DEMO_SEED};

/// Result slot filled by the background load
#[derive(Clone)]
enum LoadState {
    Loading,
    Ready(Arc<Dataset>),
    Failed(String),
}

pub struct CountyExplorerApp {
    config: DashboardConfig,
    load_state: Arc<Mutex<LoadState>>,
    dashboard: Option<Dashboard>,

    /// Kept alive for the background load
    _runtime: tokio::runtime::Runtime,
}

impl CountyExplorerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig, runtime: tokio::runtime::Runtime) -> Self {
        apply_theme(&cc.egui_ctx, &Theme { dark_mode: config.dark_mode });

        let load_state = Arc::new(Mutex::new(LoadState::Loading));
        match config.data_source() {
            DataSource::Demo => {
                info!("Building demo dataset");
                *load_state.lock() = LoadState::Ready(Arc::new(demo_dataset(DEMO_SEED)));
            }
            DataSource::Files(load) => {
                info!("Loading {} and {}", load.data_path.display(), load.boundaries_path.display());
                let slot = load_state.clone();
                let egui_ctx = cc.egui_ctx.clone();
                runtime.spawn(async move {
                    let next = load_state_from(load).await;
                    *slot.lock() = next;
                    egui_ctx.request_repaint();
                });
            }
        }

        Self {
            config,
            load_state,
            dashboard: None,
            _runtime: runtime,
        }
    }
}

/// Run the load, logging a failure once
async fn load_state_from(load: LoadConfig) -> LoadState {
    match load_dataset(load).await {
        Ok(dataset) => LoadState::Ready(Arc::new(dataset)),
        Err(e) => {
            error!("Failed to load data: {}", e);
            LoadState::Failed(e.to_string())
        }
    }
}

impl eframe::App for CountyExplorerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if self.dashboard.is_none() {
            let state = self.load_state.lock().clone();
            match state {
                LoadState::Loading => {
                    status_bar(ctx, "Loading data...");
                    CentralPanel::default().show(ctx, |ui| {
                        ui.centered_and_justified(|ui| {
                            ui.spinner();
                        });
                    });
                    return;
                }
                LoadState::Failed(message) => {
                    error_panel(ctx, &message);
                    return;
                }
                LoadState::Ready(dataset) => {
                    self.dashboard = Some(Dashboard::new(dataset, &self.config));
                }
            }
        }

        if let Some(dashboard) = &mut self.dashboard {
            dashboard.show(ctx);
        }
    }
}

/// The loaded dashboard: views, their shared context and the coordinator
struct Dashboard {
    viewport: Viewport,
    context: ViewerContext,
    coordinator: SelectionCoordinator,
}

impl Dashboard {
    fn new(dataset: Arc<Dataset>, config: &DashboardConfig) -> Self {
        let attributes = config.attributes();
        let histogram = HistogramConfig {
            thresholds: config.histogram_thresholds,
            ..HistogramConfig::default()
        };

        let views = DashboardViews {
            map: Box::new(MapView::new(Uuid::new_v4(), dataset.clone(), attributes.map, MapConfig::default())),
            histogram_x: Box::new(HistogramView::new(Uuid::new_v4(), Axis::X, histogram.clone())),
            histogram_y: Box::new(HistogramView::new(Uuid::new_v4(), Axis::Y, histogram)),
            scatter: Box::new(ScatterView::new(Uuid::new_v4(), ScatterConfig::default())),
            radar: Box::new(RadarView::new(Uuid::new_v4(), RadarConfig::default())),
        };

        info!(
            "Dashboard ready: {} counties, {} boundaries",
            dataset.records().len(),
            dataset.features().len()
        );

        Self {
            viewport: Viewport::dashboard(views),
            context: ViewerContext::new(dataset, attributes),
            coordinator: SelectionCoordinator::new(),
        }
    }

    fn show(&mut self, ctx: &Context) {
        let mut selection = self.context.attributes;
        let change = control_bar(ctx, &mut selection);
        if !change.is_empty() {
            self.change_attributes(selection, change);
        }

        status_bar(ctx, &self.status_text());

        CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.viewport.ui(ui, &self.context));

        for event in self.context.take_events() {
            self.dispatch(event);
        }
    }

    fn change_attributes(&mut self, selection: AttributeSelection, change: AttributeChange) {
        // The brushed geometry no longer exists once X or Y moves
        if change.axes {
            if let Some(owner) = self.coordinator.state().owner() {
                self.dispatch(BrushEvent::Cleared { owner });
            }
        }

        let previous = self.context.attributes;
        self.context.set_attributes(selection);
        let context = &self.context;
        self.viewport
            .for_each_view_mut(|view| view.on_attributes_changed(context, previous));
    }

    fn dispatch(&mut self, event: BrushEvent) {
        let effects = self.coordinator.apply(event, &self.context.points);
        for effect in effects {
            match effect {
                SelectionEffect::ClearBrush(id) => {
                    if let Some(view) = self.viewport.view_mut(id) {
                        view.clear_brush();
                    }
                }
                SelectionEffect::RenderMap(filter) => {
                    let context = &self.context;
                    self.viewport
                        .for_each_view_mut(|view| view.on_selection_change(context, filter.as_ref()));
                }
            }
        }
    }

    fn status_text(&self) -> String {
        let total = self.context.dataset.records().len();
        match self.coordinator.state().filter() {
            Some(filter) => format!("{} of {} counties selected", filter.len(), total),
            None => format!("{} counties | drag on a histogram or the scatterplot to filter the map", total),
        }
    }
}
