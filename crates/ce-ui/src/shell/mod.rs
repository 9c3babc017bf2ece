use ce_core::AttributeSelection;
use egui::{CentralPanel, Context, RichText, TopBottomPanel};
use tracing::debug;

use crate::selectors::attribute_combo;
use crate::theme::error_color;
use crate::widget_utils::WidgetId;

/// Which parts of the attribute selection moved during a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeChange {
    /// The X or Y attribute changed
    pub axes: bool,
    /// The map attribute changed
    pub map: bool,
}

impl AttributeChange {
    pub fn between(old: &AttributeSelection, new: &AttributeSelection) -> Self {
        Self {
            axes: old.x != new.x || old.y != new.y,
            map: old.map != new.map,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.axes && !self.map
    }
}

/// Top bar with the three attribute selectors
pub fn control_bar(ctx: &Context, selection: &mut AttributeSelection) -> AttributeChange {
    let before = *selection;

    TopBottomPanel::top("control_bar").show(ctx, |ui| {
        ui.horizontal_wrapped(|ui| {
            ui.heading("County Explorer");
            ui.separator();
            attribute_combo(ui, "X:", WidgetId::new("controls").with("x"), &mut selection.x);
            attribute_combo(ui, "Y:", WidgetId::new("controls").with("y"), &mut selection.y);
            ui.separator();
            attribute_combo(ui, "Map:", WidgetId::new("controls").with("map"), &mut selection.map);
        });
    });

    let change = AttributeChange::between(&before, selection);
    if !change.is_empty() {
        debug!(?change, "Attribute selection changed");
    }
    change
}

/// Bottom status line
pub fn status_bar(ctx: &Context, text: &str) {
    TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.small(text);
        });
    });
}

/// Full-window error message, shown instead of the dashboard
pub fn error_panel(ctx: &Context, message: &str) {
    CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.3);
            ui.label(RichText::new("Failed to load data").heading().color(error_color()));
            ui.add_space(8.0);
            ui.label(message);
        });
    });
}
