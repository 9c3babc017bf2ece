//! Attribute dropdowns

use ce_core::Attribute;
use egui::{ComboBox, Ui};

use crate::widget_utils::WidgetId;

/// Labelled dropdown over [`Attribute::ALL`]. Returns true when the selection changed.
pub fn attribute_combo(ui: &mut Ui, label: &str, id: WidgetId, selected: &mut Attribute) -> bool {
    let before = *selected;
    ui.label(label);
    ComboBox::from_id_source(id.id())
        .selected_text(selected.label())
        .width(190.0)
        .show_ui(ui, |ui| {
            for attribute in Attribute::ALL {
                ui.selectable_value(selected, attribute, attribute.label());
            }
        });
    before != *selected
}
