//! Widget ID helpers
//!
//! Several selectors share a label layout, so their ids are built from the
//! panel and selector names to keep them distinct.

use egui::Id;
use std::fmt::Display;

/// Widget ID builder that combines several components
pub struct WidgetId {
    components: Vec<String>,
}

impl WidgetId {
    pub fn new(base: impl Display) -> Self {
        Self {
            components: vec![base.to_string()],
        }
    }

    /// Add a component to the ID
    pub fn with(mut self, component: impl Display) -> Self {
        self.components.push(component.to_string());
        self
    }

    pub fn build(&self) -> String {
        self.components.join("_")
    }

    /// Create an egui ID from this widget ID
    pub fn id(&self) -> Id {
        Id::new(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_id_builder() {
        let id = WidgetId::new("controls").with("selector").with("map").build();
        assert_eq!(id, "controls_selector_map");
    }

    #[test]
    fn test_builder_ids_are_distinct() {
        let x = WidgetId::new("controls").with("x").id();
        let y = WidgetId::new("controls").with("y").id();
        assert_ne!(x, y);
    }
}
