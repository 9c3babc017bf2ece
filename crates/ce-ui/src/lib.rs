//! User interface components for the county explorer
//!
//! Theme, the attribute selectors and the panels around the docked views.

pub mod selectors;
pub mod shell;
pub mod theme;
pub mod widget_utils;

pub use selectors::attribute_combo;
pub use shell::{control_bar, error_panel, status_bar, AttributeChange};
pub use theme::{apply_theme, Theme};
pub use widget_utils::WidgetId;
