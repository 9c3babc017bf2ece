//! Plot view implementations

// Statistical views
pub mod histogram;
pub mod radar;
pub mod scatter;

// Geographic views
pub mod legend;
pub mod map;
pub mod projection;

// Re-exports
pub use histogram::HistogramView;
pub use map::MapView;
pub use radar::RadarView;
pub use scatter::ScatterView;
