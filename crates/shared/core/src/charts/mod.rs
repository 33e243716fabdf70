//! Chart styling models
//!
//! Only the parts the gateway needs: the per-series style carried by
//! instruments and points, and the ordered series container.

mod chart;
mod chart_data;
mod name_collection;

pub use chart::{Chart, ValueFormat};
pub use chart_data::{ChartData, ShapeKind};
pub use name_collection::NameCollection;
