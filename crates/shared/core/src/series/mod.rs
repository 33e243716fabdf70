//! Per-instrument time series
//!
//! `PointSeries` keeps every tick as received. `BarSeries` folds ticks into
//! bars whose boundaries are aligned to the epoch (1m bars close on minute
//! boundaries).

mod bar_series;
mod point_series;

pub use bar_series::{BarSeries, bucket_start};
pub use point_series::PointSeries;

use crate::entities::Point;

/// Ordered, time-keyed sequence of points
pub trait TimeSeries {
    /// Add a point at the end of the sequence
    fn append(&mut self, point: Point);

    fn last(&self) -> Option<&Point>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_slice(&self) -> &[Point];
}
