use serde::{Deserialize, Serialize};

use super::TimeSeries;
use crate::entities::Point;

/// Raw ticks in arrival order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointSeries {
    points: Vec<Point>,
}

impl PointSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }
}

impl TimeSeries for PointSeries {
    fn append(&mut self, point: Point) {
        self.points.push(point);
    }

    fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    fn as_slice(&self) -> &[Point] {
        &self.points
    }
}
