use serde::{Deserialize, Serialize};

/// How a series is drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Line,
    Area,
    Bar,
    Candle,
    Dot,
}

/// Style of a single chart series
///
/// Every instrument owns one of these; ingestion copies it onto each point
/// so renderers can place the point without looking the instrument up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    /// Series name, unique within a chart
    pub name: String,
    /// Chart area (pane) the series is attached to
    pub area: Option<String>,
    pub shape: ShapeKind,
    /// Any CSS-style color string
    pub color: Option<String>,
}

impl ChartData {
    /// Create a line series with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    pub fn with_shape(mut self, shape: ShapeKind) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}
