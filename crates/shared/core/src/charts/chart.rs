use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ChartData, NameCollection};

/// Formatting applied to labels on the value axis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueFormat {
    /// Round to this many decimal places
    pub decimals: Option<u32>,
    /// Appended after the number, e.g. "%" or " USD"
    pub suffix: Option<String>,
}

impl ValueFormat {
    pub fn format(&self, value: Decimal) -> String {
        let value = match self.decimals {
            Some(dp) => value.round_dp(dp),
            None => value.normalize(),
        };
        match &self.suffix {
            Some(suffix) => format!("{}{}", value, suffix),
            None => value.to_string(),
        }
    }
}

/// Chart with a set of named series
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart {
    pub name: String,
    /// Series keyed by name, drawn in insertion order
    pub chart_data: NameCollection<String, ChartData>,
    pub value_format: ValueFormat,
}

impl Chart {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add or replace a series, keyed by its name
    pub fn add_series(&mut self, series: ChartData) -> Option<ChartData> {
        self.chart_data.set(series.name.clone(), series)
    }

    pub fn series(&self, name: &str) -> Option<&ChartData> {
        self.chart_data.get(&name.to_string())
    }

    /// Series names in render order
    pub fn render_order(&self) -> Vec<&str> {
        self.chart_data.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ShapeKind;
    use rust_decimal_macros::dec;

    #[test]
    fn test_render_order_follows_insertion() {
        let mut chart = Chart::new("EURUSD");
        chart.add_series(ChartData::new("bars").with_shape(ShapeKind::Candle));
        chart.add_series(ChartData::new("ema"));
        chart.add_series(ChartData::new("volume").with_area("lower"));

        assert_eq!(chart.render_order(), vec!["bars", "ema", "volume"]);
    }

    #[test]
    fn test_replacing_series_keeps_position() {
        let mut chart = Chart::new("EURUSD");
        chart.add_series(ChartData::new("bars"));
        chart.add_series(ChartData::new("ema"));

        let previous = chart.add_series(ChartData::new("bars").with_color("red"));

        assert!(previous.is_some());
        assert_eq!(chart.render_order(), vec!["bars", "ema"]);
        assert_eq!(
            chart.series("bars").and_then(|s| s.color.as_deref()),
            Some("red")
        );
    }

    #[test]
    fn test_value_format() {
        let format = ValueFormat {
            decimals: Some(2),
            suffix: Some("%".to_string()),
        };
        assert_eq!(format.format(dec!(12.3456)), "12.35%");
        assert_eq!(ValueFormat::default().format(dec!(1.500)), "1.5");
    }
}
