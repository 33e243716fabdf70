use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::charts::ChartData;
use crate::entities::{AccountId, Point};
use crate::series::{BarSeries, PointSeries, TimeSeries};
use crate::values::{Price, TimeFrame};

/// Unique identifier for an instrument
///
/// Orders and points store this instead of the instrument itself, so the
/// instrument (and its history) has exactly one owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstrumentId(pub String);

impl InstrumentId {
    /// Create a new instrument ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for InstrumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for InstrumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Tradeable instrument with its price history
///
/// Trading-economics parameters are optional so that a connector can
/// report "unknown" separately from zero; the rule sets decide which of
/// them must be present before the instrument can be traded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub id: InstrumentId,
    pub volume: Option<Decimal>,
    pub open_interest: Option<Decimal>,
    /// Overnight swap rate for long positions
    pub swap_long: Option<Decimal>,
    /// Overnight swap rate for short positions
    pub swap_short: Option<Decimal>,
    /// Leverage or margin rate
    pub leverage: Option<Decimal>,
    pub commission: Option<Decimal>,
    /// Contract size for 1 lot
    pub contract_size: Option<Decimal>,
    /// Minimum price change
    pub step_size: Option<Decimal>,
    /// Money value of one `step_size` move
    pub step_value: Option<Decimal>,
    /// Aggregation period for `point_groups`
    pub time_frame: Option<TimeFrame>,
    pub account: Option<AccountId>,
    pub chart_data: ChartData,
    /// Latest point received
    pub point: Option<Point>,
    /// Every tick from the server
    pub points: PointSeries,
    /// Ticks aggregated into bars of `time_frame`
    pub point_groups: BarSeries,
}

impl Instrument {
    /// Create an instrument with default trading economics
    pub fn new(name: impl Into<InstrumentId>) -> Self {
        let id = name.into();
        Self {
            chart_data: ChartData::new(id.as_str()),
            id,
            volume: None,
            open_interest: None,
            swap_long: Some(Decimal::ZERO),
            swap_short: Some(Decimal::ZERO),
            leverage: None,
            commission: Some(Decimal::ZERO),
            contract_size: Some(Decimal::ONE),
            step_size: Some(dec!(0.01)),
            step_value: Some(dec!(0.01)),
            time_frame: None,
            account: None,
            point: None,
            points: PointSeries::new(),
            point_groups: BarSeries::new(None),
        }
    }

    pub fn name(&self) -> &str {
        self.id.as_str()
    }

    pub fn with_time_frame(mut self, time_frame: TimeFrame) -> Self {
        self.time_frame = Some(time_frame);
        self.point_groups.set_time_frame(Some(time_frame));
        self
    }

    pub fn with_swaps(mut self, swap_long: Decimal, swap_short: Decimal) -> Self {
        self.swap_long = Some(swap_long);
        self.swap_short = Some(swap_short);
        self
    }

    pub fn with_commission(mut self, commission: Decimal) -> Self {
        self.commission = Some(commission);
        self
    }

    pub fn with_contract_size(mut self, contract_size: Decimal) -> Self {
        self.contract_size = Some(contract_size);
        self
    }

    pub fn with_step(mut self, step_size: Decimal, step_value: Decimal) -> Self {
        self.step_size = Some(step_size);
        self.step_value = Some(step_value);
        self
    }

    pub fn with_leverage(mut self, leverage: Decimal) -> Self {
        self.leverage = Some(leverage);
        self
    }

    pub fn with_chart_data(mut self, chart_data: ChartData) -> Self {
        self.chart_data = chart_data;
        self
    }

    /// Record a point in both series and make it the current point
    ///
    /// Bars are bucketed by the instrument's current `time_frame`.
    pub fn append(&mut self, point: Point) {
        self.point_groups.set_time_frame(self.time_frame);
        self.points.append(point.clone());
        self.point_groups.append(point.clone());
        self.point = Some(point);
    }

    /// Most recent aggregated bar
    pub fn last_bar(&self) -> Option<&Point> {
        self.point_groups.last()
    }

    /// Money value of a price move, in steps of `step_size`
    pub fn tick_value(&self, price_change: Price) -> Option<Decimal> {
        let step_size = self.step_size.filter(|s| !s.is_zero())?;
        Some(price_change / step_size * self.step_value?)
    }
}
