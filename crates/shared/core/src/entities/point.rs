use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AccountId;
use crate::charts::ChartData;
use crate::instruments::InstrumentId;
use crate::values::{Price, Quantity, TimeFrame, Timestamp};

/// Open/high/low/close of an aggregated bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl Bar {
    /// A flat bar where every value is `price`
    pub fn flat(price: Price) -> Self {
        Self {
            open: price,
            high: price,
            low: price,
            close: price,
        }
    }

    /// Fold a later bar into this one
    pub fn merge(&mut self, later: &Bar) {
        self.high = self.high.max(later.high);
        self.low = self.low.min(later.low);
        self.close = later.close;
    }

    /// Widen the range with an out-of-order bar, keeping open and close
    pub fn widen(&mut self, earlier: &Bar) {
        self.high = self.high.max(earlier.high);
        self.low = self.low.min(earlier.low);
    }

    pub fn range(&self) -> Decimal {
        self.high - self.low
    }
}

/// Single price observation for an instrument
///
/// `instrument_id` refers back to the owning instrument without owning it.
/// `account`, `name`, `chart_data` and `time_frame` are stamped by the
/// ingestion pipeline and are only meaningful after a point went through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub time: Timestamp,
    pub instrument_id: InstrumentId,
    pub bid: Option<Price>,
    pub ask: Option<Price>,
    pub last: Option<Price>,
    pub bid_size: Option<Quantity>,
    pub ask_size: Option<Quantity>,
    pub volume: Option<Quantity>,
    /// Set on aggregated points, or on raw points when the broker sends bars
    pub bar: Option<Bar>,

    pub account: Option<AccountId>,
    pub name: Option<InstrumentId>,
    pub chart_data: Option<ChartData>,
    pub time_frame: Option<TimeFrame>,
}

impl Point {
    pub fn new(instrument_id: impl Into<InstrumentId>, time: Timestamp) -> Self {
        Self {
            time,
            instrument_id: instrument_id.into(),
            bid: None,
            ask: None,
            last: None,
            bid_size: None,
            ask_size: None,
            volume: None,
            bar: None,
            account: None,
            name: None,
            chart_data: None,
            time_frame: None,
        }
    }

    pub fn with_quote(mut self, bid: Price, ask: Price) -> Self {
        self.bid = Some(bid);
        self.ask = Some(ask);
        self
    }

    pub fn with_quote_sizes(mut self, bid_size: Quantity, ask_size: Quantity) -> Self {
        self.bid_size = Some(bid_size);
        self.ask_size = Some(ask_size);
        self
    }

    pub fn with_last(mut self, last: Price) -> Self {
        self.last = Some(last);
        self
    }

    pub fn with_volume(mut self, volume: Quantity) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn with_bar(mut self, bar: Bar) -> Self {
        self.bar = Some(bar);
        self
    }

    /// Best available price: last trade, then mid, then either side
    pub fn price(&self) -> Option<Price> {
        if let Some(last) = self.last {
            return Some(last);
        }
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::TWO),
            (bid, ask) => bid.or(ask).or(self.bar.map(|b| b.close)),
        }
    }

    pub fn spread(&self) -> Option<Price> {
        Some(self.ask? - self.bid?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn at() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_price_prefers_last() {
        let point = Point::new("EURUSD", at())
            .with_quote(dec!(1.1000), dec!(1.1002))
            .with_last(dec!(1.1005));
        assert_eq!(point.price(), Some(dec!(1.1005)));
    }

    #[test]
    fn test_price_falls_back_to_mid() {
        let point = Point::new("EURUSD", at()).with_quote(dec!(1.1000), dec!(1.1002));
        assert_eq!(point.price(), Some(dec!(1.1001)));
        assert_eq!(point.spread(), Some(dec!(0.0002)));
    }

    #[test]
    fn test_price_single_side_or_bar() {
        let mut point = Point::new("EURUSD", at());
        assert_eq!(point.price(), None);

        point.bar = Some(Bar::flat(dec!(1.2)));
        assert_eq!(point.price(), Some(dec!(1.2)));

        point.ask = Some(dec!(1.3));
        assert_eq!(point.price(), Some(dec!(1.3)));
    }

    #[test]
    fn test_bar_merge() {
        let mut bar = Bar::flat(dec!(10));
        bar.merge(&Bar {
            open: dec!(11),
            high: dec!(12),
            low: dec!(9),
            close: dec!(11.5),
        });

        assert_eq!(bar.open, dec!(10));
        assert_eq!(bar.high, dec!(12));
        assert_eq!(bar.low, dec!(9));
        assert_eq!(bar.close, dec!(11.5));
        assert_eq!(bar.range(), dec!(3));
    }
}
