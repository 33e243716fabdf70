use chrono::DateTime;
use serde::{Deserialize, Serialize};

use super::TimeSeries;
use crate::entities::{Bar, Point};
use crate::values::{TimeFrame, Timestamp};

/// Start of the time-frame bucket containing `time`
///
/// Returns `None` when there is no usable time frame (missing or shorter
/// than a millisecond), in which case every tick is its own bar.
pub fn bucket_start(time: Timestamp, time_frame: Option<TimeFrame>) -> Option<Timestamp> {
    let frame_ms = i64::try_from(time_frame?.as_millis()).ok()?;
    if frame_ms == 0 {
        return None;
    }
    let ms = time.timestamp_millis();
    DateTime::from_timestamp_millis(ms - ms.rem_euclid(frame_ms))
}

/// Ticks aggregated into time-frame bars
///
/// Each element is a `Point` stamped with the bucket start time and carrying
/// the OHLC of every tick that fell into the bucket. A tick older than the
/// current bucket only widens the last bar's range and adds to its volume;
/// close, last and quotes stay with the newest tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    bars: Vec<Point>,
    time_frame: Option<TimeFrame>,
}

impl BarSeries {
    pub fn new(time_frame: Option<TimeFrame>) -> Self {
        Self {
            bars: Vec::new(),
            time_frame,
        }
    }

    pub fn time_frame(&self) -> Option<TimeFrame> {
        self.time_frame
    }

    /// Change the bucket size for bars opened from now on
    pub fn set_time_frame(&mut self, time_frame: Option<TimeFrame>) {
        self.time_frame = time_frame;
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.bars.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.bars.iter()
    }

    fn open_bar(mut point: Point, bucket: Option<Timestamp>) -> Point {
        if let Some(start) = bucket {
            point.time = start;
        }
        point.bar = point.bar.or_else(|| point.price().map(Bar::flat));
        point
    }

    fn add_volume(group: &mut Point, point: &Point) {
        group.volume = match (group.volume, point.volume) {
            (Some(total), Some(volume)) => Some(total + volume),
            (total, volume) => total.or(volume),
        };
    }

    fn fold_late(group: &mut Point, point: Point) {
        if let Some(incoming) = point.bar.or_else(|| point.price().map(Bar::flat)) {
            match group.bar.as_mut() {
                Some(bar) => bar.widen(&incoming),
                None => group.bar = Some(incoming),
            }
        }
        Self::add_volume(group, &point);
    }

    fn merge(group: &mut Point, point: Point) {
        if let Some(incoming) = point.bar.or_else(|| point.price().map(Bar::flat)) {
            match group.bar.as_mut() {
                Some(bar) => bar.merge(&incoming),
                None => group.bar = Some(incoming),
            }
        }

        group.bid = point.bid.or(group.bid);
        group.ask = point.ask.or(group.ask);
        group.last = point.last.or(group.last);
        group.bid_size = point.bid_size.or(group.bid_size);
        group.ask_size = point.ask_size.or(group.ask_size);
        Self::add_volume(group, &point);

        group.account = point.account;
        group.name = point.name;
        group.chart_data = point.chart_data;
        group.time_frame = point.time_frame;
    }
}

impl TimeSeries for BarSeries {
    fn append(&mut self, point: Point) {
        let bucket = bucket_start(point.time, self.time_frame);

        if let (Some(start), Some(last)) = (bucket, self.bars.last_mut()) {
            if start == last.time {
                Self::merge(last, point);
                return;
            }
            if start < last.time {
                Self::fold_late(last, point);
                return;
            }
        }

        self.bars.push(Self::open_bar(point, bucket));
    }

    fn last(&self) -> Option<&Point> {
        self.bars.last()
    }

    fn len(&self) -> usize {
        self.bars.len()
    }

    fn as_slice(&self) -> &[Point] {
        &self.bars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use std::time::Duration;

    const MINUTE: Duration = Duration::from_secs(60);

    fn at(h: u32, m: u32, s: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, h, m, s).unwrap()
    }

    fn tick(time: Timestamp, price: rust_decimal::Decimal) -> Point {
        Point::new("EURUSD", time).with_last(price).with_volume(dec!(1))
    }

    #[test]
    fn test_bucket_start_alignment() {
        assert_eq!(bucket_start(at(10, 0, 59), Some(MINUTE)), Some(at(10, 0, 0)));
        assert_eq!(
            bucket_start(at(10, 7, 3), Some(Duration::from_secs(300))),
            Some(at(10, 5, 0))
        );
        assert_eq!(bucket_start(at(10, 0, 59), None), None);
        assert_eq!(bucket_start(at(10, 0, 59), Some(Duration::ZERO)), None);
    }

    #[test]
    fn test_ticks_in_same_minute_form_one_bar() {
        let mut bars = BarSeries::new(Some(MINUTE));

        bars.append(tick(at(10, 0, 5), dec!(100)));
        bars.append(tick(at(10, 0, 20), dec!(105)));
        bars.append(tick(at(10, 0, 40), dec!(98)));
        bars.append(tick(at(10, 0, 55), dec!(101)));

        assert_eq!(bars.len(), 1);
        let bar = bars.last().unwrap();
        assert_eq!(bar.time, at(10, 0, 0));
        assert_eq!(
            bar.bar,
            Some(Bar {
                open: dec!(100),
                high: dec!(105),
                low: dec!(98),
                close: dec!(101),
            })
        );
        assert_eq!(bar.volume, Some(dec!(4)));
    }

    #[test]
    fn test_new_minute_opens_new_bar() {
        let mut bars = BarSeries::new(Some(MINUTE));

        bars.append(tick(at(10, 0, 5), dec!(100)));
        bars.append(tick(at(10, 1, 2), dec!(102)));

        assert_eq!(bars.len(), 2);
        assert_eq!(bars.get(0).map(|p| p.time), Some(at(10, 0, 0)));
        assert_eq!(bars.get(1).map(|p| p.time), Some(at(10, 1, 0)));
        assert_eq!(bars.last().and_then(|p| p.bar), Some(Bar::flat(dec!(102))));
    }

    #[test]
    fn test_late_tick_folds_into_last_bar() {
        let mut bars = BarSeries::new(Some(MINUTE));

        bars.append(tick(at(10, 1, 2), dec!(102)));
        bars.append(tick(at(10, 0, 50), dec!(90)));

        assert_eq!(bars.len(), 1);
        let bar = bars.last().unwrap();
        assert_eq!(bar.time, at(10, 1, 0));
        assert_eq!(
            bar.bar,
            Some(Bar {
                open: dec!(102),
                high: dec!(102),
                low: dec!(90),
                close: dec!(102),
            })
        );
        assert_eq!(bar.last, Some(dec!(102)));
        assert_eq!(bar.volume, Some(dec!(2)));
    }

    #[test]
    fn test_late_quote_keeps_current_quotes() {
        let mut bars = BarSeries::new(Some(MINUTE));

        bars.append(Point::new("EURUSD", at(10, 1, 2)).with_quote(dec!(1.1000), dec!(1.1002)));
        bars.append(Point::new("EURUSD", at(10, 0, 50)).with_quote(dec!(1.0950), dec!(1.0952)));

        let bar = bars.last().unwrap();
        assert_eq!(bar.bid, Some(dec!(1.1000)));
        assert_eq!(bar.ask, Some(dec!(1.1002)));
        assert_eq!(bar.bar.map(|b| b.close), Some(dec!(1.1001)));
        assert_eq!(bar.bar.map(|b| b.low), Some(dec!(1.0951)));
    }

    #[test]
    fn test_without_time_frame_every_tick_is_a_bar() {
        let mut bars = BarSeries::new(None);

        bars.append(tick(at(10, 0, 5), dec!(100)));
        bars.append(tick(at(10, 0, 6), dec!(101)));

        assert_eq!(bars.len(), 2);
        assert_eq!(bars.get(0).map(|p| p.time), Some(at(10, 0, 5)));
    }

    #[test]
    fn test_tick_without_price_still_opens_bar() {
        let mut bars = BarSeries::new(Some(MINUTE));
        bars.append(Point::new("EURUSD", at(10, 0, 5)));

        assert_eq!(bars.len(), 1);
        assert_eq!(bars.last().and_then(|p| p.bar), None);
    }
}
