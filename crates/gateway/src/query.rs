//! Typed query records for the gateway's read operations
//!
//! Each query names the filters every connector understands. Anything
//! broker specific goes into `extra`, which connectors interpret (or
//! ignore) on their own.

use chrono::NaiveDate;
use hermes_core::{
    InstrumentId, OptionInstrument, OptionSide, Order, OrderStatus, Point, Position, Price,
    Symbol, TimeFrame, Timestamp,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Connector-specific query parameters
pub type Extras = BTreeMap<String, serde_json::Value>;

macro_rules! impl_extras {
    ($($query:ty),+ $(,)?) => {
        $(
            impl $query {
                /// Attach a connector-specific parameter
                pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
                    self.extra.insert(key.into(), value.into());
                    self
                }

                pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
                    self.extra.get(key)
                }
            }
        )+
    };
}

impl_extras!(PointQuery, OrderQuery, PositionQuery, OptionQuery);

fn within(time: Timestamp, start: Option<Timestamp>, end: Option<Timestamp>) -> bool {
    start.is_none_or(|start| time >= start) && end.is_none_or(|end| time < end)
}

/// Price history request
///
/// `start` is inclusive, `end` exclusive. When `time_frame` is set the
/// connector returns bars of that period instead of raw ticks. `limit`
/// keeps the most recent entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointQuery {
    pub instrument_id: Option<InstrumentId>,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
    pub limit: Option<usize>,
    pub time_frame: Option<TimeFrame>,
    pub extra: Extras,
}

impl PointQuery {
    pub fn for_instrument(instrument_id: impl Into<InstrumentId>) -> Self {
        Self {
            instrument_id: Some(instrument_id.into()),
            ..Default::default()
        }
    }

    pub fn between(mut self, start: Timestamp, end: Timestamp) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_time_frame(mut self, time_frame: TimeFrame) -> Self {
        self.time_frame = Some(time_frame);
        self
    }

    pub fn matches(&self, point: &Point) -> bool {
        self.instrument_id
            .as_ref()
            .is_none_or(|id| &point.instrument_id == id)
            && within(point.time, self.start, self.end)
    }
}

/// Order listing request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderQuery {
    pub instrument_id: Option<InstrumentId>,
    pub status: Option<OrderStatus>,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
    pub extra: Extras,
}

impl OrderQuery {
    pub fn for_instrument(instrument_id: impl Into<InstrumentId>) -> Self {
        Self {
            instrument_id: Some(instrument_id.into()),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, order: &Order) -> bool {
        self.instrument_id
            .as_ref()
            .is_none_or(|id| &order.instrument_id == id)
            && self.status.is_none_or(|status| order.status == status)
            && within(order.created_at, self.start, self.end)
    }
}

/// Position listing request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionQuery {
    pub instrument_id: Option<InstrumentId>,
    pub extra: Extras,
}

impl PositionQuery {
    pub fn for_instrument(instrument_id: impl Into<InstrumentId>) -> Self {
        Self {
            instrument_id: Some(instrument_id.into()),
            ..Default::default()
        }
    }

    pub fn matches(&self, position: &Position) -> bool {
        self.instrument_id
            .as_ref()
            .is_none_or(|id| &position.instrument_id == id)
    }
}

/// Option chain request, shared by the strike, expiration and chain lookups
///
/// Strike bounds are inclusive. `expiration` matches on the calendar date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionQuery {
    /// Underlying symbol
    pub symbol: Option<Symbol>,
    pub expiration: Option<NaiveDate>,
    pub side: Option<OptionSide>,
    pub min_strike: Option<Price>,
    pub max_strike: Option<Price>,
    pub extra: Extras,
}

impl OptionQuery {
    pub fn for_symbol(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            ..Default::default()
        }
    }

    pub fn with_expiration(mut self, expiration: NaiveDate) -> Self {
        self.expiration = Some(expiration);
        self
    }

    pub fn with_side(mut self, side: OptionSide) -> Self {
        self.side = Some(side);
        self
    }

    pub fn with_strikes(mut self, min_strike: Price, max_strike: Price) -> Self {
        self.min_strike = Some(min_strike);
        self.max_strike = Some(max_strike);
        self
    }

    pub fn matches(&self, option: &OptionInstrument) -> bool {
        let symbol = self
            .symbol
            .as_ref()
            .is_none_or(|symbol| option.symbol.as_ref() == Some(symbol));
        let expiration = self.expiration.is_none_or(|date| {
            option
                .expiration_date
                .is_some_and(|expiry| expiry.date_naive() == date)
        });
        let side = self.side.is_none_or(|side| option.side == Some(side));
        let min = self
            .min_strike
            .is_none_or(|min| option.strike.is_some_and(|strike| strike >= min));
        let max = self
            .max_strike
            .is_none_or(|max| option.strike.is_some_and(|strike| strike <= max));

        symbol && expiration && side && min && max
    }
}
