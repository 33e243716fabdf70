use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How long an order stays working
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeInForce {
    /// Good till canceled
    #[default]
    Gtc,
    /// Immediate or cancel, unfilled remainder is dropped
    Ioc,
    /// Fill or kill
    Fok,
    /// Canceled at the end of the trading day
    Day,
    /// Good till the given time
    Gtd(DateTime<Utc>),
}

impl TimeInForce {
    pub fn is_expired(&self, now: DateTime<Utc>, day_end: Option<DateTime<Utc>>) -> bool {
        match self {
            TimeInForce::Gtd(expiry) => now >= *expiry,
            TimeInForce::Day => day_end.is_some_and(|end| now >= end),
            _ => false,
        }
    }
}
