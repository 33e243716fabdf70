use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::time::Duration;

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// Quantity value - uses Decimal for precision
pub type Quantity = Decimal;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Aggregation period for quotes (1 minute bars, 1 hour bars, ...)
pub type TimeFrame = Duration;

/// Symbol of an underlying asset
pub type Symbol = String;
