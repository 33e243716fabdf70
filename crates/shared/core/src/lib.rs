//! Hermes Core Domain
//!
//! Pure domain types shared by every broker connector.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod charts;
pub mod entities;
pub mod instruments;
pub mod series;
pub mod values;

// Re-export commonly used types at crate root
pub use charts::{Chart, ChartData, NameCollection, ShapeKind, ValueFormat};
pub use entities::{
    Account, AccountId, Action, Bar, Mode, Order, OrderId, OrderMessage, OrderStatus, OrderType,
    Point, PointMessage, Position, PositionId, PositionSide, Side, TimeInForce,
    TransactionMessage,
};
pub use instruments::{
    Greeks, Instrument, InstrumentId, OptionInstrument, OptionSide, PricingAnalytics, Variance,
};
pub use series::{BarSeries, PointSeries, TimeSeries};
pub use values::{Price, Quantity, Symbol, TimeFrame, Timestamp};
