mod account;
mod message;
mod mode;
mod order;
mod order_status;
mod order_type;
mod point;
mod position;
mod side;
mod time_in_force;

pub use account::{Account, AccountId};
pub use message::{Action, TransactionMessage};
pub use mode::Mode;
pub use order::{Order, OrderId};
pub use order_status::OrderStatus;
pub use order_type::OrderType;
pub use point::{Bar, Point};
pub use position::{Position, PositionId, PositionSide};
pub use side::Side;
pub use time_in_force::TimeInForce;

/// Message carrying the latest aggregated bar of an instrument
pub type PointMessage = TransactionMessage<Point>;

/// Message carrying an order transmission intent
pub type OrderMessage = TransactionMessage<Order>;

