//! Gateway contract implemented by every broker connector

use async_trait::async_trait;
use hermes_core::{Account, Instrument, OptionInstrument, Order, Point, Position, Price, Timestamp};

use crate::error::GatewayResult;
use crate::query::{OptionQuery, OrderQuery, PointQuery, PositionQuery};
use crate::session::GatewaySession;

/// Broker connector
///
/// Every operation may suspend on broker I/O. Transport and protocol
/// failures come back as `Err`; nothing here retries, rate limits or
/// serialises calls. Connectors that need mutual exclusion on their
/// transport provide it themselves.
///
/// Order commands must run the session's gate
/// ([`GatewaySession::ensure_order_props`]) and transmit nothing when it
/// fails.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Shared session state: account, mode, streams and rule sets
    fn session(&self) -> &GatewaySession;

    /// Account details for the given account
    async fn get_account(&self, account: Account) -> GatewayResult<Account>;

    /// Instrument with its price history
    async fn get_instrument(&self, instrument: Instrument) -> GatewayResult<Instrument>;

    async fn get_points(&self, query: PointQuery) -> GatewayResult<Vec<Point>>;

    async fn get_orders(&self, query: OrderQuery) -> GatewayResult<Vec<Order>>;

    async fn get_positions(&self, query: PositionQuery) -> GatewayResult<Vec<Position>>;

    async fn get_option_strikes(&self, query: OptionQuery) -> GatewayResult<Vec<Price>>;

    async fn get_option_expirations(&self, query: OptionQuery) -> GatewayResult<Vec<Timestamp>>;

    async fn get_option_chains(&self, query: OptionQuery) -> GatewayResult<Vec<OptionInstrument>>;

    async fn create_orders(&self, orders: Vec<Order>) -> GatewayResult<Vec<Order>>;

    async fn update_orders(&self, orders: Vec<Order>) -> GatewayResult<Vec<Order>>;

    async fn delete_orders(&self, orders: Vec<Order>) -> GatewayResult<Vec<Order>>;
}
