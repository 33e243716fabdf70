use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{OrderStatus, OrderType, Side, TimeInForce};
use crate::instruments::InstrumentId;
use crate::values::{Price, Quantity, Timestamp};

/// Unique identifier for an order
pub type OrderId = Uuid;

/// Order to be transmitted through a gateway
///
/// Trading fields are optional because orders are assembled step by step by
/// strategies; the validation gate decides whether an order is complete
/// enough to send. `orders` holds attached legs (brackets, OCO), each of
/// which is validated together with its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// The instrument being traded
    pub instrument_id: InstrumentId,
    pub side: Option<Side>,
    pub order_type: OrderType,
    pub size: Option<Quantity>,
    /// Required for Limit and StopLimit orders
    pub price: Option<Price>,
    /// Required for Stop and StopLimit orders
    pub activation_price: Option<Price>,
    pub time_in_force: TimeInForce,
    pub status: OrderStatus,
    pub descriptor: Option<String>,
    pub created_at: Timestamp,
    /// Attached child orders
    pub orders: Vec<Order>,
}

impl Order {
    /// Create an order with explicit timestamp
    pub fn new_with_time(
        instrument_id: impl Into<InstrumentId>,
        side: Side,
        order_type: OrderType,
        size: Quantity,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            instrument_id: instrument_id.into(),
            side: Some(side),
            order_type,
            size: Some(size),
            price: None,
            activation_price: None,
            time_in_force: TimeInForce::default(),
            status: OrderStatus::Pending,
            descriptor: None,
            created_at: timestamp,
            orders: Vec::new(),
        }
    }

    /// Create an order using current system time
    pub fn new(
        instrument_id: impl Into<InstrumentId>,
        side: Side,
        order_type: OrderType,
        size: Quantity,
    ) -> Self {
        Self::new_with_time(instrument_id, side, order_type, size, Utc::now())
    }

    pub fn market(instrument_id: impl Into<InstrumentId>, side: Side, size: Quantity) -> Self {
        Self::new(instrument_id, side, OrderType::Market, size)
    }

    pub fn limit(
        instrument_id: impl Into<InstrumentId>,
        side: Side,
        size: Quantity,
        price: Price,
    ) -> Self {
        Self::new(instrument_id, side, OrderType::Limit, size).with_price(price)
    }

    pub fn stop(
        instrument_id: impl Into<InstrumentId>,
        side: Side,
        size: Quantity,
        activation_price: Price,
    ) -> Self {
        Self::new(instrument_id, side, OrderType::Stop, size).with_activation_price(activation_price)
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_activation_price(mut self, price: Price) -> Self {
        self.activation_price = Some(price);
        self
    }

    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    pub fn with_descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.descriptor = Some(descriptor.into());
        self
    }

    /// Attach a child leg
    pub fn with_child(mut self, child: Order) -> Self {
        self.orders.push(child);
        self
    }

    /// Symbol of the traded instrument
    pub fn symbol(&self) -> &str {
        self.instrument_id.as_str()
    }

    /// Every order in this tree, parent first, depth first
    pub fn flatten(&self) -> Vec<&Order> {
        let mut all = vec![self];
        for child in &self.orders {
            all.extend(child.flatten());
        }
        all
    }
}
