use serde::{Deserialize, Serialize};

/// Order types a connector can transmit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Execute at current market price
    #[default]
    Market,
    /// Execute at specified price or better
    Limit,
    /// Market order triggered at the activation price
    Stop,
    /// Limit order triggered at the activation price
    StopLimit,
}

impl OrderType {
    /// Whether the order needs a limit price
    pub fn requires_price(&self) -> bool {
        matches!(self, OrderType::Limit | OrderType::StopLimit)
    }

    /// Whether the order needs an activation (trigger) price
    pub fn requires_activation_price(&self) -> bool {
        matches!(self, OrderType::Stop | OrderType::StopLimit)
    }
}
