use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created locally, not yet sent to the broker
    #[default]
    Pending,
    /// Accepted by the broker and working
    Placed,
    /// Order has been partially filled
    PartiallyFilled,
    /// Order has been completely filled
    Filled,
    /// Order has been canceled by the user
    Canceled,
    /// Order was rejected by the broker
    Rejected,
    /// Order has expired (GTD/DAY)
    Expired,
}

impl OrderStatus {
    /// Returns true if the order is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Filled
                | OrderStatus::Canceled
                | OrderStatus::Rejected
                | OrderStatus::Expired
        )
    }

    /// Returns true if the order is still working at the broker
    pub fn is_active(&self) -> bool {
        matches!(self, OrderStatus::Placed | OrderStatus::PartiallyFilled)
    }
}
