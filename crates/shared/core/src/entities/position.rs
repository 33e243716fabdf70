use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Side;
use crate::instruments::InstrumentId;
use crate::values::{Price, Quantity, Timestamp};

/// Unique identifier for a position
pub type PositionId = Uuid;

/// Position side - long (bought) or short (sold)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionSide {
    /// Long position - bought the asset, profit when price rises
    Long,
    /// Short position - sold borrowed asset, profit when price falls
    Short,
}

impl PositionSide {
    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            PositionSide::Long => PositionSide::Short,
            PositionSide::Short => PositionSide::Long,
        }
    }
}

impl From<Side> for PositionSide {
    fn from(side: Side) -> Self {
        match side {
            Side::Buy => PositionSide::Long,
            Side::Sell => PositionSide::Short,
        }
    }
}

/// Open or closed position as reported by a broker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub instrument_id: InstrumentId,
    pub side: PositionSide,
    /// Position size (always positive)
    pub size: Quantity,
    /// Average entry price
    pub open_price: Price,
    pub close_price: Option<Price>,
    /// Realized profit/loss once closed
    pub gain_loss: Option<Decimal>,
    pub opened_at: Timestamp,
    pub closed_at: Option<Timestamp>,
}

impl Position {
    pub fn new(
        instrument_id: impl Into<InstrumentId>,
        side: PositionSide,
        size: Quantity,
        open_price: Price,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            instrument_id: instrument_id.into(),
            side,
            size,
            open_price,
            close_price: None,
            gain_loss: None,
            opened_at: Utc::now(),
            closed_at: None,
        }
    }

    /// Unrealized P&L against a mark price
    pub fn unrealized_pnl(&self, mark_price: Price) -> Decimal {
        let price_diff = mark_price - self.open_price;
        match self.side {
            PositionSide::Long => self.size * price_diff,
            PositionSide::Short => self.size * -price_diff,
        }
    }

    /// Close the position at the given price, returning the realized P&L
    pub fn close(&mut self, price: Price, at: Timestamp) -> Decimal {
        let pnl = self.unrealized_pnl(price);
        self.close_price = Some(price);
        self.gain_loss = Some(pnl);
        self.closed_at = Some(at);
        pnl
    }

    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }
}
