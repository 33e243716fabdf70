use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Instrument, PricingAnalytics};
use crate::values::{Price, Symbol, Timestamp};

/// Option side: Call (right to buy) or Put (right to sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionSide {
    Call,
    Put,
}

impl std::fmt::Display for OptionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionSide::Call => write!(f, "C"),
            OptionSide::Put => write!(f, "P"),
        }
    }
}

/// Option contract as returned by option-chain queries
///
/// Wraps a regular instrument (history, trading economics) and adds the
/// contract terms. Side, strike and expiration are optional until the
/// connector has filled them; the option rule set requires all three.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionInstrument {
    pub instrument: Instrument,
    pub strike: Option<Price>,
    /// Underlying symbol
    pub symbol: Option<Symbol>,
    pub side: Option<OptionSide>,
    pub expiration_date: Option<Timestamp>,
    pub open_interest: Option<Decimal>,
    pub analytics: Option<PricingAnalytics>,
}

impl OptionInstrument {
    pub fn new(instrument: Instrument) -> Self {
        Self {
            instrument,
            strike: None,
            symbol: None,
            side: None,
            expiration_date: None,
            open_interest: None,
            analytics: None,
        }
    }

    /// Create a fully specified contract
    pub fn contract(
        instrument: Instrument,
        underlying: impl Into<Symbol>,
        side: OptionSide,
        strike: Price,
        expiration_date: Timestamp,
    ) -> Self {
        Self {
            strike: Some(strike),
            symbol: Some(underlying.into()),
            side: Some(side),
            expiration_date: Some(expiration_date),
            ..Self::new(instrument)
        }
    }

    pub fn with_analytics(mut self, analytics: impl Into<PricingAnalytics>) -> Self {
        self.analytics = Some(analytics.into());
        self
    }

    pub fn with_open_interest(mut self, open_interest: Decimal) -> Self {
        self.open_interest = Some(open_interest);
        self
    }

    pub fn name(&self) -> &str {
        self.instrument.name()
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expiration_date.is_some_and(|expiry| now >= expiry)
    }

    /// Intrinsic value against a spot price, `None` until side and strike are known
    pub fn intrinsic_value(&self, spot_price: Price) -> Option<Decimal> {
        let strike = self.strike?;
        let value = match self.side? {
            OptionSide::Call => spot_price - strike,
            OptionSide::Put => strike - spot_price,
        };
        Some(value.max(Decimal::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::Greeks;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn make_expiry() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 12, 20, 21, 0, 0).unwrap()
    }

    fn call() -> OptionInstrument {
        OptionInstrument::contract(
            Instrument::new("SPY241220C00500000"),
            "SPY",
            OptionSide::Call,
            dec!(500),
            make_expiry(),
        )
    }

    #[test]
    fn test_contract_terms() {
        let option = call().with_analytics(Greeks::default());

        assert_eq!(option.name(), "SPY241220C00500000");
        assert_eq!(option.symbol.as_deref(), Some("SPY"));
        assert_eq!(option.side, Some(OptionSide::Call));
        assert!(matches!(option.analytics, Some(PricingAnalytics::Greeks(_))));
    }

    #[test]
    fn test_intrinsic_value() {
        let call = call();
        assert_eq!(call.intrinsic_value(dec!(510)), Some(dec!(10)));
        assert_eq!(call.intrinsic_value(dec!(490)), Some(dec!(0)));

        let mut put = call.clone();
        put.side = Some(OptionSide::Put);
        assert_eq!(put.intrinsic_value(dec!(490)), Some(dec!(10)));

        put.side = None;
        assert_eq!(put.intrinsic_value(dec!(490)), None);
    }

    #[test]
    fn test_expiry() {
        let option = call();
        let before = Utc.with_ymd_and_hms(2024, 12, 19, 0, 0, 0).unwrap();

        assert!(!option.is_expired(before));
        assert!(option.is_expired(make_expiry()));
        assert!(!OptionInstrument::new(Instrument::new("X")).is_expired(before));
    }
}
