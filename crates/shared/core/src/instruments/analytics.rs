use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Option sensitivities as reported by brokers that publish greeks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeks {
    pub delta: Option<Decimal>,
    pub gamma: Option<Decimal>,
    pub theta: Option<Decimal>,
    pub vega: Option<Decimal>,
    /// Interest rate used by the pricing model
    pub interest: Option<Decimal>,
    /// Probability density at the strike
    pub distribution: Option<Decimal>,
    /// Final implied volatility
    pub iv: Option<Decimal>,
    pub bid_iv: Option<Decimal>,
    pub ask_iv: Option<Decimal>,
}

/// Volatility measurements for brokers that only publish variance data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variance {
    pub variance: Option<Decimal>,
    pub volatility: Option<Decimal>,
    pub iv: Option<Decimal>,
    pub bid_iv: Option<Decimal>,
    pub ask_iv: Option<Decimal>,
}

/// Derived pricing metrics attached to an option
///
/// Brokers report one of two shapes; both are kept so either source can
/// populate the field without losing data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingAnalytics {
    Greeks(Greeks),
    Variance(Variance),
}

impl PricingAnalytics {
    pub fn iv(&self) -> Option<Decimal> {
        match self {
            PricingAnalytics::Greeks(g) => g.iv,
            PricingAnalytics::Variance(v) => v.iv,
        }
    }

    pub fn bid_iv(&self) -> Option<Decimal> {
        match self {
            PricingAnalytics::Greeks(g) => g.bid_iv,
            PricingAnalytics::Variance(v) => v.bid_iv,
        }
    }

    pub fn ask_iv(&self) -> Option<Decimal> {
        match self {
            PricingAnalytics::Greeks(g) => g.ask_iv,
            PricingAnalytics::Variance(v) => v.ask_iv,
        }
    }

    pub fn greeks(&self) -> Option<&Greeks> {
        match self {
            PricingAnalytics::Greeks(g) => Some(g),
            PricingAnalytics::Variance(_) => None,
        }
    }

    pub fn variance(&self) -> Option<&Variance> {
        match self {
            PricingAnalytics::Variance(v) => Some(v),
            PricingAnalytics::Greeks(_) => None,
        }
    }
}

impl From<Greeks> for PricingAnalytics {
    fn from(greeks: Greeks) -> Self {
        PricingAnalytics::Greeks(greeks)
    }
}

impl From<Variance> for PricingAnalytics {
    fn from(variance: Variance) -> Self {
        PricingAnalytics::Variance(variance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_iv_accessors_cover_both_shapes() {
        let greeks: PricingAnalytics = Greeks {
            iv: Some(dec!(0.21)),
            delta: Some(dec!(0.5)),
            ..Default::default()
        }
        .into();
        let variance: PricingAnalytics = Variance {
            iv: Some(dec!(0.19)),
            bid_iv: Some(dec!(0.18)),
            ..Default::default()
        }
        .into();

        assert_eq!(greeks.iv(), Some(dec!(0.21)));
        assert_eq!(variance.iv(), Some(dec!(0.19)));
        assert_eq!(variance.bid_iv(), Some(dec!(0.18)));
        assert!(greeks.greeks().is_some());
        assert!(greeks.variance().is_none());
    }

    #[test]
    fn test_tagged_json() {
        let analytics = PricingAnalytics::Variance(Variance::default());
        let json = serde_json::to_value(&analytics).unwrap();
        assert_eq!(json["kind"], "variance");

        let back: PricingAnalytics = serde_json::from_value(json).unwrap();
        assert_eq!(back, analytics);
    }
}
