use hermes_core::{Account, Instrument, Mode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for a gateway session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Session name, reported by the gateway rule set when empty
    pub name: String,
    #[serde(default)]
    pub mode: Mode,
    /// Account to run the session under
    #[serde(default)]
    pub account: Option<AccountConfig>,
    /// Instruments known to the connector at startup
    #[serde(default)]
    pub instruments: Vec<InstrumentConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountConfig {
    pub id: String,
    #[serde(default)]
    pub descriptor: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub balance: Option<Decimal>,
    #[serde(default)]
    pub leverage: Option<Decimal>,
}

impl AccountConfig {
    pub fn to_account(&self) -> Account {
        let mut account = Account::new(self.id.as_str());
        account.descriptor = self.descriptor.clone();
        account.currency = self.currency.clone();
        account.leverage = self.leverage;
        match self.balance {
            Some(balance) => account.with_balance(balance),
            None => account,
        }
    }
}

/// Instrument definition
///
/// Unset trading-economics fields keep the instrument defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    pub name: String,
    /// Bar aggregation period in seconds
    #[serde(default = "default_time_frame_secs")]
    pub time_frame_secs: u64,
    #[serde(default)]
    pub swap_long: Option<Decimal>,
    #[serde(default)]
    pub swap_short: Option<Decimal>,
    #[serde(default)]
    pub commission: Option<Decimal>,
    #[serde(default)]
    pub contract_size: Option<Decimal>,
    #[serde(default)]
    pub step_size: Option<Decimal>,
    #[serde(default)]
    pub step_value: Option<Decimal>,
    #[serde(default)]
    pub leverage: Option<Decimal>,
}

fn default_time_frame_secs() -> u64 {
    60
}

impl InstrumentConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time_frame_secs: default_time_frame_secs(),
            swap_long: None,
            swap_short: None,
            commission: None,
            contract_size: None,
            step_size: None,
            step_value: None,
            leverage: None,
        }
    }

    pub fn time_frame(&self) -> Duration {
        Duration::from_secs(self.time_frame_secs)
    }

    /// Build a default instrument and apply the configured overrides
    pub fn to_instrument(&self) -> Instrument {
        let mut instrument = Instrument::new(self.name.as_str()).with_time_frame(self.time_frame());

        if self.swap_long.is_some() {
            instrument.swap_long = self.swap_long;
        }
        if self.swap_short.is_some() {
            instrument.swap_short = self.swap_short;
        }
        if self.commission.is_some() {
            instrument.commission = self.commission;
        }
        if self.contract_size.is_some() {
            instrument.contract_size = self.contract_size;
        }
        if self.step_size.is_some() {
            instrument.step_size = self.step_size;
        }
        if self.step_value.is_some() {
            instrument.step_value = self.step_value;
        }
        if self.leverage.is_some() {
            instrument.leverage = self.leverage;
        }
        instrument
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_instrument_defaults_survive_partial_overrides() {
        let config = InstrumentConfig {
            step_size: Some(dec!(0.25)),
            ..InstrumentConfig::new("ES")
        };

        let instrument = config.to_instrument();
        assert_eq!(instrument.name(), "ES");
        assert_eq!(instrument.step_size, Some(dec!(0.25)));
        assert_eq!(instrument.step_value, Some(dec!(0.01)));
        assert_eq!(instrument.contract_size, Some(dec!(1)));
        assert_eq!(instrument.time_frame, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_account_config() {
        let account = AccountConfig {
            id: "acc-1".to_string(),
            descriptor: None,
            currency: Some("EUR".to_string()),
            balance: Some(dec!(500)),
            leverage: None,
        }
        .to_account();

        assert_eq!(account.id.as_str(), "acc-1");
        assert_eq!(account.currency.as_deref(), Some("EUR"));
        assert_eq!(account.balance, Some(dec!(500)));
        assert_eq!(account.initial_balance, Some(dec!(500)));
    }
}
