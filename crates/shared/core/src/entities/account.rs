use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Broker-side account identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Account a gateway session runs under
///
/// The gateway does not interpret these values; connectors fill them from
/// the broker and strategies read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    /// Human readable label
    pub descriptor: Option<String>,
    /// Base currency of the balance
    pub currency: Option<String>,
    pub balance: Option<Decimal>,
    pub initial_balance: Option<Decimal>,
    pub leverage: Option<Decimal>,
}

impl Account {
    pub fn new(id: impl Into<AccountId>) -> Self {
        Self {
            id: id.into(),
            descriptor: None,
            currency: None,
            balance: None,
            initial_balance: None,
            leverage: None,
        }
    }

    pub fn with_descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.descriptor = Some(descriptor.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Set the balance; the first balance also becomes the initial balance
    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance = Some(balance);
        self.initial_balance.get_or_insert(balance);
        self
    }

    pub fn with_leverage(mut self, leverage: Decimal) -> Self {
        self.leverage = Some(leverage);
        self
    }

    /// Balance change since the account was opened
    pub fn performance(&self) -> Option<Decimal> {
        Some(self.balance? - self.initial_balance?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_initial_balance_is_kept() {
        let account = Account::new("demo")
            .with_balance(dec!(1000))
            .with_balance(dec!(1250));

        assert_eq!(account.initial_balance, Some(dec!(1000)));
        assert_eq!(account.balance, Some(dec!(1250)));
        assert_eq!(account.performance(), Some(dec!(250)));
    }

    #[test]
    fn test_performance_without_balance() {
        let account = Account::new("demo");
        assert_eq!(account.performance(), None);
    }
}
