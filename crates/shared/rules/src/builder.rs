use hermes_ports::{RuleSet, ValidationFailure};
use rust_decimal::Decimal;

type Check<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

struct Rule<T: ?Sized> {
    field: &'static str,
    message: &'static str,
    check: Check<T>,
}

/// Declarative rule list
///
/// Rules are declared per field with the message reported when the check
/// does not hold. Included rule sets run first, then the local rules, in
/// declaration order.
pub struct Rules<T: ?Sized> {
    included: Vec<Box<dyn RuleSet<T>>>,
    rules: Vec<Rule<T>>,
}

impl<T: ?Sized + 'static> Rules<T> {
    pub fn new() -> Self {
        Self {
            included: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Declare a rule: `check` must hold, otherwise `message` is reported for `field`
    pub fn rule<F>(mut self, field: &'static str, message: &'static str, check: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            field,
            message,
            check: Box::new(check),
        });
        self
    }

    /// Run another rule set as part of this one
    pub fn include(mut self, rules: impl RuleSet<T> + 'static) -> Self {
        self.included.push(Box::new(rules));
        self
    }

    /// Declared rules plus included sets, each set counting once
    pub fn len(&self) -> usize {
        self.rules.len() + self.included.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.included.is_empty()
    }
}

impl<T: ?Sized + 'static> Default for Rules<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> RuleSet<T> for Rules<T> {
    fn validate(&self, entity: &T) -> Vec<ValidationFailure> {
        let mut failures: Vec<_> = self
            .included
            .iter()
            .flat_map(|rules| rules.validate(entity))
            .collect();

        failures.extend(
            self.rules
                .iter()
                .filter(|rule| !(rule.check)(entity))
                .map(|rule| ValidationFailure::new(rule.field, rule.message)),
        );

        failures
    }
}

/// Value is present
pub fn present<V>(value: &Option<V>) -> bool {
    value.is_some()
}

/// Value is present and not zero
pub fn present_non_zero(value: &Option<Decimal>) -> bool {
    value.is_some_and(|v| !v.is_zero())
}

/// Value is present and strictly positive
pub fn present_positive(value: &Option<Decimal>) -> bool {
    value.is_some_and(|v| v > Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    struct Quote {
        bid: Option<Decimal>,
        ask: Option<Decimal>,
    }

    fn quote_rules() -> Rules<Quote> {
        Rules::new()
            .rule("bid", "No bid", |q: &Quote| present(&q.bid))
            .rule("ask", "No ask", |q: &Quote| present_non_zero(&q.ask))
    }

    #[test]
    fn test_all_failures_reported() {
        let failures = quote_rules().validate(&Quote {
            bid: None,
            ask: Some(dec!(0)),
        });

        assert_eq!(
            failures,
            vec![
                ValidationFailure::new("bid", "No bid"),
                ValidationFailure::new("ask", "No ask"),
            ]
        );
    }

    #[test]
    fn test_included_rules_run_first() {
        let rules = Rules::new()
            .include(quote_rules())
            .rule("spread", "Crossed quote", |q: &Quote| match (q.bid, q.ask) {
                (Some(bid), Some(ask)) => bid <= ask,
                _ => true,
            });

        let failures = rules.validate(&Quote {
            bid: None,
            ask: None,
        });
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].field, "bid");

        let crossed = rules.validate(&Quote {
            bid: Some(dec!(2)),
            ask: Some(dec!(1)),
        });
        assert_eq!(crossed, vec![ValidationFailure::new("spread", "Crossed quote")]);
    }

    #[test]
    fn test_len_counts_included_sets() {
        let empty: Rules<Quote> = Rules::new();
        assert_eq!(empty.len(), 0);
        assert!(empty.is_empty());

        let only_included = Rules::new().include(quote_rules());
        assert_eq!(only_included.len(), 1);
        assert!(!only_included.is_empty());

        let mixed = only_included.rule("spread", "Crossed quote", |_: &Quote| true);
        assert_eq!(mixed.len(), 2);
    }

    #[test]
    fn test_helpers() {
        assert!(present(&Some(1)));
        assert!(!present::<i32>(&None));
        assert!(!present_non_zero(&Some(dec!(0))));
        assert!(present_non_zero(&Some(dec!(-1))));
        assert!(!present_positive(&Some(dec!(-1))));
        assert!(present_positive(&Some(dec!(0.5))));
    }
}
