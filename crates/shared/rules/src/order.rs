use hermes_core::Order;
use hermes_ports::{RuleSet, ValidationFailure};

use crate::builder::{Rules, present, present_positive};

/// Default price and size rules for orders
///
/// Connectors with broker-specific requirements inject their own
/// `RuleSet<Order>` instead; this one covers what every broker needs.
pub struct OrderPriceValidation {
    rules: Rules<Order>,
}

impl OrderPriceValidation {
    pub fn new() -> Self {
        let rules = Rules::new()
            .rule("instrument_id", "No instrument name", |o: &Order| {
                !o.instrument_id.as_str().is_empty()
            })
            .rule("side", "No side", |o: &Order| present(&o.side))
            .rule("size", "No size", |o: &Order| present_positive(&o.size))
            .rule("price", "No price", |o: &Order| {
                !o.order_type.requires_price() || present_positive(&o.price)
            })
            .rule("activation_price", "No activation price", |o: &Order| {
                !o.order_type.requires_activation_price() || present_positive(&o.activation_price)
            });

        Self { rules }
    }
}

impl Default for OrderPriceValidation {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSet<Order> for OrderPriceValidation {
    fn validate(&self, entity: &Order) -> Vec<ValidationFailure> {
        self.rules.validate(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_core::{OrderType, Side};
    use rust_decimal_macros::dec;

    fn messages(order: &Order) -> Vec<String> {
        OrderPriceValidation::new()
            .validate(order)
            .into_iter()
            .map(|f| f.message)
            .collect()
    }

    #[test]
    fn test_valid_orders() {
        assert!(messages(&Order::market("EURUSD", Side::Buy, dec!(1))).is_empty());
        assert!(messages(&Order::limit("EURUSD", Side::Buy, dec!(1), dec!(1.1))).is_empty());
        assert!(messages(&Order::stop("EURUSD", Side::Sell, dec!(1), dec!(1.0))).is_empty());
    }

    #[test]
    fn test_limit_without_price() {
        let order = Order::new("EURUSD", Side::Buy, OrderType::Limit, dec!(1));
        assert_eq!(messages(&order), vec!["No price"]);
    }

    #[test]
    fn test_stop_limit_needs_both_prices() {
        let order = Order::new("EURUSD", Side::Buy, OrderType::StopLimit, dec!(1));
        assert_eq!(messages(&order), vec!["No price", "No activation price"]);
    }

    #[test]
    fn test_missing_side_and_zero_size() {
        let mut order = Order::market("", Side::Buy, dec!(0));
        order.side = None;
        assert_eq!(
            messages(&order),
            vec!["No instrument name", "No side", "No size"]
        );
    }
}
