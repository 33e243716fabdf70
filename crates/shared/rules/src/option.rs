use hermes_core::OptionInstrument;
use hermes_ports::{RuleSet, ValidationFailure};

use crate::builder::{Rules, present, present_non_zero};

/// Contract terms required before an option can be traded
pub struct OptionValidation {
    rules: Rules<OptionInstrument>,
}

impl OptionValidation {
    pub fn new() -> Self {
        let rules = Rules::new()
            .rule("side", "No side", |o: &OptionInstrument| present(&o.side))
            .rule("strike", "No strike", |o: &OptionInstrument| present_non_zero(&o.strike))
            .rule("expiration_date", "No expiration date", |o: &OptionInstrument| {
                present(&o.expiration_date)
            });

        Self { rules }
    }
}

impl Default for OptionValidation {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSet<OptionInstrument> for OptionValidation {
    fn validate(&self, entity: &OptionInstrument) -> Vec<ValidationFailure> {
        self.rules.validate(entity)
    }
}
