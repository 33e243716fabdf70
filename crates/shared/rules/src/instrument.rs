use hermes_core::{Instrument, TimeSeries};
use hermes_ports::{RuleSet, ValidationFailure};

use crate::builder::{Rules, present, present_non_zero};

/// Trading-economics rules every instrument must satisfy
///
/// Tick and bar series are owned values and always exist, so only their
/// contents are checked, and only by [`InstrumentCollectionsValidation`].
pub struct InstrumentValidation {
    rules: Rules<Instrument>,
}

impl InstrumentValidation {
    pub fn new() -> Self {
        let rules = Rules::new()
            .rule("swap_long", "No long swap", |i: &Instrument| present(&i.swap_long))
            .rule("swap_short", "No short swap", |i: &Instrument| present(&i.swap_short))
            .rule("commission", "No commission", |i: &Instrument| present(&i.commission))
            .rule("contract_size", "No contract size", |i: &Instrument| {
                present_non_zero(&i.contract_size)
            })
            .rule("step_size", "No point size", |i: &Instrument| present_non_zero(&i.step_size))
            .rule("step_value", "No point value", |i: &Instrument| {
                present_non_zero(&i.step_value)
            })
            .rule("time_frame", "No time frame", |i: &Instrument| present(&i.time_frame));

        Self { rules }
    }
}

impl Default for InstrumentValidation {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSet<Instrument> for InstrumentValidation {
    fn validate(&self, entity: &Instrument) -> Vec<ValidationFailure> {
        self.rules.validate(entity)
    }
}

/// Instrument rules plus non-empty history
///
/// An instrument must have received at least one tick before orders on it
/// can be transmitted.
pub struct InstrumentCollectionsValidation {
    rules: Rules<Instrument>,
}

impl InstrumentCollectionsValidation {
    pub fn new() -> Self {
        let rules = Rules::new()
            .include(InstrumentValidation::new())
            .rule("points", "No points", |i: &Instrument| !i.points.is_empty())
            .rule("point_groups", "No point groups", |i: &Instrument| {
                !i.point_groups.is_empty()
            });

        Self { rules }
    }
}

impl Default for InstrumentCollectionsValidation {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSet<Instrument> for InstrumentCollectionsValidation {
    fn validate(&self, entity: &Instrument) -> Vec<ValidationFailure> {
        self.rules.validate(entity)
    }
}
