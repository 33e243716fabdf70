//! Hermes Ports
//!
//! Port definitions (traits) for the Hermes gateway.
//! These define the boundaries between the gateway pipeline and the
//! collaborators it consumes: rule sets and instrument ownership.

mod lookup;
mod validation;

pub use lookup::InstrumentLookup;
pub use validation::{RuleFn, RuleSet, ValidationFailure};
