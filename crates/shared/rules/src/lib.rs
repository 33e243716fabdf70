//! Hermes Rules
//!
//! Rule sets checked before instruments and orders reach a broker.
//! Each rule set reports every broken rule as a `ValidationFailure`;
//! none of them stop at the first failure.

pub mod builder;
mod instrument;
mod option;
mod order;

pub use builder::Rules;
pub use instrument::{InstrumentCollectionsValidation, InstrumentValidation};
pub use option::OptionValidation;
pub use order::OrderPriceValidation;
