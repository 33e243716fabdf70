//! Instrument definitions
//!
//! - `Instrument`: any tradeable symbol with its tick and bar history
//! - `OptionInstrument`: an instrument plus contract terms and analytics

mod analytics;
mod instrument;
mod option;

pub use analytics::{Greeks, PricingAnalytics, Variance};
pub use instrument::{Instrument, InstrumentId};
pub use option::{OptionInstrument, OptionSide};
