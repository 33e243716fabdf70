//! Broker connectors
//!
//! Each adapter implements [`Gateway`](crate::Gateway) for one broker and
//! runs the shared ingestion pipeline and order gate on its data.

pub mod simulator;

pub use simulator::{InstrumentBook, SimulatorGateway};
