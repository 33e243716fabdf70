//! Simulator connector
//!
//! In-memory implementation of the gateway contract, used for paper trading
//! and tests.

mod book;
mod gateway;

pub use book::InstrumentBook;
pub use gateway::SimulatorGateway;
