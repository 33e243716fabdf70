//! Hermes Gateway
//!
//! Broker-agnostic gateway layer. Provides:
//! - The [`Gateway`] contract every broker connector implements
//! - The point-ingestion pipeline and the pre-transmission order gate
//! - Hot in-process streams for tick/bar updates and outgoing orders
//! - Configuration loading and an in-memory simulator connector
//!
//! ## Architecture
//!
//! ```text
//! Broker (REST/WS, Simulator)
//!         │ raw ticks, order acks
//!    ┌────▼──────┐
//!    │ Connector │  impl Gateway
//!    └────┬──────┘
//!         │ update_point_props / ensure_order_props
//!    ┌────▼──────┐
//!    │  Session  │  account, mode, rule sets
//!    └────┬──────┘
//!         │ Streams:
//!         │ data_stream (bars), order_sender_stream (orders)
//!    ┌────▼──────┐
//!    │Subscribers│  charts, strategies, risk
//!    └───────────┘
//! ```
//!
//! ## Transport
//!
//! Streams are synchronous [`Subject`]s: publishing runs every current
//! handler before returning and nothing is replayed to late subscribers.
//! [`ChannelSubscriber`] bridges a stream into a tokio channel for async
//! consumers.

pub mod adapters;
pub mod config;
pub mod contract;
pub mod error;
pub mod pipeline;
pub mod query;
pub mod session;
pub mod transport;

// Re-export commonly used types
pub use adapters::{InstrumentBook, SimulatorGateway};
pub use config::{ConfigError, GatewayConfig, InstrumentConfig};
pub use contract::Gateway;
pub use error::{GatewayError, GatewayResult, TransportError};
pub use query::{Extras, OptionQuery, OrderQuery, PointQuery, PositionQuery};
pub use session::{GatewaySession, GatewayValidation};
pub use transport::{ChannelSubscriber, Publisher, Subject, Subscriber, Subscription};
