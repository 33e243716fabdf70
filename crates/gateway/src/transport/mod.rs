//! In-process transport
//!
//! Gateway streams are hot, synchronous multicast subjects: a message is
//! handed to every handler registered at the moment of publishing, on the
//! publishing thread, before `publish` returns. Nothing is buffered for
//! subscribers that arrive later.
//!
//! Async consumers can bridge a subject into a tokio channel with
//! [`ChannelSubscriber`].

pub mod channel;
pub mod subject;

pub use channel::ChannelSubscriber;
pub use subject::{Subject, Subscription};

use crate::error::TransportError;
use async_trait::async_trait;

/// Publisher - hands a message to the current subscribers
pub trait Publisher<M>: Send + Sync {
    /// Publish a message, returning how many subscribers received it
    fn publish(&self, msg: &M) -> usize;
}

/// Subscriber - receives messages published after it subscribed
#[async_trait]
pub trait Subscriber<M>: Send
where
    M: Send,
{
    /// Wait for the next message
    async fn next(&mut self) -> Result<M, TransportError>;

    /// Try to receive without blocking (returns None if no message available)
    fn try_next(&mut self) -> Result<Option<M>, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Ensure traits are object-safe
    fn _assert_publisher_object_safe(_: &dyn Publisher<String>) {}
    fn _assert_subscriber_object_safe(_: &mut dyn Subscriber<String>) {}
}
