//! Tokio channel bridge for async consumers
//!
//! Subjects deliver synchronously on the publisher's thread. A
//! `ChannelSubscriber` forwards each message into an unbounded mpsc channel
//! so a task can `await` it instead.

use crate::error::TransportError;
use crate::transport::{Subject, Subscriber, Subscription};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Async receiving end attached to a [`Subject`]
pub struct ChannelSubscriber<M> {
    rx: mpsc::UnboundedReceiver<M>,
    // Keeps the forwarding handler registered
    _subscription: Subscription,
}

impl<M: Clone + Send + 'static> ChannelSubscriber<M> {
    /// Subscribe to `subject`; only messages published from now on are received
    pub fn new(subject: &Subject<M>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = subject.subscribe(move |msg: &M| {
            // Receiver gone means the subscriber is being dropped
            let _ = tx.send(msg.clone());
        });

        Self {
            rx,
            _subscription: subscription,
        }
    }
}

#[async_trait]
impl<M> Subscriber<M> for ChannelSubscriber<M>
where
    M: Send + 'static,
{
    async fn next(&mut self) -> Result<M, TransportError> {
        self.rx.recv().await.ok_or(TransportError::ChannelClosed)
    }

    fn try_next(&mut self) -> Result<Option<M>, TransportError> {
        match self.rx.try_recv() {
            Ok(msg) => Ok(Some(msg)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(TransportError::ChannelClosed),
        }
    }
}
