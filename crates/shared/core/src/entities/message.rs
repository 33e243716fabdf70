use serde::{Deserialize, Serialize};

/// What happened to the payload of a transaction message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Update,
    Delete,
}

/// Envelope published on gateway streams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionMessage<T> {
    pub action: Action,
    /// Current value, `None` when there is nothing to report yet
    pub next: Option<T>,
    /// Value before an update, when the publisher knows it
    pub previous: Option<T>,
}

impl<T> TransactionMessage<T> {
    pub fn new(action: Action, next: Option<T>) -> Self {
        Self {
            action,
            next,
            previous: None,
        }
    }

    pub fn create(next: T) -> Self {
        Self::new(Action::Create, Some(next))
    }

    pub fn update(previous: Option<T>, next: T) -> Self {
        Self {
            action: Action::Update,
            next: Some(next),
            previous,
        }
    }

    pub fn delete(next: T) -> Self {
        Self::new(Action::Delete, Some(next))
    }
}
