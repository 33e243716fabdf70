use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Single failed rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Field the rule was declared on
    pub field: String,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Port for declarative entity checks
///
/// A rule set never fails and never stops early: it reports every broken
/// rule so callers can log the whole picture at once.
pub trait RuleSet<T: ?Sized>: Send + Sync {
    fn validate(&self, entity: &T) -> Vec<ValidationFailure>;

    fn is_valid(&self, entity: &T) -> bool {
        self.validate(entity).is_empty()
    }
}

impl<T: ?Sized, R: RuleSet<T> + ?Sized> RuleSet<T> for Box<R> {
    fn validate(&self, entity: &T) -> Vec<ValidationFailure> {
        (**self).validate(entity)
    }
}

impl<T: ?Sized, R: RuleSet<T> + ?Sized> RuleSet<T> for Arc<R> {
    fn validate(&self, entity: &T) -> Vec<ValidationFailure> {
        (**self).validate(entity)
    }
}

/// Rule set backed by a closure, for injecting ad-hoc validators
pub struct RuleFn<F>(pub F);

impl<T: ?Sized, F> RuleSet<T> for RuleFn<F>
where
    F: Fn(&T) -> Vec<ValidationFailure> + Send + Sync,
{
    fn validate(&self, entity: &T) -> Vec<ValidationFailure> {
        (self.0)(entity)
    }
}
