use ecow::EcoString;
use thiserror::Error;

/// A condition that aborts the current top-level evaluation
///
/// Everything that can be represented as data is reported in-band as a
/// [`Fault`](crate::Fault) instead. A `Fatal` is only produced when no value
/// can stand for the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fatal {
    #[error("unable to allocate an array of {elements} elements")]
    Alloc { elements: usize },
    #[error("internal invariant violated: {0}")]
    Invariant(EcoString),
    #[error("{0}")]
    Host(EcoString),
}

pub type CoreResult<T = ()> = Result<T, Fatal>;

impl Fatal {
    pub fn invariant(msg: impl Into<EcoString>) -> Self {
        Fatal::Invariant(msg.into())
    }
    /// Whether this is an allocation failure
    pub fn is_alloc(&self) -> bool {
        matches!(self, Fatal::Alloc { .. })
    }
}
