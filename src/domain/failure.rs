use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Any error that can sit underneath a [`Failure`] as its cause.
pub type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// Why an operation did not succeed, from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// The caller can fix it by changing the input.
    InvalidInput,
    /// The system is at fault; the caller cannot do anything about it.
    InternalFault,
}

impl FailureKind {
    /// Stable machine-readable name, used in responses and records.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::InvalidInput => "InvalidInput",
            FailureKind::InternalFault => "InternalFault",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure condition raised by the computation or the boundary.
///
/// A `Failure` is assembled with the builder methods at the point of detection
/// and is read-only afterwards. Wrapping never drops information: [`Failure::wrap`]
/// keeps the wrapped failure reachable through [`std::error::Error::source`].
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Failure {
    kind: FailureKind,
    message: String,
    context: BTreeMap<String, String>,
    #[source]
    cause: Option<Cause>,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: BTreeMap::new(),
            cause: None,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(FailureKind::InvalidInput, message)
    }

    pub fn internal_fault(message: impl Into<String>) -> Self {
        Self::new(FailureKind::InternalFault, message)
    }

    /// Attaches a key/value pair describing the input that triggered the failure.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Records the lower-level error that caused this failure.
    pub fn caused_by(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Raises a new failure of the same kind with `self` kept as its cause.
    pub fn wrap(self, message: impl Into<String>) -> Self {
        let kind = self.kind;
        Self::new(kind, message).caused_by(self)
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> &BTreeMap<String, String> {
        &self.context
    }

    /// Iterates over every cause below this failure, outermost first.
    pub fn causes(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        std::iter::successors(self.source(), |&err| err.source())
    }

    /// Messages of the causal chain, outermost first. Empty when nothing was wrapped.
    pub fn chain(&self) -> Vec<String> {
        self.causes().map(|err| err.to_string()).collect()
    }
}
