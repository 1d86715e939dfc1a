//! # Error Types
//!
//! Every failure a call can produce is a value of [`Error`]. Contract
//! violations and failures raised by function bodies share one enum so
//! that a wrapper can filter them uniformly: each variant maps to a
//! failure [`Kind`], and kinds form the same subkind hierarchy that
//! nominal predicates use.

use thiserror::Error;

use crate::builtins;
use crate::kind::Kind;

/// Failures signalled by contract wrappers and by function bodies.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// An argument failed an `accepts` predicate, or satisfied a `rejects` one.
    #[error("argument `{name}` = {value} violates contract: {expected}")]
    ArgumentType {
        name: String,
        value: String,
        expected: String,
    },

    /// The returned value satisfied none of the declared return predicates.
    #[error("return value {value} does not satisfy {expected}")]
    ReturnType { value: String, expected: String },

    /// A required keyword argument was not supplied by keyword.
    #[error("keyword argument `{name}` is required")]
    MissingArgument { name: String },

    /// A keyword (or positional) argument is not permitted by the contract.
    #[error("unexpected argument `{name}`: {reason}")]
    UnexpectedArgument { name: String, reason: String },

    /// An argument value lacks a required attribute.
    #[error("argument {value} does not implement `{capability}`")]
    Capability { capability: String, value: String },

    /// The wrapped function failed with a kind outside its declared list.
    #[error("undeclared failure (declared: {}): {source}", kind_list(.allowed))]
    UnexpectedFailure {
        allowed: Vec<Kind>,
        source: Box<Error>,
    },

    /// A failure raised by a function body.
    #[error("{kind}: {message}")]
    Raised { kind: Kind, message: String },
}

impl Error {
    /// Raise a failure of the given kind.
    pub fn raise(kind: &Kind, message: impl Into<String>) -> Self {
        Error::Raised {
            kind: kind.clone(),
            message: message.into(),
        }
    }

    /// Raise a `TypeError`.
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::raise(&builtins::type_error(), message)
    }

    /// Raise a `ValueError`.
    pub fn value_error(message: impl Into<String>) -> Self {
        Self::raise(&builtins::value_error(), message)
    }

    /// The failure kind of this error.
    pub fn kind(&self) -> Kind {
        match self {
            Error::ArgumentType { .. } => builtins::argument_type_error(),
            Error::ReturnType { .. } => builtins::return_type_error(),
            Error::MissingArgument { .. } => builtins::missing_argument_error(),
            Error::UnexpectedArgument { .. } => builtins::unexpected_argument_error(),
            Error::Capability { .. } => builtins::capability_error(),
            Error::UnexpectedFailure { .. } => builtins::unexpected_failure_error(),
            Error::Raised { kind, .. } => kind.clone(),
        }
    }

    /// Whether this error's kind is `kind` or one of its subkinds.
    pub fn is_instance_of(&self, kind: &Kind) -> bool {
        self.kind().is_subkind_of(kind)
    }

    /// Whether this error is a contract violation rather than a raised failure.
    pub fn is_violation(&self) -> bool {
        !matches!(self, Error::Raised { .. })
    }
}

fn kind_list(kinds: &[Kind]) -> String {
    kinds
        .iter()
        .map(|k| k.name().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
