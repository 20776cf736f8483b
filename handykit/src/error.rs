//! Typed errors returned by the map helpers.

use thiserror::Error;

/// Failure modes of the fallible map operations.
///
/// Every other map helper is total and reports absence through `Option` or a
/// default value instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    /// A required argument was not supplied (e.g. a missing replace function).
    #[error("missing required argument `{name}`")]
    InvalidArgument { name: &'static str },

    /// An insert-only operation found the key already present.
    #[error("an entry with the same key already exists")]
    DuplicateKey,

    /// A removal required the key to be present but it was not.
    #[error("the given key was not present in the map")]
    KeyNotFound,
}
