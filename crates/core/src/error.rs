// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use karat_registry_domain::DomainError;
use thiserror::Error;

/// Failures reported by a [`RecordStore`](crate::RecordStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store's `(code, division)` unique constraint rejected a write.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),
    /// The store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    /// Any other store failure.
    #[error("Store operation failed: {0}")]
    Failed(String),
}

/// Errors that can occur during record lifecycle operations.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The store failed. Passed through unchanged.
    Store(StoreError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Store(err) => write!(f, "Store error: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}
