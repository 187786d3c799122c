// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::status::RecordStatus;
use serde::{Deserialize, Serialize};

/// Maximum length of a karat code.
pub const MAX_CODE_LENGTH: usize = 10;

/// Maximum length of a karat description.
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// Maximum length of a division reference.
pub const MAX_DIVISION_REF_LENGTH: usize = 64;

/// Represents a stored record identifier.
///
/// Identifiers are assigned by the store at creation and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(i64);

impl RecordId {
    /// Wraps a store-assigned identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Parses the canonical text form of an identifier.
    ///
    /// Only plain decimal digits without a leading zero are accepted, and the
    /// value must be a positive `i64`. Anything else returns `None`.
    #[must_use]
    pub fn parse_canonical(raw: &str) -> Option<Self> {
        if raw.is_empty() || raw.starts_with('0') || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        raw.parse::<i64>().ok().map(Self)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a normalized karat code.
///
/// Codes are trimmed and normalized to uppercase so that uniqueness within a
/// division is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Code {
    value: String,
}

impl Code {
    /// Normalizes and validates a raw code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCode` if the normalized code is empty,
    /// longer than [`MAX_CODE_LENGTH`], or contains anything other than
    /// ASCII letters and digits.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value: String = Self::normalize(raw);

        if value.is_empty() {
            return Err(DomainError::InvalidCode(String::from(
                "Code cannot be empty",
            )));
        }

        if value.chars().count() > MAX_CODE_LENGTH {
            return Err(DomainError::InvalidCode(format!(
                "Code must be at most {MAX_CODE_LENGTH} characters"
            )));
        }

        if !value
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(DomainError::InvalidCode(String::from(
                "Code must contain only letters and digits",
            )));
        }

        Ok(Self { value })
    }

    /// Trims and uppercases a raw code without validating it.
    #[must_use]
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_uppercase()
    }

    /// Returns the code value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Represents a reference to the owning division.
///
/// Only the format is checked here. Whether the division exists is left to
/// the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DivisionRef {
    value: String,
}

impl DivisionRef {
    /// Validates a raw division reference.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDivision` if the trimmed value is empty,
    /// too long, or contains characters other than ASCII letters, digits,
    /// `-` and `_`.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value: &str = raw.trim();

        if value.is_empty() {
            return Err(DomainError::InvalidDivision(String::from(
                "Division cannot be empty",
            )));
        }

        if value.len() > MAX_DIVISION_REF_LENGTH {
            return Err(DomainError::InvalidDivision(format!(
                "Division must be at most {MAX_DIVISION_REF_LENGTH} characters"
            )));
        }

        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::InvalidDivision(format!(
                "Division '{value}' contains invalid characters"
            )));
        }

        Ok(Self {
            value: value.to_string(),
        })
    }

    /// Returns the division reference value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for DivisionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Represents the identity of the actor performing an action.
///
/// The identity is opaque; authentication happens before it reaches here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId {
    value: String,
}

impl ActorId {
    /// Validates an actor identity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidActor` if the trimmed value is empty.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value: &str = raw.trim();
        if value.is_empty() {
            return Err(DomainError::InvalidActor(String::from(
                "Actor ID cannot be empty",
            )));
        }
        Ok(Self {
            value: value.to_string(),
        })
    }

    /// Returns the actor identity value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A persisted karat record.
///
/// Every value here has already passed validation; the store only hands
/// back what it was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KaratRecord {
    /// The store-assigned identifier.
    pub id: RecordId,
    /// The normalized code.
    pub code: Code,
    /// The owning division.
    pub division_ref: DivisionRef,
    /// The trimmed description.
    pub description: String,
    /// The standard purity, within `[0, 100]`.
    pub standard_purity: f64,
    /// The lower acceptance bound.
    pub minimum: f64,
    /// The upper acceptance bound, strictly above `minimum`.
    pub maximum: f64,
    /// The business status.
    pub status: RecordStatus,
    /// Who created the record.
    pub created_by: ActorId,
    /// Who last changed the record, if anyone has.
    pub updated_by: Option<ActorId>,
    /// Creation timestamp, as written by the store.
    pub created_at: String,
    /// Last change timestamp, as written by the store.
    pub updated_at: String,
    /// Soft-delete timestamp. `None` for live records.
    pub deleted_at: Option<String>,
    /// Who soft-deleted the record.
    pub deleted_by: Option<ActorId>,
}

impl KaratRecord {
    /// Returns true if the record's status is `active`.
    ///
    /// This is the only source of the `active` flag.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Returns true if the record carries a soft-delete marker.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
