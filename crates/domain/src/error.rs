// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::RecordId;

/// Errors that can occur during record validation and lifecycle checks.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// One or more mandatory create fields are absent.
    RequiredFieldsMissing {
        /// The names of every missing field, in declaration order.
        fields: Vec<&'static str>,
    },
    /// A numeric field did not parse as a finite number.
    InvalidNumericValue {
        /// The offending field.
        field: &'static str,
        /// The raw value as supplied.
        value: String,
    },
    /// Standard purity is outside `[0, 100]`.
    InvalidPurityRange {
        /// The rejected value.
        value: f64,
    },
    /// Minimum or maximum is negative.
    InvalidValueRange {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The resolved minimum is not strictly below the resolved maximum.
    InvalidMinMaxRange {
        /// The resolved minimum.
        minimum: f64,
        /// The resolved maximum.
        maximum: f64,
    },
    /// Standard purity supplied in an update is malformed or out of range.
    InvalidPurity(String),
    /// Minimum supplied in an update is malformed or out of range.
    InvalidMinimum(String),
    /// Maximum supplied in an update is malformed or out of range.
    InvalidMaximum(String),
    /// Code is empty, too long, or not alphanumeric.
    InvalidCode(String),
    /// Description is empty or too long.
    InvalidDescription(String),
    /// Division reference is malformed.
    InvalidDivision(String),
    /// Actor identity is empty.
    InvalidActor(String),
    /// Status is not one of `active` or `inactive`.
    InvalidStatus(String),
    /// The code is already used within the division.
    DuplicateCode {
        /// The normalized code.
        code: String,
        /// The division scope.
        division_ref: String,
    },
    /// No record exists with the given identifier.
    RecordNotFound(RecordId),
    /// The record exists but carries a soft-delete marker.
    RecordDeleted(RecordId),
    /// A restore was requested for a record that is not soft-deleted.
    RecordNotDeleted(RecordId),
    /// A bulk operation was given no identifiers.
    IdsRequired,
    /// One or more identifiers are not in storage-identifier format.
    InvalidIdFormat {
        /// Every malformed identifier, in input order.
        ids: Vec<String>,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequiredFieldsMissing { fields } => {
                write!(f, "Required fields missing: {}", fields.join(", "))
            }
            Self::InvalidNumericValue { field, value } => {
                write!(f, "Invalid numeric value for {field}: '{value}'")
            }
            Self::InvalidPurityRange { value } => {
                write!(
                    f,
                    "Standard purity must be between 0 and 100, got {value}"
                )
            }
            Self::InvalidValueRange { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::InvalidMinMaxRange { minimum, maximum } => {
                write!(
                    f,
                    "Minimum ({minimum}) must be less than maximum ({maximum})"
                )
            }
            Self::InvalidPurity(msg) => write!(f, "Invalid standard purity: {msg}"),
            Self::InvalidMinimum(msg) => write!(f, "Invalid minimum: {msg}"),
            Self::InvalidMaximum(msg) => write!(f, "Invalid maximum: {msg}"),
            Self::InvalidCode(msg) => write!(f, "Invalid code: {msg}"),
            Self::InvalidDescription(msg) => write!(f, "Invalid description: {msg}"),
            Self::InvalidDivision(msg) => write!(f, "Invalid division: {msg}"),
            Self::InvalidActor(msg) => write!(f, "Invalid actor: {msg}"),
            Self::InvalidStatus(status) => {
                write!(
                    f,
                    "Invalid status '{status}'. Must be 'active' or 'inactive'"
                )
            }
            Self::DuplicateCode { code, division_ref } => {
                write!(
                    f,
                    "Karat with code '{code}' already exists in division '{division_ref}'"
                )
            }
            Self::RecordNotFound(id) => write!(f, "Karat {id} not found"),
            Self::RecordDeleted(id) => write!(f, "Karat {id} has been deleted"),
            Self::RecordNotDeleted(id) => write!(f, "Karat {id} is not deleted"),
            Self::IdsRequired => write!(f, "At least one karat ID is required"),
            Self::InvalidIdFormat { ids } => {
                write!(f, "Invalid karat ID format: {}", ids.join(", "))
            }
        }
    }
}

impl std::error::Error for DomainError {}
