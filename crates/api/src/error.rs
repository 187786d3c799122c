// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use karat_registry::{CoreError, StoreError};
use karat_registry_domain::DomainError;

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
/// Every variant carries a machine-readable code, see [`ApiError::code`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The machine-readable rule code.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The machine-readable rule code.
        rule: String,
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The machine-readable rule code.
        rule: String,
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the machine-readable error code, e.g. `DUPLICATE_CODE`.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::AuthenticationFailed { .. } => "AUTHENTICATION_FAILED",
            Self::DomainRuleViolation { rule, .. }
            | Self::InvalidInput { rule, .. }
            | Self::ResourceNotFound { rule, .. } => rule.as_str(),
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status class for this error.
    #[must_use]
    pub const fn status_class(&self) -> u16 {
        match self {
            Self::AuthenticationFailed { .. } => 401,
            Self::DomainRuleViolation { .. } | Self::InvalidInput { .. } => 400,
            Self::ResourceNotFound { .. } => 404,
            Self::Internal { .. } => 500,
        }
    }

    /// Returns the human-readable message without the variant prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::AuthenticationFailed { reason } => format!("Authentication failed: {reason}"),
            Self::DomainRuleViolation { message, .. }
            | Self::InvalidInput { message, .. }
            | Self::ResourceNotFound { message, .. }
            | Self::Internal { message } => message.clone(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput {
                field, message, ..
            } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
                ..
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
        }
    }
}

fn invalid_input(rule: &str, field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        rule: rule.to_string(),
        field: field.to_string(),
        message,
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::RequiredFieldsMissing { fields } => {
            invalid_input("REQUIRED_FIELDS_MISSING", &fields.join(","), message)
        }
        DomainError::InvalidNumericValue { field, .. } => {
            invalid_input("INVALID_NUMERIC_VALUE", field, message)
        }
        DomainError::InvalidPurityRange { .. } => {
            invalid_input("INVALID_PURITY_RANGE", "standard_purity", message)
        }
        DomainError::InvalidValueRange { field, .. } => {
            invalid_input("INVALID_VALUE_RANGE", field, message)
        }
        DomainError::InvalidMinMaxRange { .. } => ApiError::DomainRuleViolation {
            rule: String::from("INVALID_MIN_MAX_RANGE"),
            message,
        },
        DomainError::InvalidPurity(_) => invalid_input("INVALID_PURITY", "standard_purity", message),
        DomainError::InvalidMinimum(_) => invalid_input("INVALID_MINIMUM", "minimum", message),
        DomainError::InvalidMaximum(_) => invalid_input("INVALID_MAXIMUM", "maximum", message),
        DomainError::InvalidCode(_) => invalid_input("INVALID_CODE", "code", message),
        DomainError::InvalidDescription(_) => {
            invalid_input("INVALID_DESCRIPTION", "description", message)
        }
        DomainError::InvalidDivision(_) => invalid_input("INVALID_DIVISION", "division_ref", message),
        DomainError::InvalidActor(_) => invalid_input("INVALID_ACTOR", "actor", message),
        DomainError::InvalidStatus(_) => invalid_input("INVALID_STATUS", "status", message),
        DomainError::DuplicateCode { .. } => ApiError::DomainRuleViolation {
            rule: String::from("DUPLICATE_CODE"),
            message,
        },
        DomainError::RecordNotFound(_) => ApiError::ResourceNotFound {
            rule: String::from("NOT_FOUND"),
            resource_type: String::from("Karat"),
            message,
        },
        DomainError::RecordDeleted(_) => ApiError::ResourceNotFound {
            rule: String::from("RECORD_DELETED"),
            resource_type: String::from("Karat"),
            message,
        },
        DomainError::RecordNotDeleted(_) => ApiError::DomainRuleViolation {
            rule: String::from("RECORD_NOT_DELETED"),
            message,
        },
        DomainError::IdsRequired => invalid_input("IDS_REQUIRED", "ids", message),
        DomainError::InvalidIdFormat { .. } => invalid_input("INVALID_ID_FORMAT", "ids", message),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Store(StoreError::Unavailable(msg)) => ApiError::Internal {
            message: format!("Store unavailable: {msg}"),
        },
        CoreError::Store(store_err) => ApiError::Internal {
            message: store_err.to_string(),
        },
    }
}
