// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Field names are `snake_case` on the wire. The `camelCase` spellings are
//! accepted as aliases on input.

use karat_registry::{BulkStatusOutcome, Pagination};
use karat_registry_domain::{KaratRecord, NumericInput, RecordFields};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// API request carrying a karat field set.
///
/// Create requires every field except `status`; update only applies the
/// fields that are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KaratFieldsRequest {
    pub code: Option<String>,
    #[serde(alias = "divisionRef", alias = "division")]
    pub division_ref: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "standardPurity")]
    pub standard_purity: Option<NumericInput>,
    pub minimum: Option<NumericInput>,
    pub maximum: Option<NumericInput>,
    pub status: Option<String>,
}

impl From<KaratFieldsRequest> for RecordFields {
    fn from(request: KaratFieldsRequest) -> Self {
        Self {
            code: request.code,
            division_ref: request.division_ref,
            description: request.description,
            standard_purity: request.standard_purity,
            minimum: request.minimum,
            maximum: request.maximum,
            status: request.status,
        }
    }
}

/// API request to list karats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListKaratsRequest {
    /// 1-based page number.
    pub page: Option<u64>,
    /// Rows per page.
    #[serde(alias = "limit", alias = "pageSize")]
    pub page_size: Option<u64>,
    #[serde(alias = "divisionRef", alias = "division")]
    pub division_ref: Option<String>,
    pub status: Option<String>,
    /// Case-insensitive text matched against code and description.
    pub search: Option<String>,
    #[serde(alias = "includeDeleted")]
    pub include_deleted: Option<bool>,
    /// One of `code`, `description`, `standard_purity`, `created_at`,
    /// `updated_at`.
    #[serde(alias = "sortBy")]
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    #[serde(alias = "sortOrder")]
    pub sort_order: Option<String>,
}

/// A raw record identifier as sent by a client.
///
/// Any JSON value is accepted so that validation can name every malformed
/// identifier, whatever its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdInput {
    Number(i64),
    Text(String),
    /// Anything else, such as `2.5`, `null` or `true`.
    Other(Value),
}

impl IdInput {
    /// Returns the identifier as text.
    #[must_use]
    pub fn into_raw(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
            Self::Other(value) => value.to_string(),
        }
    }
}

/// API request to permanently delete several karats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    #[serde(default)]
    pub ids: Vec<IdInput>,
}

/// API request to set the status of several karats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkStatusRequest {
    #[serde(default)]
    pub ids: Vec<IdInput>,
    #[serde(default)]
    pub status: String,
}

/// A karat as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KaratInfo {
    pub id: i64,
    pub code: String,
    pub division_ref: String,
    pub description: String,
    pub standard_purity: f64,
    pub minimum: f64,
    pub maximum: f64,
    pub status: String,
    /// Derived from `status`.
    pub active: bool,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
    pub deleted_by: Option<String>,
}

impl From<KaratRecord> for KaratInfo {
    fn from(record: KaratRecord) -> Self {
        Self {
            id: record.id.value(),
            active: record.is_active(),
            code: record.code.value().to_string(),
            division_ref: record.division_ref.value().to_string(),
            description: record.description,
            standard_purity: record.standard_purity,
            minimum: record.minimum,
            maximum: record.maximum,
            status: record.status.as_str().to_string(),
            created_by: record.created_by.value().to_string(),
            updated_by: record.updated_by.map(|a| a.value().to_string()),
            created_at: record.created_at,
            updated_at: record.updated_at,
            deleted_at: record.deleted_at,
            deleted_by: record.deleted_by.map(|a| a.value().to_string()),
        }
    }
}

/// Pagination metadata returned with list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

impl From<Pagination> for PaginationInfo {
    fn from(pagination: Pagination) -> Self {
        Self {
            page: pagination.page,
            page_size: pagination.page_size,
            total_count: pagination.total_count,
            total_pages: pagination.total_pages,
        }
    }
}

/// API response for a bulk permanent delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    pub deleted_count: u64,
}

/// API response for a bulk status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkStatusResponse {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<BulkStatusOutcome> for BulkStatusResponse {
    fn from(outcome: BulkStatusOutcome) -> Self {
        Self {
            matched_count: outcome.matched_count,
            modified_count: outcome.modified_count,
        }
    }
}

/// The envelope wrapping every successful response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
}

impl<T> ApiResponse<T> {
    /// Wraps `data` in a successful envelope.
    #[must_use]
    pub fn ok(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: Some(data),
            pagination: None,
        }
    }

    /// A successful envelope with no data.
    #[must_use]
    pub fn empty(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: None,
            pagination: None,
        }
    }

    #[must_use]
    pub const fn with_pagination(mut self, pagination: PaginationInfo) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

/// The body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    /// Machine-readable error code.
    pub code: String,
    pub message: String,
}
