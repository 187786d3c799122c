// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Karat Registry.
//!
//! This crate sits between the transport and the lifecycle engine. It owns
//! the request/response contract, resolves the acting identity, and turns
//! domain and core errors into [`ApiError`] values carrying a
//! machine-readable code and an HTTP status class.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{ACTOR_HEADER, authenticate_actor};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    bulk_delete_karats, bulk_update_karat_status, create_karat, get_karat, hard_delete_karat,
    list_karats, list_karats_by_division, parse_karat_id, restore_karat, soft_delete_karat,
    toggle_karat_status, update_karat,
};
pub use request_response::{
    ApiResponse, BulkDeleteRequest, BulkDeleteResponse, BulkStatusRequest, BulkStatusResponse,
    ErrorResponse, IdInput, KaratFieldsRequest, KaratInfo, ListKaratsRequest, PaginationInfo,
};
