// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use karat_registry::{CoreError, StoreError};
use karat_registry_domain::{DomainError, RecordId};

use crate::{ApiError, translate_core_error, translate_domain_error};

#[test]
fn test_duplicate_code_is_400_with_code() {
    let err: ApiError = translate_domain_error(DomainError::DuplicateCode {
        code: String::from("K18"),
        division_ref: String::from("D1"),
    });

    assert_eq!(err.code(), "DUPLICATE_CODE");
    assert_eq!(err.status_class(), 400);
    assert_eq!(
        err.message(),
        "Karat with code 'K18' already exists in division 'D1'"
    );
}

#[test]
fn test_not_found_and_deleted_are_404() {
    let missing: ApiError = translate_domain_error(DomainError::RecordNotFound(RecordId::new(4)));
    let deleted: ApiError = translate_domain_error(DomainError::RecordDeleted(RecordId::new(4)));

    assert_eq!(missing.code(), "NOT_FOUND");
    assert_eq!(missing.status_class(), 404);
    assert_eq!(deleted.code(), "RECORD_DELETED");
    assert_eq!(deleted.status_class(), 404);
}

#[test]
fn test_required_fields_name_every_missing_field() {
    let err: ApiError = translate_domain_error(DomainError::RequiredFieldsMissing {
        fields: vec!["code", "minimum"],
    });

    assert_eq!(
        err,
        ApiError::InvalidInput {
            rule: String::from("REQUIRED_FIELDS_MISSING"),
            field: String::from("code,minimum"),
            message: String::from("Required fields missing: code, minimum"),
        }
    );
}

#[test]
fn test_store_errors_are_internal() {
    let err: ApiError = translate_core_error(CoreError::Store(StoreError::Unavailable(
        String::from("disk gone"),
    )));

    assert_eq!(err.code(), "INTERNAL_ERROR");
    assert_eq!(err.status_class(), 500);
}

#[test]
fn test_core_domain_violation_is_unwrapped() {
    let err: ApiError = translate_core_error(CoreError::DomainViolation(DomainError::IdsRequired));

    assert_eq!(err.code(), "IDS_REQUIRED");
    assert_eq!(err.status_class(), 400);
}
