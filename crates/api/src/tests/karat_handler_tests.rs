// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use karat_registry_domain::NumericInput;
use karat_registry_persistence::Persistence;

use super::helpers::{
    MAX_PAGE_SIZE, create_test_actor, create_test_persistence, create_test_request, seed,
};
use crate::{
    ApiError, ApiResponse, KaratFieldsRequest, KaratInfo, ListKaratsRequest, create_karat,
    get_karat, hard_delete_karat, list_karats, list_karats_by_division, restore_karat,
    soft_delete_karat, toggle_karat_status, update_karat,
};

#[test]
fn test_create_karat_scenario() {
    let mut persistence: Persistence = create_test_persistence();

    let created: ApiResponse<KaratInfo> = create_karat(
        &mut persistence,
        create_test_request("k18", "D1"),
        &create_test_actor(),
    )
    .unwrap();
    assert!(created.success);
    let info: KaratInfo = created.data.unwrap();
    assert_eq!(info.code, "K18");
    assert_eq!(info.status, "active");
    assert!(info.active);
    assert_eq!(info.created_by, "admin-123");

    let duplicate: ApiError = create_karat(
        &mut persistence,
        create_test_request("k18", "D1"),
        &create_test_actor(),
    )
    .unwrap_err();
    assert_eq!(duplicate.code(), "DUPLICATE_CODE");

    let other_division: ApiResponse<KaratInfo> = create_karat(
        &mut persistence,
        create_test_request("k18", "D2"),
        &create_test_actor(),
    )
    .unwrap();
    assert_eq!(other_division.data.unwrap().division_ref, "D2");
}

#[test]
fn test_create_karat_accepts_textual_numbers() {
    let mut persistence: Persistence = create_test_persistence();
    let request: KaratFieldsRequest = KaratFieldsRequest {
        standard_purity: Some(NumericInput::from(" 91.6 ")),
        minimum: Some(NumericInput::from("91")),
        maximum: Some(NumericInput::from("92")),
        ..create_test_request("K22", "D1")
    };

    let info: KaratInfo = create_karat(&mut persistence, request, &create_test_actor())
        .unwrap()
        .data
        .unwrap();

    assert!((info.standard_purity - 91.6).abs() < f64::EPSILON);
}

#[test]
fn test_create_karat_reports_missing_fields() {
    let mut persistence: Persistence = create_test_persistence();

    let err: ApiError = create_karat(
        &mut persistence,
        KaratFieldsRequest::default(),
        &create_test_actor(),
    )
    .unwrap_err();

    assert_eq!(err.code(), "REQUIRED_FIELDS_MISSING");
    assert_eq!(err.status_class(), 400);
}

#[test]
fn test_get_karat_with_malformed_id() {
    let mut persistence: Persistence = create_test_persistence();

    let err: ApiError = get_karat(&mut persistence, "abc").unwrap_err();

    assert_eq!(err.code(), "INVALID_ID_FORMAT");
    assert_eq!(err.status_class(), 400);
}

#[test]
fn test_get_missing_karat_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    let err: ApiError = get_karat(&mut persistence, "12345").unwrap_err();

    assert_eq!(err.code(), "NOT_FOUND");
    assert_eq!(err.status_class(), 404);
}

#[test]
fn test_update_minimum_only_checks_resolved_pair() {
    let mut persistence: Persistence = create_test_persistence();
    let info: KaratInfo = seed(&mut persistence, "K18", "D1");
    let request: KaratFieldsRequest = KaratFieldsRequest {
        minimum: Some(NumericInput::Number(80.0)),
        ..KaratFieldsRequest::default()
    };

    let err: ApiError = update_karat(
        &mut persistence,
        &info.id.to_string(),
        request,
        &create_test_actor(),
    )
    .unwrap_err();

    assert_eq!(err.code(), "INVALID_MIN_MAX_RANGE");
}

#[test]
fn test_update_karat_applies_changes() {
    let mut persistence: Persistence = create_test_persistence();
    let info: KaratInfo = seed(&mut persistence, "K18", "D1");
    let request: KaratFieldsRequest = KaratFieldsRequest {
        description: Some(String::from("Eighteen")),
        ..KaratFieldsRequest::default()
    };

    let updated: KaratInfo = update_karat(
        &mut persistence,
        &info.id.to_string(),
        request,
        &create_test_actor(),
    )
    .unwrap()
    .data
    .unwrap();

    assert_eq!(updated.description, "Eighteen");
    assert_eq!(updated.updated_by.as_deref(), Some("admin-123"));
}

#[test]
fn test_toggle_karat_status_messages() {
    let mut persistence: Persistence = create_test_persistence();
    let info: KaratInfo = seed(&mut persistence, "K18", "D1");
    let id: String = info.id.to_string();

    let off: ApiResponse<KaratInfo> =
        toggle_karat_status(&mut persistence, &id, &create_test_actor()).unwrap();
    assert_eq!(off.message, "Karat deactivated successfully");
    assert!(!off.data.unwrap().active);

    let on: ApiResponse<KaratInfo> =
        toggle_karat_status(&mut persistence, &id, &create_test_actor()).unwrap();
    assert_eq!(on.message, "Karat activated successfully");
    assert!(on.data.unwrap().active);
}

#[test]
fn test_soft_delete_restore_and_hard_delete() {
    let mut persistence: Persistence = create_test_persistence();
    let info: KaratInfo = seed(&mut persistence, "K18", "D1");
    let id: String = info.id.to_string();

    let deleted: KaratInfo = soft_delete_karat(&mut persistence, &id, &create_test_actor())
        .unwrap()
        .data
        .unwrap();
    assert!(deleted.deleted_at.is_some());
    assert!(
        list_karats_by_division(&mut persistence, "D1")
            .unwrap()
            .data
            .unwrap()
            .is_empty()
    );

    let again: ApiError =
        soft_delete_karat(&mut persistence, &id, &create_test_actor()).unwrap_err();
    assert_eq!(again.code(), "RECORD_DELETED");

    let restored: KaratInfo = restore_karat(&mut persistence, &id, &create_test_actor())
        .unwrap()
        .data
        .unwrap();
    assert!(restored.deleted_at.is_none());

    let removed: ApiResponse<()> = hard_delete_karat(&mut persistence, &id).unwrap();
    assert!(removed.success);
    assert!(removed.data.is_none());
    assert_eq!(
        get_karat(&mut persistence, &id).unwrap_err().code(),
        "NOT_FOUND"
    );
}

#[test]
fn test_list_karats_paginates() {
    let mut persistence: Persistence = create_test_persistence();
    for code in ["K10", "K14", "K18", "K22", "K24"] {
        seed(&mut persistence, code, "D1");
    }

    let request: ListKaratsRequest = ListKaratsRequest {
        page: Some(2),
        page_size: Some(2),
        sort_order: Some(String::from("desc")),
        ..ListKaratsRequest::default()
    };
    let response: ApiResponse<Vec<KaratInfo>> =
        list_karats(&mut persistence, request, MAX_PAGE_SIZE).unwrap();

    let codes: Vec<String> = response.data.unwrap().into_iter().map(|k| k.code).collect();
    assert_eq!(codes, vec![String::from("K18"), String::from("K14")]);
    let pagination = response.pagination.unwrap();
    assert_eq!(pagination.total_count, 5);
    assert_eq!(pagination.total_pages, 3);
    assert_eq!(pagination.page, 2);
}

#[test]
fn test_list_karats_rejects_unknown_sort_field() {
    let mut persistence: Persistence = create_test_persistence();
    let request: ListKaratsRequest = ListKaratsRequest {
        sort_by: Some(String::from("weight")),
        ..ListKaratsRequest::default()
    };

    let err: ApiError = list_karats(&mut persistence, request, MAX_PAGE_SIZE).unwrap_err();

    assert_eq!(err.code(), "INVALID_QUERY_PARAMETER");
}

#[test]
fn test_list_karats_rejects_unknown_status() {
    let mut persistence: Persistence = create_test_persistence();
    let request: ListKaratsRequest = ListKaratsRequest {
        status: Some(String::from("archived")),
        ..ListKaratsRequest::default()
    };

    let err: ApiError = list_karats(&mut persistence, request, MAX_PAGE_SIZE).unwrap_err();

    assert_eq!(err.code(), "INVALID_STATUS");
}
