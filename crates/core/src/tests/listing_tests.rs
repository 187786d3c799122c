// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use karat_registry_domain::{DivisionRef, KaratRecord, RecordStatus};

use super::helpers::{MemoryStore, create_test_actor, seed};
use crate::{
    PageRequest, Pagination, RecordFilter, RecordPage, SortDirection, SortField, SortOrder,
    list_by_division, list_records, set_status, soft_delete,
};

fn codes(records: &[KaratRecord]) -> Vec<&str> {
    records.iter().map(|r| r.code.value()).collect()
}

#[test]
fn test_page_request_defaults_and_clamps() {
    let default: PageRequest = PageRequest::new(None, None, 100);
    assert_eq!(default.page(), 1);
    assert_eq!(default.page_size(), 10);
    assert_eq!(default.offset(), 0);

    let clamped: PageRequest = PageRequest::new(Some(0), Some(500), 100);
    assert_eq!(clamped.page(), 1);
    assert_eq!(clamped.page_size(), 100);

    let third: PageRequest = PageRequest::new(Some(3), Some(0), 100);
    assert_eq!(third.page_size(), 1);
    assert_eq!(third.offset(), 2);
}

#[test]
fn test_pagination_rounds_total_pages_up() {
    let pagination: Pagination = Pagination::new(PageRequest::new(Some(1), Some(10), 100), 21);
    assert_eq!(pagination.total_pages, 3);

    let empty: Pagination = Pagination::new(PageRequest::default(), 0);
    assert_eq!(empty.total_pages, 0);
}

#[test]
fn test_list_records_pages_and_counts() {
    let mut store: MemoryStore = MemoryStore::new();
    for code in ["K24", "K10", "K18", "K22", "K14"] {
        seed(&mut store, code, "D1");
    }

    let page: RecordPage = list_records(
        &mut store,
        RecordFilter::default(),
        SortOrder::default(),
        PageRequest::new(Some(2), Some(2), 100),
    )
    .unwrap();

    assert_eq!(codes(&page.records), vec!["K18", "K22"]);
    assert_eq!(page.pagination.total_count, 5);
    assert_eq!(page.pagination.total_pages, 3);
}

#[test]
fn test_list_records_filters_and_sorts_descending() {
    let mut store: MemoryStore = MemoryStore::new();
    seed(&mut store, "K18", "D1");
    let inactive: KaratRecord = seed(&mut store, "K22", "D1");
    seed(&mut store, "K24", "D1");
    seed(&mut store, "K18", "D2");
    set_status(
        &mut store,
        inactive.id,
        RecordStatus::Inactive,
        &create_test_actor(),
    )
    .unwrap();

    let filter: RecordFilter = RecordFilter {
        division_ref: Some(DivisionRef::parse("D1").unwrap()),
        status: Some(RecordStatus::Active),
        ..RecordFilter::default()
    };
    let sort: SortOrder = SortOrder {
        field: SortField::Code,
        direction: SortDirection::Descending,
    };
    let page: RecordPage =
        list_records(&mut store, filter, sort, PageRequest::default()).unwrap();

    assert_eq!(codes(&page.records), vec!["K24", "K18"]);
}

#[test]
fn test_list_records_search_matches_description() {
    let mut store: MemoryStore = MemoryStore::new();
    seed(&mut store, "K18", "D1");
    seed(&mut store, "K22", "D1");

    let filter: RecordFilter = RecordFilter {
        search: Some(String::from("k22 STANDARD")),
        ..RecordFilter::default()
    };
    let page: RecordPage = list_records(
        &mut store,
        filter,
        SortOrder::default(),
        PageRequest::default(),
    )
    .unwrap();

    assert_eq!(codes(&page.records), vec!["K22"]);
}

#[test]
fn test_list_records_excludes_soft_deleted_unless_asked() {
    let mut store: MemoryStore = MemoryStore::new();
    let record: KaratRecord = seed(&mut store, "K18", "D1");
    seed(&mut store, "K22", "D1");
    soft_delete(&mut store, record.id, &create_test_actor()).unwrap();

    let live: RecordPage = list_records(
        &mut store,
        RecordFilter::default(),
        SortOrder::default(),
        PageRequest::default(),
    )
    .unwrap();
    assert_eq!(codes(&live.records), vec!["K22"]);

    let all: RecordPage = list_records(
        &mut store,
        RecordFilter {
            include_deleted: true,
            ..RecordFilter::default()
        },
        SortOrder::default(),
        PageRequest::default(),
    )
    .unwrap();
    assert_eq!(all.pagination.total_count, 2);
}

#[test]
fn test_list_by_division_returns_active_sorted_by_code() {
    let mut store: MemoryStore = MemoryStore::new();
    seed(&mut store, "K24", "D1");
    seed(&mut store, "K18", "D1");
    let inactive: KaratRecord = seed(&mut store, "K22", "D1");
    seed(&mut store, "K14", "D2");
    set_status(
        &mut store,
        inactive.id,
        RecordStatus::Inactive,
        &create_test_actor(),
    )
    .unwrap();

    let listed: Vec<KaratRecord> =
        list_by_division(&mut store, &DivisionRef::parse("D1").unwrap()).unwrap();

    assert_eq!(codes(&listed), vec!["K18", "K24"]);
}
