// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and an in-memory record store.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use karat_registry_domain::{
    ActorId, Code, DivisionRef, KaratRecord, NewRecord, NumericInput, RecordChanges,
    RecordFields, RecordId, RecordStatus,
};

use crate::{
    BulkStatusOutcome, QueryResult, RecordQuery, RecordStore, SortDirection, SortField,
    StoreError, create_record,
};

pub fn create_test_actor() -> ActorId {
    ActorId::parse("admin-1").unwrap()
}

pub fn create_other_actor() -> ActorId {
    ActorId::parse("admin-2").unwrap()
}

pub fn create_test_fields(code: &str, division: &str) -> RecordFields {
    RecordFields {
        code: Some(code.to_string()),
        division_ref: Some(division.to_string()),
        description: Some(format!("{code} standard")),
        standard_purity: Some(NumericInput::Number(75.0)),
        minimum: Some(NumericInput::Number(74.5)),
        maximum: Some(NumericInput::Number(75.5)),
        status: None,
    }
}

/// Creates a record through the lifecycle and returns it.
pub fn seed(store: &mut MemoryStore, code: &str, division: &str) -> KaratRecord {
    create_record(store, &create_test_fields(code, division), &create_test_actor()).unwrap()
}

/// In-memory `RecordStore` with the same unique constraint as the database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<RecordId, KaratRecord>,
    next_id: i64,
    clock: u64,
    /// When set, `code_in_use` always answers `false`, so duplicates are
    /// only caught by the write-time constraint.
    pub skip_code_lookup: bool,
    /// When set, every call fails with this error.
    pub fail_with: Option<StoreError>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    fn tick(&mut self) -> String {
        self.clock += 1;
        format!("2026-01-01 00:00:{:02}", self.clock)
    }

    fn check(&self) -> Result<(), StoreError> {
        self.fail_with.clone().map_or(Ok(()), Err)
    }

    fn taken(&self, code: &Code, division: &DivisionRef, exclude: Option<RecordId>) -> bool {
        self.records.values().any(|r| {
            &r.code == code && &r.division_ref == division && Some(r.id) != exclude
        })
    }
}

fn compare(a: &KaratRecord, b: &KaratRecord, field: SortField) -> Ordering {
    match field {
        SortField::Code => a.code.value().cmp(b.code.value()),
        SortField::Description => a.description.cmp(&b.description),
        SortField::StandardPurity => a
            .standard_purity
            .partial_cmp(&b.standard_purity)
            .unwrap_or(Ordering::Equal),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

impl RecordStore for MemoryStore {
    fn insert_record(
        &mut self,
        record: &NewRecord,
        actor: &ActorId,
    ) -> Result<KaratRecord, StoreError> {
        self.check()?;
        if self.taken(&record.code, &record.division_ref, None) {
            return Err(StoreError::UniqueViolation(String::from(
                "karats.code, karats.division_ref",
            )));
        }

        self.next_id += 1;
        let now: String = self.tick();
        let stored: KaratRecord = KaratRecord {
            id: RecordId::new(self.next_id),
            code: record.code.clone(),
            division_ref: record.division_ref.clone(),
            description: record.description.clone(),
            standard_purity: record.standard_purity,
            minimum: record.minimum,
            maximum: record.maximum,
            status: record.status,
            created_by: actor.clone(),
            updated_by: None,
            created_at: now.clone(),
            updated_at: now,
            deleted_at: None,
            deleted_by: None,
        };
        self.records.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn find_record(&mut self, id: RecordId) -> Result<Option<KaratRecord>, StoreError> {
        self.check()?;
        Ok(self.records.get(&id).cloned())
    }

    fn code_in_use(
        &mut self,
        code: &Code,
        division: &DivisionRef,
        exclude: Option<RecordId>,
    ) -> Result<bool, StoreError> {
        self.check()?;
        Ok(!self.skip_code_lookup && self.taken(code, division, exclude))
    }

    fn query_records(&mut self, query: &RecordQuery) -> Result<QueryResult, StoreError> {
        self.check()?;
        let filter = &query.filter;
        let search: Option<String> = filter.search.as_ref().map(|s| s.to_lowercase());

        let mut matching: Vec<KaratRecord> = self
            .records
            .values()
            .filter(|r| filter.include_deleted || !r.is_deleted())
            .filter(|r| filter.division_ref.as_ref().is_none_or(|d| &r.division_ref == d))
            .filter(|r| filter.status.is_none_or(|s| r.status == s))
            .filter(|r| {
                search.as_ref().is_none_or(|s| {
                    r.code.value().to_lowercase().contains(s)
                        || r.description.to_lowercase().contains(s)
                })
            })
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            let ordering: Ordering = compare(a, b, query.sort.field).then(a.id.cmp(&b.id));
            match query.sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });

        let total_count: u64 = matching.len() as u64;
        let records: Vec<KaratRecord> = matching
            .into_iter()
            .skip(usize::try_from(query.offset).unwrap())
            .take(query.limit.map_or(usize::MAX, |l| usize::try_from(l).unwrap()))
            .collect();

        Ok(QueryResult {
            records,
            total_count,
        })
    }

    fn update_record(
        &mut self,
        id: RecordId,
        changes: &RecordChanges,
        actor: &ActorId,
    ) -> Result<Option<KaratRecord>, StoreError> {
        self.check()?;
        let Some(current) = self.records.get(&id).cloned() else {
            return Ok(None);
        };

        let (code, division) = changes.resolved_scope(&current);
        if self.taken(code, division, Some(id)) {
            return Err(StoreError::UniqueViolation(String::from(
                "karats.code, karats.division_ref",
            )));
        }

        let now: String = self.tick();
        let record: &mut KaratRecord = self.records.get_mut(&id).unwrap();
        if let Some(code) = &changes.code {
            record.code = code.clone();
        }
        if let Some(division) = &changes.division_ref {
            record.division_ref = division.clone();
        }
        if let Some(description) = &changes.description {
            record.description = description.clone();
        }
        if let Some(purity) = changes.standard_purity {
            record.standard_purity = purity;
        }
        if let Some(minimum) = changes.minimum {
            record.minimum = minimum;
        }
        if let Some(maximum) = changes.maximum {
            record.maximum = maximum;
        }
        if let Some(status) = changes.status {
            record.status = status;
        }
        record.updated_by = Some(actor.clone());
        record.updated_at = now;

        Ok(Some(record.clone()))
    }

    fn set_deleted(
        &mut self,
        id: RecordId,
        deleted: bool,
        actor: &ActorId,
    ) -> Result<Option<KaratRecord>, StoreError> {
        self.check()?;
        let now: String = self.tick();
        let Some(record) = self.records.get_mut(&id) else {
            return Ok(None);
        };

        if deleted {
            record.deleted_at = Some(now.clone());
            record.deleted_by = Some(actor.clone());
        } else {
            record.deleted_at = None;
            record.deleted_by = None;
        }
        record.updated_by = Some(actor.clone());
        record.updated_at = now;

        Ok(Some(record.clone()))
    }

    fn delete_records(&mut self, ids: &[RecordId]) -> Result<u64, StoreError> {
        self.check()?;
        Ok(ids
            .iter()
            .filter(|id| self.records.remove(*id).is_some())
            .count() as u64)
    }

    fn set_status_many(
        &mut self,
        ids: &[RecordId],
        status: RecordStatus,
        actor: &ActorId,
    ) -> Result<BulkStatusOutcome, StoreError> {
        self.check()?;
        let now: String = self.tick();
        let mut outcome: BulkStatusOutcome = BulkStatusOutcome::default();

        for id in ids {
            let Some(record) = self.records.get_mut(id) else {
                continue;
            };
            outcome.matched_count += 1;
            if record.status != status {
                record.status = status;
                record.updated_by = Some(actor.clone());
                record.updated_at = now.clone();
                outcome.modified_count += 1;
            }
        }

        Ok(outcome)
    }
}
