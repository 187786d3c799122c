// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Karat record queries.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use karat_registry::{QueryResult, RecordFilter, RecordQuery, SortDirection, SortField, SortOrder};
use karat_registry_domain::{Code, DivisionRef, KaratRecord, RecordId};
use tracing::debug;

use crate::data_models::KaratRow;
use crate::diesel_schema::karats;
use crate::error::PersistenceError;

type BoxedKaratQuery<'a> = karats::BoxedQuery<'a, Sqlite>;

/// Escapes `LIKE` wildcards so a search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped: String = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Builds the filtered base query shared by the row and count queries.
///
/// `SQLite` `LIKE` is case-insensitive for ASCII, which gives the search its
/// case-insensitivity.
fn filtered(filter: &RecordFilter) -> BoxedKaratQuery<'_> {
    let mut query: BoxedKaratQuery<'_> = karats::table.into_boxed();

    if !filter.include_deleted {
        query = query.filter(karats::deleted_at.is_null());
    }
    if let Some(division) = &filter.division_ref {
        query = query.filter(karats::division_ref.eq(division.value()));
    }
    if let Some(status) = filter.status {
        query = query.filter(karats::status.eq(status.as_str()));
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern: String = format!("%{}%", escape_like(search));
        query = query.filter(
            karats::code
                .like(pattern.clone())
                .escape('\\')
                .or(karats::description.like(pattern).escape('\\')),
        );
    }

    query
}

fn ordered(query: BoxedKaratQuery<'_>, sort: SortOrder) -> BoxedKaratQuery<'_> {
    let query: BoxedKaratQuery<'_> = match (sort.field, sort.direction) {
        (SortField::Code, SortDirection::Ascending) => query.order(karats::code.asc()),
        (SortField::Code, SortDirection::Descending) => query.order(karats::code.desc()),
        (SortField::Description, SortDirection::Ascending) => {
            query.order(karats::description.asc())
        }
        (SortField::Description, SortDirection::Descending) => {
            query.order(karats::description.desc())
        }
        (SortField::StandardPurity, SortDirection::Ascending) => {
            query.order(karats::standard_purity.asc())
        }
        (SortField::StandardPurity, SortDirection::Descending) => {
            query.order(karats::standard_purity.desc())
        }
        (SortField::CreatedAt, SortDirection::Ascending) => query.order(karats::created_at.asc()),
        (SortField::CreatedAt, SortDirection::Descending) => {
            query.order(karats::created_at.desc())
        }
        (SortField::UpdatedAt, SortDirection::Ascending) => query.order(karats::updated_at.asc()),
        (SortField::UpdatedAt, SortDirection::Descending) => {
            query.order(karats::updated_at.desc())
        }
    };

    // Stable order for rows that tie on the sort column
    query.then_order_by(karats::karat_id.asc())
}

/// Retrieves a karat by ID, including soft-deleted karats.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored row is
/// malformed. Returns `Ok(None)` if the karat is not found.
pub fn find_karat(
    conn: &mut SqliteConnection,
    id: RecordId,
) -> Result<Option<KaratRecord>, PersistenceError> {
    debug!(karat_id = id.value(), "Looking up karat");

    let result: Result<KaratRow, diesel::result::Error> = karats::table
        .filter(karats::karat_id.eq(id.value()))
        .select(KaratRow::as_select())
        .first(conn);

    match result {
        Ok(row) => row.into_record().map(Some),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Returns true if a karat other than `exclude` uses `code` in `division`.
///
/// Soft-deleted karats are included.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn code_in_use(
    conn: &mut SqliteConnection,
    code: &Code,
    division: &DivisionRef,
    exclude: Option<RecordId>,
) -> Result<bool, PersistenceError> {
    let mut query: BoxedKaratQuery<'_> = karats::table
        .filter(karats::code.eq(code.value()))
        .filter(karats::division_ref.eq(division.value()))
        .into_boxed();

    if let Some(id) = exclude {
        query = query.filter(karats::karat_id.ne(id.value()));
    }

    let count: i64 = query.count().get_result(conn)?;
    Ok(count > 0)
}

/// Runs a filtered, sorted, optionally paged karat query.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is
/// malformed.
pub fn query_karats(
    conn: &mut SqliteConnection,
    query: &RecordQuery,
) -> Result<QueryResult, PersistenceError> {
    let total_count: i64 = filtered(&query.filter).count().get_result(conn)?;

    let mut rows_query: BoxedKaratQuery<'_> = ordered(filtered(&query.filter), query.sort);
    if let Some(limit) = query.limit {
        rows_query = rows_query.limit(i64::try_from(limit).unwrap_or(i64::MAX));
    }
    if query.offset > 0 {
        rows_query = rows_query.offset(i64::try_from(query.offset).unwrap_or(i64::MAX));
    }

    let rows: Vec<KaratRow> = rows_query.select(KaratRow::as_select()).load(conn)?;
    let records: Vec<KaratRecord> = rows
        .into_iter()
        .map(KaratRow::into_record)
        .collect::<Result<_, _>>()?;

    debug!(
        returned = records.len(),
        total = total_count,
        "Queried karats"
    );

    Ok(QueryResult {
        records,
        total_count: u64::try_from(total_count).unwrap_or(0),
    })
}

/// Counts existing karats among `ids`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_existing(conn: &mut SqliteConnection, ids: &[i64]) -> Result<i64, PersistenceError> {
    Ok(karats::table
        .filter(karats::karat_id.eq_any(ids))
        .count()
        .get_result(conn)?)
}
