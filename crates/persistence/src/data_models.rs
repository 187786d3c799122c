// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use karat_registry_domain::{
    ActorId, Code, DivisionRef, DomainError, KaratRecord, RecordId, RecordStatus,
};

use crate::diesel_schema::karats;
use crate::error::PersistenceError;

/// Diesel Queryable struct for karat rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = karats)]
pub struct KaratRow {
    pub karat_id: i64,
    pub code: String,
    pub division_ref: String,
    pub description: String,
    pub standard_purity: f64,
    pub minimum: f64,
    pub maximum: f64,
    pub status: String,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
    pub deleted_by: Option<String>,
}

/// Changeset for a partial record update.
///
/// `None` fields are left untouched by Diesel.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = karats)]
pub struct KaratChangeset<'a> {
    pub code: Option<&'a str>,
    pub division_ref: Option<&'a str>,
    pub description: Option<&'a str>,
    pub standard_purity: Option<f64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub status: Option<&'a str>,
    pub updated_by: Option<&'a str>,
}

fn corrupt(karat_id: i64, err: &DomainError) -> PersistenceError {
    PersistenceError::ReconstructionError(format!("karat {karat_id}: {err}"))
}

impl KaratRow {
    /// Rebuilds the domain record, re-checking every stored value.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ReconstructionError` if a stored value no
    /// longer satisfies its domain type.
    pub fn into_record(self) -> Result<KaratRecord, PersistenceError> {
        let id: i64 = self.karat_id;
        let actor = |raw: String| ActorId::parse(&raw).map_err(|e| corrupt(id, &e));

        Ok(KaratRecord {
            id: RecordId::new(id),
            code: Code::parse(&self.code).map_err(|e| corrupt(id, &e))?,
            division_ref: DivisionRef::parse(&self.division_ref).map_err(|e| corrupt(id, &e))?,
            description: self.description,
            standard_purity: self.standard_purity,
            minimum: self.minimum,
            maximum: self.maximum,
            status: self
                .status
                .parse::<RecordStatus>()
                .map_err(|e| corrupt(id, &e))?,
            created_by: actor(self.created_by)?,
            updated_by: self.updated_by.map(actor).transpose()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
            deleted_by: self.deleted_by.map(actor).transpose()?,
        })
    }
}
