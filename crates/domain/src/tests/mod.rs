// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::{
    ActorId, Code, DivisionRef, KaratRecord, NumericInput, RecordFields, RecordId, RecordStatus,
};

/// Returns the canonical 18 karat field set used across tests.
pub fn create_test_fields() -> RecordFields {
    RecordFields {
        code: Some(String::from("k18")),
        division_ref: Some(String::from("D1")),
        description: Some(String::from("18 Karat Gold")),
        standard_purity: Some(NumericInput::Number(75.0)),
        minimum: Some(NumericInput::Number(74.5)),
        maximum: Some(NumericInput::Number(75.5)),
        status: None,
    }
}

/// Returns a persisted record matching [`create_test_fields`].
pub fn create_test_record() -> KaratRecord {
    KaratRecord {
        id: RecordId::new(1),
        code: Code::parse("K18").unwrap(),
        division_ref: DivisionRef::parse("D1").unwrap(),
        description: String::from("18 Karat Gold"),
        standard_purity: 75.0,
        minimum: 74.5,
        maximum: 75.5,
        status: RecordStatus::Active,
        created_by: ActorId::parse("admin").unwrap(),
        updated_by: None,
        created_at: String::from("2026-01-01 00:00:00"),
        updated_at: String::from("2026-01-01 00:00:00"),
        deleted_at: None,
        deleted_by: None,
    }
}
