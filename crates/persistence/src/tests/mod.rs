// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;

use karat_registry_domain::{
    ActorId, Code, DivisionRef, NewRecord, NumericInput, RecordFields, RecordStatus,
};

pub fn create_test_actor() -> ActorId {
    ActorId::parse("admin-1").unwrap()
}

pub fn create_test_new_record(code: &str, division: &str) -> NewRecord {
    NewRecord {
        code: Code::parse(code).unwrap(),
        division_ref: DivisionRef::parse(division).unwrap(),
        description: format!("{code} standard"),
        standard_purity: 75.0,
        minimum: 74.5,
        maximum: 75.5,
        status: RecordStatus::Active,
    }
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
