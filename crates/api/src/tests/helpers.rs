// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use karat_registry_domain::{ActorId, NumericInput};
use karat_registry_persistence::Persistence;

use crate::{KaratFieldsRequest, KaratInfo, create_karat};

pub const MAX_PAGE_SIZE: u64 = 100;

pub fn create_test_actor() -> ActorId {
    ActorId::parse("admin-123").unwrap()
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn create_test_request(code: &str, division: &str) -> KaratFieldsRequest {
    KaratFieldsRequest {
        code: Some(code.to_string()),
        division_ref: Some(division.to_string()),
        description: Some(format!("{code} gold")),
        standard_purity: Some(NumericInput::Number(75.0)),
        minimum: Some(NumericInput::Number(74.5)),
        maximum: Some(NumericInput::Number(75.5)),
        status: None,
    }
}

/// Creates a karat through the handler and returns its response data.
pub fn seed(persistence: &mut Persistence, code: &str, division: &str) -> KaratInfo {
    create_karat(
        persistence,
        create_test_request(code, division),
        &create_test_actor(),
    )
    .unwrap()
    .data
    .unwrap()
}
