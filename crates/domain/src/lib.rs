// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod fields;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::DomainError;
pub use fields::{NewRecord, NumericInput, RecordChanges, RecordFields};
pub use status::RecordStatus;
pub use types::{
    ActorId, Code, DivisionRef, KaratRecord, MAX_CODE_LENGTH, MAX_DESCRIPTION_LENGTH,
    MAX_DIVISION_REF_LENGTH, RecordId,
};
pub use validation::{validate_create, validate_update};
