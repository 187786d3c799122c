// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Candidate field sets and their validated forms.

use crate::status::RecordStatus;
use crate::types::{Code, DivisionRef, KaratRecord};
use serde::{Deserialize, Serialize};

/// A numeric value as it arrives from a caller: either a JSON number or text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    /// A native number.
    Number(f64),
    /// A textual number such as `"75.5"`.
    Text(String),
}

impl NumericInput {
    /// Returns the value if it is a finite number.
    ///
    /// Text is trimmed before parsing. `NaN`, infinities and blank text all
    /// yield `None`.
    #[must_use]
    pub fn as_finite(&self) -> Option<f64> {
        let value: f64 = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Returns the value as originally supplied, for error messages.
    #[must_use]
    pub fn raw(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A candidate field set.
///
/// Create requires every field except `status`. Update treats every field
/// as optional and only validates what is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFields {
    pub code: Option<String>,
    pub division_ref: Option<String>,
    pub description: Option<String>,
    pub standard_purity: Option<NumericInput>,
    pub minimum: Option<NumericInput>,
    pub maximum: Option<NumericInput>,
    pub status: Option<String>,
}

/// A fully validated and normalized record ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub code: Code,
    pub division_ref: DivisionRef,
    pub description: String,
    pub standard_purity: f64,
    pub minimum: f64,
    pub maximum: f64,
    pub status: RecordStatus,
}

/// A validated partial change to an existing record.
///
/// `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordChanges {
    pub code: Option<Code>,
    pub division_ref: Option<DivisionRef>,
    pub description: Option<String>,
    pub standard_purity: Option<f64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub status: Option<RecordStatus>,
}

impl RecordChanges {
    /// Returns a change set that only sets the status.
    #[must_use]
    pub const fn status_only(status: RecordStatus) -> Self {
        Self {
            code: None,
            division_ref: None,
            description: None,
            standard_purity: None,
            minimum: None,
            maximum: None,
            status: Some(status),
        }
    }

    /// Returns true if nothing would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.division_ref.is_none()
            && self.description.is_none()
            && self.standard_purity.is_none()
            && self.minimum.is_none()
            && self.maximum.is_none()
            && self.status.is_none()
    }

    /// Returns true if applying these changes would move the record to a
    /// different `(code, division)` pair.
    #[must_use]
    pub fn changes_scope(&self, current: &KaratRecord) -> bool {
        self.code.as_ref().is_some_and(|code| code != &current.code)
            || self
                .division_ref
                .as_ref()
                .is_some_and(|division| division != &current.division_ref)
    }

    /// Returns the `(code, division)` pair the record would have after
    /// these changes are applied.
    #[must_use]
    pub fn resolved_scope<'a>(&'a self, current: &'a KaratRecord) -> (&'a Code, &'a DivisionRef) {
        (
            self.code.as_ref().unwrap_or(&current.code),
            self.division_ref.as_ref().unwrap_or(&current.division_ref),
        )
    }
}
