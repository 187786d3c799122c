// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::fields::{NewRecord, NumericInput, RecordChanges, RecordFields};
use crate::status::RecordStatus;
use crate::types::{Code, DivisionRef, KaratRecord, MAX_DESCRIPTION_LENGTH};

/// Which numeric field is being checked.
///
/// Create and update report the same underlying problems with different
/// error kinds, so each check needs to know both the field and the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumericField {
    StandardPurity,
    Minimum,
    Maximum,
}

impl NumericField {
    const fn name(self) -> &'static str {
        match self {
            Self::StandardPurity => "standard_purity",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
        }
    }

    fn update_error(self, msg: String) -> DomainError {
        match self {
            Self::StandardPurity => DomainError::InvalidPurity(msg),
            Self::Minimum => DomainError::InvalidMinimum(msg),
            Self::Maximum => DomainError::InvalidMaximum(msg),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Create,
    Update,
}

/// Returns the trimmed value if it is present and not blank.
fn present(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn parse_number(
    field: NumericField,
    input: &NumericInput,
    mode: Mode,
) -> Result<f64, DomainError> {
    let Some(value) = input.as_finite() else {
        return Err(match mode {
            Mode::Create => DomainError::InvalidNumericValue {
                field: field.name(),
                value: input.raw(),
            },
            Mode::Update => field.update_error(format!("'{}' is not a number", input.raw())),
        });
    };

    // Rule: purity lies in [0, 100], bounds are non-negative
    let in_range: bool = match field {
        NumericField::StandardPurity => (0.0..=100.0).contains(&value),
        NumericField::Minimum | NumericField::Maximum => value >= 0.0,
    };

    if in_range {
        return Ok(value);
    }

    Err(match (mode, field) {
        (Mode::Create, NumericField::StandardPurity) => DomainError::InvalidPurityRange { value },
        (Mode::Create, _) => DomainError::InvalidValueRange {
            field: field.name(),
            value,
        },
        (Mode::Update, NumericField::StandardPurity) => {
            field.update_error(format!("must be between 0 and 100, got {value}"))
        }
        (Mode::Update, _) => field.update_error(format!("must not be negative, got {value}")),
    })
}

fn check_min_max(minimum: f64, maximum: f64) -> Result<(), DomainError> {
    // Rule: the acceptance range is never empty or inverted
    if minimum >= maximum {
        return Err(DomainError::InvalidMinMaxRange { minimum, maximum });
    }
    Ok(())
}

fn parse_description(raw: &str) -> Result<String, DomainError> {
    let value: &str = raw.trim();
    if value.is_empty() {
        return Err(DomainError::InvalidDescription(String::from(
            "Description cannot be empty",
        )));
    }
    if value.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(DomainError::InvalidDescription(format!(
            "Description must be at most {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(value.to_string())
}

/// Validates a candidate field set for creation.
///
/// This function is pure and deterministic. Checks run in a fixed order and
/// the first failure is returned:
///
/// 1. every mandatory field is present
/// 2. numeric fields parse, then purity range, then bound ranges
/// 3. minimum is strictly below maximum
/// 4. code, division and description formats
/// 5. status, if supplied
///
/// # Arguments
///
/// * `fields` - The candidate field set
///
/// # Returns
///
/// * `Ok(NewRecord)` with every value normalized
/// * `Err(DomainError)` describing the first violated rule
///
/// # Errors
///
/// Returns an error if any rule above is violated.
pub fn validate_create(fields: &RecordFields) -> Result<NewRecord, DomainError> {
    let code: Option<&str> = present(fields.code.as_ref());
    let division_ref: Option<&str> = present(fields.division_ref.as_ref());
    let description: Option<&str> = present(fields.description.as_ref());

    let (
        Some(code),
        Some(division_ref),
        Some(description),
        Some(standard_purity),
        Some(minimum),
        Some(maximum),
    ) = (
        code,
        division_ref,
        description,
        fields.standard_purity.as_ref(),
        fields.minimum.as_ref(),
        fields.maximum.as_ref(),
    )
    else {
        let missing: Vec<&'static str> = [
            ("code", code.is_none()),
            ("division_ref", division_ref.is_none()),
            ("description", description.is_none()),
            ("standard_purity", fields.standard_purity.is_none()),
            ("minimum", fields.minimum.is_none()),
            ("maximum", fields.maximum.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, is_missing)| is_missing.then_some(name))
        .collect();
        return Err(DomainError::RequiredFieldsMissing { fields: missing });
    };

    let standard_purity: f64 =
        parse_number(NumericField::StandardPurity, standard_purity, Mode::Create)?;
    let minimum: f64 = parse_number(NumericField::Minimum, minimum, Mode::Create)?;
    let maximum: f64 = parse_number(NumericField::Maximum, maximum, Mode::Create)?;
    check_min_max(minimum, maximum)?;

    let code: Code = Code::parse(code)?;
    let division_ref: DivisionRef = DivisionRef::parse(division_ref)?;
    let description: String = parse_description(description)?;

    let status: RecordStatus = match fields.status.as_deref() {
        Some(raw) => raw.parse()?,
        None => RecordStatus::Active,
    };

    Ok(NewRecord {
        code,
        division_ref,
        description,
        standard_purity,
        minimum,
        maximum,
        status,
    })
}

/// Validates a partial field set against the record it would change.
///
/// Only fields present in `fields` are validated, with the same per-field
/// rules as [`validate_create`] but update-specific error kinds for the
/// numeric fields. The minimum/maximum ordering is always checked on the
/// resolved pair: a supplied value wins, otherwise the persisted one is used.
///
/// # Arguments
///
/// * `fields` - The partial field set
/// * `current` - The persisted record
///
/// # Errors
///
/// Returns an error if any supplied field is invalid or if the resolved
/// minimum is not strictly below the resolved maximum.
pub fn validate_update(
    fields: &RecordFields,
    current: &KaratRecord,
) -> Result<RecordChanges, DomainError> {
    let standard_purity: Option<f64> = fields
        .standard_purity
        .as_ref()
        .map(|v| parse_number(NumericField::StandardPurity, v, Mode::Update))
        .transpose()?;
    let minimum: Option<f64> = fields
        .minimum
        .as_ref()
        .map(|v| parse_number(NumericField::Minimum, v, Mode::Update))
        .transpose()?;
    let maximum: Option<f64> = fields
        .maximum
        .as_ref()
        .map(|v| parse_number(NumericField::Maximum, v, Mode::Update))
        .transpose()?;

    check_min_max(
        minimum.unwrap_or(current.minimum),
        maximum.unwrap_or(current.maximum),
    )?;

    let code: Option<Code> = fields.code.as_deref().map(Code::parse).transpose()?;
    let division_ref: Option<DivisionRef> = fields
        .division_ref
        .as_deref()
        .map(DivisionRef::parse)
        .transpose()?;
    let description: Option<String> = fields
        .description
        .as_deref()
        .map(parse_description)
        .transpose()?;
    let status: Option<RecordStatus> = fields
        .status
        .as_deref()
        .map(str::parse::<RecordStatus>)
        .transpose()?;

    Ok(RecordChanges {
        code,
        division_ref,
        description,
        standard_purity,
        minimum,
        maximum,
        status,
    })
}
