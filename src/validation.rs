//! Input validation for timeline events.
//!
//! Checks raw records before layout. Detects:
//! - Records that are not mappings
//! - Missing or empty names
//! - Missing or non-numeric bounds
//! - Non-finite bounds (`.nan`, `.inf`)
//! - Inverted intervals (`start > end`)
//!
//! The layout engine never re-validates; everything it receives should
//! have passed through here.

use serde_yaml::Value;

use crate::models::Event;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A record is not a key-value mapping.
    NotAMapping,
    /// The name is missing or empty.
    MissingName,
    /// `start` or `end` is missing or not a number.
    NonNumericBound,
    /// `start` or `end` is NaN or infinite.
    NonFiniteBound,
    /// `start` is after `end`.
    InvertedInterval,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Outcome of filtering a batch of raw records.
#[derive(Debug, Clone, Default)]
pub struct RecordReport {
    /// Records that passed, in input order.
    pub events: Vec<Event>,
    /// Rejected records as `(index, error)`.
    pub rejected: Vec<(usize, ValidationError)>,
}

/// Validates a single raw record, producing an event.
///
/// A name may be a non-empty string or a non-zero number (rendered as
/// text). Bounds must be finite numbers with `start <= end`.
pub fn validate_record(record: &Value) -> Result<Event, ValidationError> {
    let Value::Mapping(map) = record else {
        return Err(ValidationError::new(
            ValidationErrorKind::NotAMapping,
            "Record is not a mapping",
        ));
    };

    let name = match map.get("name") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) if n.as_f64().is_some_and(|v| v != 0.0) => n.to_string(),
        _ => {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingName,
                "Record has no name",
            ))
        }
    };

    let start = bound(map.get("start"), "start", &name)?;
    let end = bound(map.get("end"), "end", &name)?;

    if start > end {
        return Err(ValidationError::new(
            ValidationErrorKind::InvertedInterval,
            format!("Event '{name}' starts after it ends ({start} > {end})"),
        ));
    }

    Ok(Event::new(name, start, end))
}

fn bound(value: Option<&Value>, field: &str, name: &str) -> Result<f64, ValidationError> {
    let Some(v) = value.and_then(Value::as_f64) else {
        return Err(ValidationError::new(
            ValidationErrorKind::NonNumericBound,
            format!("Event '{name}' has no numeric '{field}'"),
        ));
    };
    if !v.is_finite() {
        return Err(ValidationError::new(
            ValidationErrorKind::NonFiniteBound,
            format!("Event '{name}' has a non-finite '{field}'"),
        ));
    }
    Ok(v)
}

/// Validates a batch of raw records, keeping the valid ones.
pub fn validate_records(records: &[Value]) -> RecordReport {
    let mut report = RecordReport::default();
    for (idx, record) in records.iter().enumerate() {
        match validate_record(record) {
            Ok(event) => report.events.push(event),
            Err(err) => report.rejected.push((idx, err)),
        }
    }
    report
}

/// Validates already-typed events.
///
/// Checks:
/// 1. Every name is non-empty
/// 2. Every bound is finite
/// 3. `start <= end`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_events(events: &[Event]) -> ValidationResult {
    let mut errors = Vec::new();

    for (idx, event) in events.iter().enumerate() {
        if event.name.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingName,
                format!("Event #{idx} has no name"),
            ));
        }

        if !event.start.is_finite() || !event.end.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteBound,
                format!("Event #{idx} ('{}') has a non-finite bound", event.name),
            ));
        } else if event.start > event.end {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedInterval,
                format!(
                    "Event #{idx} ('{}') starts after it ends ({} > {})",
                    event.name, event.start, event.end
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
