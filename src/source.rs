//! Event source reader.
//!
//! Reads a YAML block holding an array of `{name, start, end}` records:
//!
//! ```yaml
//! - name: Tang
//!   start: 618
//!   end: 907
//! - name: Song
//!   start: 960
//!   end: 1279
//! ```
//!
//! Malformed records are dropped (see [`crate::validation`]). A block that
//! does not parse, is not an array, or keeps no records is an error.

use serde_yaml::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::Event;
use crate::validation::validate_records;

/// Errors raised while reading an event source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The text is not valid YAML.
    #[error("{0}")]
    Parse(#[from] serde_yaml::Error),
    /// The document is valid YAML but not a sequence.
    #[error("YAML must be an array of events")]
    NotAnArray,
    /// Every record was discarded.
    #[error("no valid events found")]
    NoValidEvents,
}

impl SourceError {
    /// Whether the error comes from malformed text rather than from
    /// well-formed input with nothing usable in it.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::NotAnArray)
    }
}

/// Parses and validates an event source.
///
/// # Example
///
/// ```
/// use u_timeline::source::parse_events;
///
/// let source = "- {name: A, start: 0, end: 10}\n- {name: B, start: 9, end: 3}";
/// let events = parse_events(source).unwrap();
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].name, "A");
/// ```
pub fn parse_events(source: &str) -> Result<Vec<Event>, SourceError> {
    if source.trim().is_empty() {
        return Err(SourceError::NotAnArray);
    }
    let document: Value = serde_yaml::from_str(source)?;
    let Value::Sequence(records) = document else {
        return Err(SourceError::NotAnArray);
    };

    let report = validate_records(&records);
    for (idx, err) in &report.rejected {
        warn!(record = idx, kind = ?err.kind, "discarding event record: {}", err.message);
    }

    if report.events.is_empty() {
        return Err(SourceError::NoValidEvents);
    }

    debug!(
        kept = report.events.len(),
        discarded = report.rejected.len(),
        "event source read"
    );
    Ok(report.events)
}
