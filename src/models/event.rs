//! Timeline event model.
//!
//! An event is a named closed interval `[start, end]` on a single numeric
//! time axis. The axis unit is chosen by the caller (years, days, ms).

use serde::{Deserialize, Serialize};

/// A named, time-bounded event.
///
/// # Invariant
/// `start <= end`. The layout engine relies on the caller for this;
/// use [`crate::validation::validate_events`] to check hand-built input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Display name (non-empty).
    pub name: String,
    /// Interval start.
    pub start: f64,
    /// Interval end (inclusive).
    pub end: f64,
}

impl Event {
    /// Creates a new event.
    pub fn new(name: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    /// Length of the interval (`end - start`).
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the event has zero duration.
    #[inline]
    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    /// Whether the two intervals share a stretch of time.
    ///
    /// Touching endpoints (`a.end == b.start`) do not count.
    pub fn overlaps(&self, other: &Event) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The interval as displayed on a capsule: `start ~ end`.
    pub fn interval_label(&self) -> String {
        format!("{} ~ {}", format_bound(self.start), format_bound(self.end))
    }
}

/// Formats a bound for display.
///
/// `-0` prints as `0`. Magnitudes at or above `1e21`, or below `1e-6`,
/// use exponent form with a signed exponent (`1e+21`, `1.5e-7`).
fn format_bound(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => formatted,
        };
    }
    value.to_string()
}
