//! Layout (solution) model.
//!
//! A layout places every input event on a track and normalizes its
//! horizontal position to percentages of the overall span, ready for a
//! fixed-width container.

use serde::{Deserialize, Serialize};

use super::Event;

/// An event placed on a track.
///
/// Serializes with the event fields flattened alongside the placement:
/// `{"name", "start", "end", "track", "leftPercent", "widthPercent"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaidOutEvent {
    /// The placed event.
    #[serde(flatten)]
    pub event: Event,
    /// Swimlane index (0-based).
    pub track: usize,
    /// Horizontal start offset, percent of the span.
    pub left_percent: f64,
    /// Horizontal extent, percent of the span.
    pub width_percent: f64,
}

impl LaidOutEvent {
    /// Creates a placed event.
    pub fn new(event: Event, track: usize, left_percent: f64, width_percent: f64) -> Self {
        Self {
            event,
            track,
            left_percent,
            width_percent,
        }
    }

    /// Event name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.event.name
    }

    /// Event start.
    #[inline]
    pub fn start(&self) -> f64 {
        self.event.start
    }

    /// Event end.
    #[inline]
    pub fn end(&self) -> f64 {
        self.event.end
    }
}

/// A complete timeline layout.
///
/// Events are kept in placement order (start ascending, longer first),
/// not input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Placed events.
    pub events: Vec<LaidOutEvent>,
    /// Number of tracks in use. Track indices are `0..track_count`.
    pub track_count: usize,
    /// Earliest start over all events.
    pub min_start: f64,
    /// Latest end over all events.
    pub max_end: f64,
    /// Normalization span (never below the engine's minimum span).
    ///
    /// Overflows to infinity for bounds near `f64::MAX`; percentages are
    /// computed on halved coordinates and stay finite regardless.
    pub total_span: f64,
}

impl Layout {
    /// Creates an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of placed events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the layout holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events on the given track, in placement order.
    pub fn events_in_track(&self, track: usize) -> Vec<&LaidOutEvent> {
        self.events.iter().filter(|e| e.track == track).collect()
    }

    /// Events grouped by track, index 0 first.
    pub fn tracks(&self) -> Vec<Vec<&LaidOutEvent>> {
        let mut tracks: Vec<Vec<&LaidOutEvent>> = vec![Vec::new(); self.track_count];
        for event in &self.events {
            if let Some(lane) = tracks.get_mut(event.track) {
                lane.push(event);
            }
        }
        tracks
    }

    /// Finds the first placed event with the given name.
    pub fn find(&self, name: &str) -> Option<&LaidOutEvent> {
        self.events.iter().find(|e| e.name() == name)
    }

    /// Consumes the layout, returning the placed events.
    pub fn into_events(self) -> Vec<LaidOutEvent> {
        self.events
    }
}
