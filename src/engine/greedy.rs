//! Greedy first-fit track assignment.
//!
//! # Algorithm
//!
//! 1. Sort events by start ascending, then by duration descending
//!    (ties on both fall back to name, then end, so the result depends
//!    only on the input multiset).
//! 2. For each event, scan tracks in index order and take the first one
//!    whose last event no longer collides with it.
//! 3. If every track collides, open a new track.
//! 4. Normalize each event's start offset and duration against the span
//!    `max(min_span, max_end - min_start)`.
//!
//! With this ordering first-fit behaves like the classical greedy
//! interval-graph colouring: a new track is only opened when every open
//! track is busy at the event's start.
//!
//! # Complexity
//! O(n log n + n * t) where n=events, t=tracks.

use std::cmp::Ordering;

use tracing::debug;

use crate::models::{Event, LaidOutEvent, Layout};

/// Default lower bound of the normalization span.
pub const DEFAULT_MIN_SPAN: f64 = 1.0;

/// How an event starting exactly where a track ends is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Touching intervals share a track, unless either of the two
    /// touching events has zero duration.
    #[default]
    ShareTouching,
    /// Only a track whose end lies strictly before the event start is
    /// eligible; touching intervals always split.
    Strict,
}

/// Working state of one swimlane.
#[derive(Debug, Clone, Copy)]
struct Track {
    end: f64,
    ends_with_instant: bool,
}

impl Track {
    fn open(event: &Event) -> Self {
        Self {
            end: event.end,
            ends_with_instant: event.is_instant(),
        }
    }

    fn admits(&self, event: &Event, policy: BoundaryPolicy) -> bool {
        if self.end < event.start {
            return true;
        }
        match policy {
            BoundaryPolicy::Strict => false,
            BoundaryPolicy::ShareTouching => {
                self.end == event.start && !self.ends_with_instant && !event.is_instant()
            }
        }
    }

    fn place(&mut self, event: &Event) {
        self.end = self.end.max(event.end);
        self.ends_with_instant = event.is_instant();
    }
}

/// Placement order: start ascending, longer events first.
fn placement_order(a: &Event, b: &Event) -> Ordering {
    a.start
        .total_cmp(&b.start)
        .then_with(|| b.duration().total_cmp(&a.duration()))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.end.total_cmp(&b.end))
}

/// Swimlane layout engine.
///
/// Pure and reentrant: every call owns its working state.
///
/// # Example
///
/// ```
/// use u_timeline::engine::LayoutEngine;
/// use u_timeline::models::Event;
///
/// let events = vec![
///     Event::new("A", 0.0, 10.0),
///     Event::new("B", 5.0, 15.0),
///     Event::new("C", 12.0, 20.0),
/// ];
/// let layout = LayoutEngine::new().layout(&events);
///
/// assert_eq!(layout.track_count, 2);
/// assert_eq!(layout.find("A").unwrap().track, 0);
/// assert_eq!(layout.find("B").unwrap().track, 1);
/// assert_eq!(layout.find("C").unwrap().track, 0);
/// ```
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    boundary_policy: BoundaryPolicy,
    min_span: f64,
}

impl LayoutEngine {
    /// Creates an engine with the default boundary policy and a minimum
    /// span of [`DEFAULT_MIN_SPAN`].
    pub fn new() -> Self {
        Self {
            boundary_policy: BoundaryPolicy::default(),
            min_span: DEFAULT_MIN_SPAN,
        }
    }

    /// Sets the boundary policy.
    pub fn with_boundary_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.boundary_policy = policy;
        self
    }

    /// Sets the minimum normalization span.
    ///
    /// Non-positive or NaN values are raised to the smallest positive `f64`
    /// so percentages stay finite.
    pub fn with_min_span(mut self, min_span: f64) -> Self {
        self.min_span = min_span.max(f64::MIN_POSITIVE);
        self
    }

    /// Boundary policy in use.
    pub fn boundary_policy(&self) -> BoundaryPolicy {
        self.boundary_policy
    }

    /// Lays out events on tracks.
    ///
    /// Returns one placed event per input event, in placement order.
    /// Empty input yields an empty layout.
    pub fn layout(&self, events: &[Event]) -> Layout {
        if events.is_empty() {
            return Layout::new();
        }

        let mut order: Vec<&Event> = events.iter().collect();
        order.sort_by(|a, b| placement_order(a, b));

        let min_start = order.iter().map(|e| e.start).fold(f64::INFINITY, f64::min);
        let max_end = order
            .iter()
            .map(|e| e.end)
            .fold(f64::NEG_INFINITY, f64::max);
        let total_span = (max_end - min_start).max(self.min_span);
        // Normalize on halved coordinates: the span of two finite bounds
        // can overflow, half of it cannot.
        let half_span = (max_end / 2.0 - min_start / 2.0).max(self.min_span / 2.0);
        let half_min_start = min_start / 2.0;

        let mut tracks: Vec<Track> = Vec::new();
        let mut placed = Vec::with_capacity(events.len());

        for event in order {
            let track = match tracks
                .iter()
                .position(|t| t.admits(event, self.boundary_policy))
            {
                Some(idx) => {
                    tracks[idx].place(event);
                    idx
                }
                None => {
                    tracks.push(Track::open(event));
                    tracks.len() - 1
                }
            };

            let half_start = event.start / 2.0;
            let left_percent = (half_start - half_min_start) / half_span * 100.0;
            let width_percent = (event.end / 2.0 - half_start) / half_span * 100.0;
            placed.push(LaidOutEvent::new(
                event.clone(),
                track,
                left_percent,
                width_percent,
            ));
        }

        debug!(
            events = placed.len(),
            tracks = tracks.len(),
            min_start,
            max_end,
            total_span,
            "timeline layout computed"
        );

        Layout {
            events: placed,
            track_count: tracks.len(),
            min_start,
            max_end,
            total_span,
        }
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Lays out events with the default engine, returning only the placed events.
///
/// # Example
///
/// ```
/// use u_timeline::engine::compute_layout;
/// use u_timeline::models::Event;
///
/// let placed = compute_layout(&[Event::new("X", 0.0, 5.0), Event::new("Y", 5.0, 10.0)]);
/// assert!(placed.iter().all(|e| e.track == 0));
/// assert!(compute_layout(&[]).is_empty());
/// ```
pub fn compute_layout(events: &[Event]) -> Vec<LaidOutEvent> {
    LayoutEngine::new().layout(events).into_events()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    const EPS: f64 = 1e-9;

    fn ev(name: &str, start: f64, end: f64) -> Event {
        Event::new(name, start, end)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_overlapping_and_gapped_events() {
        let layout = LayoutEngine::new().layout(&[
            ev("A", 0.0, 10.0),
            ev("B", 5.0, 15.0),
            ev("C", 12.0, 20.0),
        ]);

        assert_eq!(layout.track_count, 2);
        assert_close(layout.min_start, 0.0);
        assert_close(layout.max_end, 20.0);
        assert_close(layout.total_span, 20.0);

        let a = layout.find("A").unwrap();
        let b = layout.find("B").unwrap();
        let c = layout.find("C").unwrap();
        assert_eq!((a.track, b.track, c.track), (0, 1, 0));
        assert_close(a.left_percent, 0.0);
        assert_close(a.width_percent, 50.0);
        assert_close(b.left_percent, 25.0);
        assert_close(b.width_percent, 50.0);
        assert_close(c.left_percent, 60.0);
        assert_close(c.width_percent, 40.0);
    }

    #[test]
    fn test_touching_events_share_track() {
        let placed = compute_layout(&[ev("X", 0.0, 5.0), ev("Y", 5.0, 10.0)]);
        assert_eq!(placed.len(), 2);
        assert!(placed.iter().all(|e| e.track == 0));
    }

    #[test]
    fn test_touching_events_split_under_strict_policy() {
        let layout = LayoutEngine::new()
            .with_boundary_policy(BoundaryPolicy::Strict)
            .layout(&[ev("X", 0.0, 5.0), ev("Y", 5.0, 10.0)]);
        assert_eq!(layout.track_count, 2);
        assert_eq!(layout.find("Y").unwrap().track, 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(compute_layout(&[]).is_empty());
        let layout = LayoutEngine::new().layout(&[]);
        assert!(layout.is_empty());
        assert_eq!(layout.track_count, 0);
    }

    #[test]
    fn test_identical_instants_get_own_tracks() {
        let layout = LayoutEngine::new().layout(&[
            ev("N1", 0.0, 0.0),
            ev("N2", 0.0, 0.0),
            ev("N3", 0.0, 0.0),
        ]);

        assert_eq!(layout.track_count, 3);
        let tracks: Vec<usize> = layout.events.iter().map(|e| e.track).collect();
        assert_eq!(tracks, vec![0, 1, 2]);
        assert_close(layout.total_span, 1.0);
        for e in &layout.events {
            assert_close(e.left_percent, 0.0);
            assert_close(e.width_percent, 0.0);
        }
    }

    #[test]
    fn test_instant_touching_interval_splits() {
        let layout = LayoutEngine::new().layout(&[ev("Span", 0.0, 5.0), ev("Mark", 5.0, 5.0)]);
        assert_eq!(layout.find("Mark").unwrap().track, 1);

        let layout = LayoutEngine::new().layout(&[ev("Mark", 0.0, 0.0), ev("Span", 0.0, 5.0)]);
        // Longer event is placed first among equal starts.
        assert_eq!(layout.events[0].name(), "Span");
        assert_eq!(layout.find("Mark").unwrap().track, 1);
    }

    #[test]
    fn test_single_event_fills_width() {
        let placed = compute_layout(&[ev("Solo", 1368.0, 1644.0)]);
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].track, 0);
        assert_close(placed[0].left_percent, 0.0);
        assert_close(placed[0].width_percent, 100.0);
    }

    #[test]
    fn test_single_instant_uses_span_floor() {
        let layout = LayoutEngine::new().layout(&[ev("Moment", 42.0, 42.0)]);
        assert_close(layout.total_span, 1.0);
        assert_close(layout.events[0].left_percent, 0.0);
        assert_close(layout.events[0].width_percent, 0.0);
    }

    #[test]
    fn test_short_span_uses_floor() {
        let layout = LayoutEngine::new().layout(&[ev("A", 0.0, 0.5)]);
        assert_close(layout.total_span, 1.0);
        assert_close(layout.events[0].width_percent, 50.0);
    }

    #[test]
    fn test_custom_min_span() {
        let layout = LayoutEngine::new()
            .with_min_span(100.0)
            .layout(&[ev("A", 10.0, 35.0)]);
        assert_close(layout.total_span, 100.0);
        assert_close(layout.events[0].width_percent, 25.0);

        let layout = LayoutEngine::new()
            .with_min_span(0.0)
            .layout(&[ev("A", 3.0, 3.0)]);
        assert!(layout.events[0].left_percent.is_finite());
        assert!(layout.events[0].width_percent.is_finite());
    }

    #[test]
    fn test_extreme_bounds_stay_finite() {
        let layout = LayoutEngine::new().layout(&[
            ev("A", -1.0e308, 1.0e308),
            ev("B", 0.0, 1.0),
            ev("C", f64::MAX / 2.0, f64::MAX),
        ]);

        for e in &layout.events {
            assert!(e.left_percent.is_finite(), "{e:?}");
            assert!(e.width_percent.is_finite(), "{e:?}");
        }
        let a = layout.find("A").unwrap();
        let b = layout.find("B").unwrap();
        let c = layout.find("C").unwrap();
        assert_close(a.left_percent, 0.0);
        assert!(a.left_percent < b.left_percent && b.left_percent < c.left_percent);
        assert!(a.width_percent > 50.0 && a.width_percent <= 100.0);
        assert!(b.width_percent >= 0.0 && b.width_percent < 1e-9);
        assert!(c.left_percent + c.width_percent <= 100.0 + EPS);
    }

    #[test]
    fn test_extreme_bounds_from_source() {
        let source = "- {name: A, start: -1.0e308, end: 1.0e308}\n- {name: B, start: 0, end: 1}";
        let events = crate::source::parse_events(source).unwrap();
        let layout = LayoutEngine::new().layout(&events);
        let a = layout.find("A").unwrap();
        let b = layout.find("B").unwrap();
        assert_close(a.left_percent, 0.0);
        assert_close(a.width_percent, 100.0);
        assert_close(b.left_percent, 50.0);
        assert!(b.width_percent.is_finite());
    }

    #[test]
    fn test_sort_order_longer_first() {
        let layout = LayoutEngine::new().layout(&[
            ev("Short", 0.0, 2.0),
            ev("Long", 0.0, 10.0),
            ev("Later", 3.0, 4.0),
        ]);
        let names: Vec<&str> = layout.events.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Long", "Short", "Later"]);
        assert_eq!(layout.find("Long").unwrap().track, 0);
        assert_eq!(layout.find("Short").unwrap().track, 1);
        // Short ends at 2 < 3, so Later reuses track 1.
        assert_eq!(layout.find("Later").unwrap().track, 1);
    }

    #[test]
    fn test_first_fit_prefers_lowest_track() {
        let layout = LayoutEngine::new().layout(&[
            ev("A", 0.0, 4.0),
            ev("B", 1.0, 2.0),
            ev("C", 6.0, 7.0),
        ]);
        // Both tracks are free at 6; the lowest index wins.
        assert_eq!(layout.find("C").unwrap().track, 0);
    }

    #[test]
    fn test_negative_axis() {
        let layout = LayoutEngine::new().layout(&[ev("BC", -500.0, -100.0), ev("AD", 0.0, 500.0)]);
        assert_close(layout.min_start, -500.0);
        assert_close(layout.total_span, 1000.0);
        let ad = layout.find("AD").unwrap();
        assert_eq!(ad.track, 0);
        assert_close(ad.left_percent, 50.0);
        assert_close(ad.width_percent, 50.0);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let mut events = vec![
            ev("A", 0.0, 10.0),
            ev("B", 5.0, 15.0),
            ev("C", 12.0, 20.0),
            ev("D", 0.0, 10.0),
            ev("E", 10.0, 11.0),
            ev("F", 3.0, 3.0),
            ev("G", 3.0, 3.0),
        ];
        let reference = LayoutEngine::new().layout(&events);

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            events.shuffle(&mut rng);
            assert_eq!(LayoutEngine::new().layout(&events), reference);
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let events = vec![ev("B", 5.0, 15.0), ev("A", 0.0, 10.0)];
        let before = events.clone();
        let _ = compute_layout(&events);
        assert_eq!(events, before);
    }

    fn arb_events() -> impl Strategy<Value = Vec<Event>> {
        prop::collection::vec((-1000i32..1000, 0u16..200, 0u8..4), 0..40).prop_map(|raw| {
            raw.into_iter()
                .map(|(start, len, name)| {
                    let start = f64::from(start);
                    Event::new(format!("E{name}"), start, start + f64::from(len))
                })
                .collect()
        })
    }

    /// Largest number of events covering a single point, with intervals
    /// treated as half-open `[start, end)`.
    fn max_depth(events: &[Event]) -> usize {
        events
            .iter()
            .map(|p| {
                events
                    .iter()
                    .filter(|e| e.start <= p.start && p.start < e.end)
                    .count()
            })
            .max()
            .unwrap_or(0)
    }

    proptest! {
        #[test]
        fn prop_cardinality_preserved(events in arb_events()) {
            prop_assert_eq!(compute_layout(&events).len(), events.len());
        }

        #[test]
        fn prop_no_overlap_within_track(events in arb_events()) {
            let placed = compute_layout(&events);
            for (i, a) in placed.iter().enumerate() {
                for b in placed.iter().skip(i + 1) {
                    if a.track == b.track {
                        prop_assert!(!a.event.overlaps(&b.event), "{:?} overlaps {:?}", a, b);
                    }
                }
            }
        }

        #[test]
        fn prop_tracks_contiguous(events in arb_events()) {
            let layout = LayoutEngine::new().layout(&events);
            let mut used = vec![false; layout.track_count];
            for e in &layout.events {
                prop_assert!(e.track < layout.track_count);
                used[e.track] = true;
            }
            prop_assert!(used.iter().all(|&u| u));
        }

        #[test]
        fn prop_deterministic_under_reordering(events in arb_events(), seed in any::<u64>()) {
            let reference = LayoutEngine::new().layout(&events);
            let mut shuffled = events.clone();
            shuffled.shuffle(&mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(LayoutEngine::new().layout(&shuffled), reference);
        }

        #[test]
        fn prop_percentages_finite_and_bounded(events in arb_events()) {
            for e in compute_layout(&events) {
                prop_assert!(e.left_percent.is_finite() && e.width_percent.is_finite());
                prop_assert!(e.left_percent >= 0.0 && e.width_percent >= 0.0);
                prop_assert!(e.left_percent + e.width_percent <= 100.0 + EPS);
            }
        }

        #[test]
        fn prop_track_count_matches_depth(
            raw in prop::collection::vec((-100i32..100, 1u16..50), 1..30)
        ) {
            let events: Vec<Event> = raw
                .into_iter()
                .enumerate()
                .map(|(i, (start, len))| {
                    let start = f64::from(start);
                    Event::new(format!("E{i}"), start, start + f64::from(len))
                })
                .collect();
            let layout = LayoutEngine::new().layout(&events);
            prop_assert_eq!(layout.track_count, max_depth(&events));
        }
    }
}
