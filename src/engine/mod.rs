//! Swimlane layout engine.
//!
//! # Algorithm
//!
//! `LayoutEngine` assigns events to tracks with a deterministic greedy
//! first-fit scan over events sorted by start (longer first), then maps
//! every event to percentage coordinates of the overall span.
//!
//! # References
//!
//! - Kleinberg & Tardos (2005), "Algorithm Design", Ch. 4.1 (Interval Partitioning)
//! - Golumbic (2004), "Algorithmic Graph Theory and Perfect Graphs", Ch. 8

mod greedy;

pub use greedy::{compute_layout, BoundaryPolicy, LayoutEngine, DEFAULT_MIN_SPAN};
