//! Swimlane timeline layout for the U-Engine ecosystem.
//!
//! Places named, time-bounded events on the fewest non-overlapping tracks
//! a deterministic first-fit scan allows, and expresses every event's
//! position as percentages of the overall span so a host can draw it in
//! a fixed-width container.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Event`, `LaidOutEvent`, `Layout`
//! - **`engine`**: Greedy track assignment (`LayoutEngine`, `compute_layout`)
//! - **`validation`**: Record checks (names, numeric bounds, `start <= end`)
//! - **`source`**: YAML event source reader
//! - **`render`**: HTML markup for layouts and source errors
//! - **`processor`**: Source → layout → markup pipeline
//! - **`settings`**: Persisted user settings
//!
//! # Example
//!
//! ```
//! use u_timeline::engine::compute_layout;
//! use u_timeline::models::Event;
//!
//! let placed = compute_layout(&[
//!     Event::new("A", 0.0, 10.0),
//!     Event::new("B", 5.0, 15.0),
//! ]);
//! assert_eq!(placed[1].track, 1);
//! assert!((placed[1].left_percent - 33.333333333333336).abs() < 1e-9);
//! ```
//!
//! # References
//!
//! - Kleinberg & Tardos (2005), "Algorithm Design", Ch. 4.1
//! - Golumbic (2004), "Algorithmic Graph Theory and Perfect Graphs"

pub mod engine;
pub mod models;
pub mod processor;
pub mod render;
pub mod settings;
pub mod source;
pub mod validation;
