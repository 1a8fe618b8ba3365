//! Timeline domain models.
//!
//! | Type | Role |
//! |------|------|
//! | `Event` | Input: a named interval `[start, end]` |
//! | `LaidOutEvent` | Output: event + track + percentage placement |
//! | `Layout` | Output container with span and track count |

mod event;
mod layout;

pub use event::Event;
pub use layout::{LaidOutEvent, Layout};
