//! Timeline scheduling engine.
//!
//! This module provides:
//! - Start-time reflow around locked anchors
//! - Free-slot search for new tasks
//! - Pairwise overlap detection

mod overlap;
mod reflow;
mod slot;

pub use overlap::detect_overlaps;
pub use reflow::reflow;
pub use slot::{find_slot, Slot};
