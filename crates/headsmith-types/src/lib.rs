//! Shared identity and payload types for Headsmith.
//!
//! This crate is the leaf every other Headsmith crate builds on: typed node
//! ids and the opaque checkpoint payloads that flow between the editing
//! surface and the history tree. It has **no internal headsmith
//! dependencies**.
//!
//! |---------------|-----------------------------------------------|
//! | Type          | Purpose                                       |
//! |---------------|-----------------------------------------------|
//! | [`NodeId`]    | Which history checkpoint                      |
//! | [`Snapshot`]  | Full encoded canvas state (opaque, digested)  |
//! | [`Preview`]   | Small encoded thumbnail (opaque)              |
//! |---------------|-----------------------------------------------|

pub mod ids;
pub mod payload;

// Re-export primary types at crate root for convenience.
pub use ids::{NodeId, PrefixError, resolve_node_prefix};
pub use payload::{Preview, Snapshot};

/// Current time as Unix milliseconds. Used for node creation timestamps.
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
