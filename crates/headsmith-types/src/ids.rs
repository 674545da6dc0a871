//! Typed identifier for history nodes.
//!
//! `NodeId` wraps a UUIDv7 (time-ordered, globally unique). It displays as
//! standard UUID text for logging. `short()` and `tail()` are 8-char forms
//! for human-facing output; the leading chars are timestamp bits, so labels
//! that must tell neighbours apart use `tail()`. Neither is a lookup key:
//! use [`resolve_node_prefix`] to turn a user-typed prefix back into an id.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A history node identifier (UUIDv7).
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(uuid::Uuid);

impl NodeId {
    /// Create a new time-ordered ID (UUIDv7).
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// First 8 hex characters, for human display only. Not a lookup key.
    pub fn short(&self) -> String {
        self.0.as_simple().to_string()[..8].to_string()
    }

    /// Last 8 hex characters. These are random bits, so unlike `short()`
    /// they differ between ids minted in the same minute.
    pub fn tail(&self) -> String {
        self.to_hex()[24..].to_string()
    }

    /// Full 32-character hex string (no hyphens).
    pub fn to_hex(&self) -> String {
        self.0.as_simple().to_string()
    }

    /// The raw 16 bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Reconstruct from 16 bytes.
    pub fn from_bytes(b: [u8; 16]) -> Self {
        Self(uuid::Uuid::from_bytes(b))
    }

    /// Parse from a hex string (32 chars, no hyphens) or standard UUID format.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        uuid::Uuid::parse_str(s).map(Self)
    }

    /// Check if a query string matches this ID by hex prefix.
    pub fn matches_hex_prefix(&self, prefix: &str) -> bool {
        self.to_hex().starts_with(&prefix.to_ascii_lowercase())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<uuid::Uuid> for NodeId {
    fn from(u: uuid::Uuid) -> Self {
        Self(u)
    }
}

impl From<NodeId> for uuid::Uuid {
    fn from(id: NodeId) -> uuid::Uuid {
        id.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Full UUID with hyphens for log readability
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.short())
    }
}

// ── Prefix resolution ───────────────────────────────────────────────────────

/// Error from ambiguous prefix resolution.
#[derive(Debug, thiserror::Error)]
pub enum PrefixError {
    #[error("no node matches prefix '{0}'")]
    NoMatch(String),
    #[error("ambiguous prefix '{prefix}': matches {candidates:?}")]
    Ambiguous {
        prefix: String,
        candidates: Vec<String>,
    },
}

/// Resolve a hex prefix against a set of node IDs.
///
/// A full UUID (hyphenated or not) is accepted as well. The prefix must match
/// exactly one candidate.
pub fn resolve_node_prefix(
    ids: impl Iterator<Item = NodeId>,
    query: &str,
) -> Result<NodeId, PrefixError> {
    let needle: String = query.chars().filter(|c| *c != '-').collect();
    if needle.is_empty() {
        return Err(PrefixError::NoMatch(query.to_string()));
    }

    let matches: Vec<NodeId> = ids.filter(|id| id.matches_hex_prefix(&needle)).collect();

    match matches.len() {
        0 => Err(PrefixError::NoMatch(query.to_string())),
        1 => Ok(matches[0]),
        _ => Err(PrefixError::Ambiguous {
            prefix: query.to_string(),
            candidates: matches.iter().map(|id| id.short()).collect(),
        }),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_unique() {
        let a = NodeId::new();
        let b = NodeId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_short_is_8_chars() {
        assert_eq!(NodeId::new().short().len(), 8);
        assert_eq!(NodeId::new().tail().len(), 8);
        assert_eq!(NodeId::new().to_hex().len(), 32);
    }

    #[test]
    fn test_parse_both_formats() {
        let id = NodeId::new();
        assert_eq!(NodeId::parse(&id.to_hex()).unwrap(), id);
        assert_eq!(NodeId::parse(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_ordering_is_time_ordered() {
        let ids: Vec<NodeId> = (0..10).map(|_| NodeId::new()).collect();
        for i in 1..ids.len() {
            assert!(ids[i] >= ids[i - 1]);
        }
    }

    #[test]
    fn test_serde_is_transparent_uuid() {
        let id = NodeId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let parsed: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_debug_shows_short() {
        let id = NodeId::new();
        assert_eq!(format!("{:?}", id), format!("NodeId({})", id.short()));
    }

    #[test]
    fn test_resolve_unique_prefix() {
        let a = NodeId::from_bytes([0xaa; 16]);
        let b = NodeId::from_bytes([0xbb; 16]);
        let found = resolve_node_prefix([a, b].into_iter(), "aaaa").unwrap();
        assert_eq!(found, a);

        // uppercase and hyphenated input both resolve
        let found = resolve_node_prefix([a, b].into_iter(), "BBBBBBBB-BB").unwrap();
        assert_eq!(found, b);
    }

    #[test]
    fn test_resolve_ambiguous_and_missing() {
        let a = NodeId::from_bytes([0xab; 16]);
        let b = NodeId::from_bytes([0xac; 16]);
        assert!(matches!(
            resolve_node_prefix([a, b].into_iter(), "a"),
            Err(PrefixError::Ambiguous { .. })
        ));
        assert!(matches!(
            resolve_node_prefix([a, b].into_iter(), "ff"),
            Err(PrefixError::NoMatch(_))
        ));
        assert!(matches!(
            resolve_node_prefix([a, b].into_iter(), ""),
            Err(PrefixError::NoMatch(_))
        ));
    }
}
