//! Opaque checkpoint payloads.
//!
//! The history core never looks inside a snapshot or preview. Both are
//! immutable shared strings (typically PNG data URIs) so a node can hand out
//! clones to renderers without copying the encoded image.
//!
//! `Snapshot` carries a blake3 digest computed once at construction. Equality
//! checks the digest before the bytes, which keeps the "did anything change?"
//! test cheap for the common case where the canvas did change.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Full encoded canvas state at one checkpoint.
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Snapshot {
    data: Arc<str>,
    digest: blake3::Hash,
}

impl Snapshot {
    pub fn new(data: impl Into<Arc<str>>) -> Self {
        let data: Arc<str> = data.into();
        let digest = blake3::hash(data.as_bytes());
        Self { data, digest }
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Content digest of the encoded snapshot.
    pub fn digest(&self) -> &blake3::Hash {
        &self.digest
    }

    /// Encoded length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.digest == other.digest && self.data == other.data
    }
}

impl Eq for Snapshot {}

impl From<String> for Snapshot {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Snapshot {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<Snapshot> for String {
    fn from(s: Snapshot) -> String {
        s.data.to_string()
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Snapshot({} bytes, {})", self.data.len(), &self.digest.to_hex().as_str()[..8])
    }
}

/// Small encoded thumbnail of a checkpoint. Never inspected by the core.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Preview(Arc<str>);

impl Preview {
    pub fn new(data: impl Into<Arc<str>>) -> Self {
        Self(data.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Preview {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Preview {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<Preview> for String {
    fn from(p: Preview) -> String {
        p.0.to_string()
    }
}

impl fmt::Debug for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Preview({} bytes)", self.0.len())
    }
}
