//! Resolving a player name to a skin.

use std::collections::HashMap;
use std::path::PathBuf;

use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Looks up a player's skin by username.
///
/// Returns the skin as bare base64 PNG data (no `data:` prefix), or `None`
/// when the user is unknown or the lookup failed.
pub trait SkinLookup {
    fn fetch_skin(&self, username: &str) -> Option<String>;
}

/// Knows no users.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl SkinLookup for NoLookup {
    fn fetch_skin(&self, _username: &str) -> Option<String> {
        None
    }
}

/// Fixed username → base64 table.
impl SkinLookup for HashMap<String, String> {
    fn fetch_skin(&self, username: &str) -> Option<String> {
        self.get(username).cloned()
    }
}

/// Skins stored on disk as `<dir>/<username>.png`.
#[derive(Debug, Clone)]
pub struct SkinDirectory {
    dir: PathBuf,
}

impl SkinDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SkinLookup for SkinDirectory {
    fn fetch_skin(&self, username: &str) -> Option<String> {
        // Keep lookups inside the directory
        if username.is_empty() || username.contains(['/', '\\', '.']) {
            tracing::warn!(username, "rejected username with path characters");
            return None;
        }
        let path = self.dir.join(format!("{username}.png"));
        match std::fs::read(&path) {
            Ok(bytes) => Some(STANDARD.encode(bytes)),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skin lookup miss");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_lookup_knows_nobody() {
        assert_eq!(NoLookup.fetch_skin("Notch"), None);
    }

    #[test]
    fn test_skin_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("steve.png"), b"ABC").unwrap();
        let lookup = SkinDirectory::new(dir.path());

        assert_eq!(lookup.fetch_skin("steve").as_deref(), Some("QUJD"));
        assert_eq!(lookup.fetch_skin("alex"), None);
        assert_eq!(lookup.fetch_skin("../steve"), None);
    }
}
