//! Error types for the editor session, script replay and configuration.

use std::path::PathBuf;

use headsmith_texture::TextureError;
use headsmith_types::PrefixError;
use thiserror::Error;

/// Errors from editor session operations.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("texture error: {0}")]
    Texture(#[from] TextureError),

    /// Username lookup found no skin.
    #[error("could not find user '{0}'")]
    UnknownUser(String),

    /// The tree has no current node to restore from.
    #[error("history has no current node")]
    NoCurrentNode,
}

/// Errors from loading an [`EditorConfig`](crate::EditorConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("RON serialize error: {0}")]
    Serialize(#[from] ron::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors from parsing or running an edit script. Every variant tied to a
/// script line carries its 1-based line number.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: {source}")]
    Editor {
        line: usize,
        #[source]
        source: EditorError,
    },

    #[error("line {line}: no timeline row {index} (tree has {rows} rows)")]
    NoSuchRow { line: usize, index: usize, rows: usize },

    #[error("line {line}: {source}")]
    Node {
        line: usize,
        #[source]
        source: PrefixError,
    },

    #[error("failed to read script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
