//! Headsmith: a player-head skin editor with branching undo.
//!
//! Ties the skin canvas (`headsmith-texture`) to the history tree
//! (`headsmith-history`):
//!
//! - [`EditorSession`]: tools, strokes, undo/redo/jump/prune, import/export
//! - [`Surface`]: how a canvas becomes a checkpoint and back
//! - [`script`]: line-oriented edit scripts for replaying sessions
//! - [`render_timeline`]: the history as an ASCII tree
//! - [`EditorConfig`]: RON configuration

pub mod config;
pub mod error;
pub mod lookup;
pub mod render;
pub mod script;
pub mod session;
pub mod surface;

pub use config::EditorConfig;
pub use error::{ConfigError, EditorError, ScriptError};
pub use lookup::{NoLookup, SkinDirectory, SkinLookup};
pub use render::render_timeline;
pub use session::{EditorSession, Tool, give_command};
pub use surface::Surface;

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, EditorError>;
