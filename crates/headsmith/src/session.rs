//! The editing session: a skin canvas plus its branching history.
//!
//! Painting happens on a working canvas. A stroke is any number of
//! [`paint`](EditorSession::paint) calls followed by one
//! [`end_stroke`](EditorSession::end_stroke), which checkpoints the canvas
//! into the history tree. Every history move (undo, redo, jump, prune that
//! re-anchors) restores the canvas from the new current node's snapshot.
//!
//! A second "original" canvas holds the last imported skin; the eraser
//! paints from it rather than clearing to transparent.

use std::path::Path;

use headsmith_history::{HistoryTree, NodeId, Pruned};
use headsmith_texture::{CANVAS_SIZE, Color, PNG_DATA_URI_PREFIX, SkinCanvas};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::lookup::SkinLookup;
use crate::surface::Surface;
use crate::Result;

/// Active painting tool.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Tool {
    #[default]
    Brush,
    /// Restores pixels from the original (imported) skin.
    #[strum(to_string = "eraser", serialize = "erase")]
    Eraser,
    /// Takes the colour under the cursor, then switches back to the brush.
    #[strum(to_string = "picker", serialize = "pick")]
    Picker,
}

pub struct EditorSession {
    canvas: SkinCanvas,
    original: SkinCanvas,
    history: HistoryTree,
    tool: Tool,
    brush_color: Color,
    brush_size: u32,
    recent_colors: Vec<Color>,
    recent_limit: usize,
}

impl EditorSession {
    /// Start on the default base skin, with a history holding just that.
    pub fn new(config: &EditorConfig) -> Result<Self> {
        let canvas = SkinCanvas::base_skin();
        let (snapshot, preview) = canvas.capture()?;

        Ok(Self {
            original: canvas.clone(),
            canvas,
            history: HistoryTree::with_root(snapshot, preview),
            tool: config.tool,
            brush_color: config.brush_color,
            brush_size: config.brush_size.clamp(1, CANVAS_SIZE),
            recent_colors: Vec::new(),
            recent_limit: config.recent_colors,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn canvas(&self) -> &SkinCanvas {
        &self.canvas
    }

    /// The last imported skin (the eraser's source).
    pub fn original(&self) -> &SkinCanvas {
        &self.original
    }

    pub fn history(&self) -> &HistoryTree {
        &self.history
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn brush_color(&self) -> Color {
        self.brush_color
    }

    pub fn set_brush_color(&mut self, color: Color) {
        self.brush_color = color;
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    /// Clamped to `1..=CANVAS_SIZE`.
    pub fn set_brush_size(&mut self, size: u32) {
        self.brush_size = size.clamp(1, CANVAS_SIZE);
    }

    /// Recently painted colours, most recent first.
    pub fn recent_colors(&self) -> &[Color] {
        &self.recent_colors
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Apply the active tool at canvas pixel `(x, y)`.
    ///
    /// Returns whether the canvas was touched. The picker never touches the
    /// canvas; on an opaque pixel it adopts that colour and hands over to the
    /// brush.
    pub fn paint(&mut self, x: i32, y: i32) -> bool {
        match self.tool {
            Tool::Brush => {
                let painted = self.canvas.brush(x, y, self.brush_size, self.brush_color);
                if painted {
                    self.remember_color(self.brush_color);
                }
                painted
            }
            Tool::Eraser => self.canvas.erase(x, y, self.brush_size, &self.original),
            Tool::Picker => {
                if let Some(color) = self.canvas.pick(x, y) {
                    tracing::debug!(x, y, color = %color, "picked colour");
                    self.brush_color = color;
                    self.tool = Tool::Brush;
                }
                false
            }
        }
    }

    fn remember_color(&mut self, color: Color) {
        self.recent_colors.retain(|c| *c != color);
        self.recent_colors.insert(0, color);
        self.recent_colors.truncate(self.recent_limit);
    }

    /// Checkpoint the canvas. `None` when nothing changed since the current
    /// node.
    pub fn end_stroke(&mut self) -> Result<Option<NodeId>> {
        let (snapshot, preview) = self.canvas.capture()?;
        Ok(self.history.record_checkpoint(snapshot, preview))
    }

    // =========================================================================
    // History
    // =========================================================================

    pub fn undo(&mut self) -> Result<Option<NodeId>> {
        let moved = self.history.undo();
        if moved.is_some() {
            self.restore_current()?;
        }
        Ok(moved)
    }

    pub fn redo(&mut self) -> Result<Option<NodeId>> {
        let moved = self.history.redo();
        if moved.is_some() {
            self.restore_current()?;
        }
        Ok(moved)
    }

    pub fn jump_to(&mut self, id: NodeId) -> Result<bool> {
        let moved = self.history.jump_to(id);
        if moved {
            self.restore_current()?;
        }
        Ok(moved)
    }

    /// Discard the descendants of `id`. Restores the canvas only when the
    /// viewpoint had to move.
    pub fn prune(&mut self, id: NodeId) -> Result<Option<Pruned>> {
        let pruned = self.history.prune(id);
        if let Some(p) = &pruned {
            tracing::info!(node = %id, removed = p.removed.len(), "pruned history");
            if p.reanchored {
                self.restore_current()?;
            }
        }
        Ok(pruned)
    }

    fn restore_current(&mut self) -> Result<()> {
        let snapshot = self
            .history
            .current()
            .map(|node| node.snapshot().clone())
            .ok_or(EditorError::NoCurrentNode)?;
        self.canvas.restore(&snapshot)?;
        Ok(())
    }

    // =========================================================================
    // Import / export
    // =========================================================================

    /// Import a skin from user input.
    ///
    /// A `data:image` URI is used as is. Other input containing `=` is bare
    /// base64 PNG data. Anything else is taken as a username and resolved
    /// through `lookup`. Resets the history to a new root.
    pub fn import(&mut self, input: &str, lookup: &dyn SkinLookup) -> Result<NodeId> {
        let input = input.trim();
        let uri = if input.starts_with("data:image") {
            input.to_string()
        } else if input.contains('=') {
            format!("{PNG_DATA_URI_PREFIX}{input}")
        } else {
            let Some(fetched) = lookup.fetch_skin(input) else {
                tracing::warn!(username = input, "skin lookup failed");
                return Err(EditorError::UnknownUser(input.to_string()));
            };
            format!("{PNG_DATA_URI_PREFIX}{fetched}")
        };

        self.load_skin(SkinCanvas::from_data_uri(&uri)?)
    }

    /// Import a skin from a PNG file. Resets the history to a new root.
    pub fn import_file(&mut self, path: &Path) -> Result<NodeId> {
        self.load_skin(SkinCanvas::load(path)?)
    }

    /// Replace both the working and original canvas and start a fresh
    /// history rooted at `skin`.
    pub fn load_skin(&mut self, skin: SkinCanvas) -> Result<NodeId> {
        let (snapshot, preview) = skin.capture()?;
        self.original = skin.clone();
        self.canvas = skin;
        let root = self.history.reset_to_new_root(snapshot, preview);
        tracing::info!(root = %root, "loaded new skin");
        Ok(root)
    }

    pub fn export_png(&self, path: &Path) -> Result<()> {
        self.canvas.save(path)?;
        tracing::info!(path = %path.display(), "exported skin");
        Ok(())
    }

    pub fn data_uri(&self) -> Result<String> {
        Ok(self.canvas.to_data_uri()?)
    }

    /// A `/give` command for a player head wearing the current skin.
    pub fn give_command(&self) -> Result<String> {
        Ok(give_command(&self.data_uri()?))
    }
}

/// Build the `/give` command for a skin data URI (or bare base64).
pub fn give_command(data_uri: &str) -> String {
    let b64 = data_uri.split_once(',').map_or(data_uri, |(_, payload)| payload);
    format!(
        "/give @p minecraft:player_head[profile={{properties:[{{name:\"textures\",value:\"{b64}\"}}]}}] 1"
    )
}
