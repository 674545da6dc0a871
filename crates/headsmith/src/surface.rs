//! The seam between the history tree and whatever is being edited.

use headsmith_texture::{SkinCanvas, TextureError};
use headsmith_types::{Preview, Snapshot};

/// An editable surface whose state can be checkpointed into the history.
///
/// `capture` must be deterministic: capturing an unchanged surface twice
/// yields equal snapshots, which is how no-op strokes are skipped.
pub trait Surface {
    type Error;

    /// Serialize the current state plus a small preview of it.
    fn capture(&self) -> Result<(Snapshot, Preview), Self::Error>;

    /// Replace the current state with a previously captured snapshot.
    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error>;
}

impl Surface for SkinCanvas {
    type Error = TextureError;

    fn capture(&self) -> Result<(Snapshot, Preview), TextureError> {
        let snapshot = Snapshot::new(self.to_data_uri()?);
        let preview = Preview::new(self.head_preview_data_uri()?);
        Ok((snapshot, preview))
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), TextureError> {
        *self = SkinCanvas::from_data_uri(snapshot.as_str())?;
        Ok(())
    }
}
