use crate::error::{JotterError, Result};
use crate::model::Note;
use crate::store::NoteStore;
use tracing::{info, instrument, warn};

/// Fetches the full authoritative collection. There is no delta fetch.
///
/// Every failure comes back as [`JotterError::Fetch`] so callers can tell a
/// failed reload apart from a failed update.
#[instrument(skip_all)]
pub async fn run<S: NoteStore>(store: &S) -> Result<Vec<Note>> {
    match store.list_notes().await {
        Ok(notes) => {
            info!(count = notes.len(), "note collection reloaded");
            Ok(notes)
        }
        Err(err @ JotterError::Fetch { .. }) => {
            warn!(error = %err, "reload failed");
            Err(err)
        }
        Err(other) => {
            warn!(error = %other, "reload failed");
            Err(JotterError::fetch("GET /notes", other.to_string()))
        }
    }
}
