use super::NoteStore;
use crate::error::{JotterError, Result};
use crate::model::{Note, NoteUpdate};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Barrier;

/// A request the store has served, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    List,
    Update { id: String, body: NoteUpdate },
}

#[derive(Default)]
struct Inner {
    notes: Vec<Note>,
    calls: Vec<StoreCall>,
    failing_updates: HashSet<String>,
    fail_list: bool,
    update_gate: Option<Arc<Barrier>>,
}

/// In-memory note store for testing and development.
/// Does NOT persist data.
///
/// Clones share the same notes, so a test can keep a handle while the API
/// owns another. The lock is never held across an await point.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Poisoning is ignored.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn insert(&self, note: Note) {
        self.lock().notes.push(note);
    }

    pub fn notes(&self) -> Vec<Note> {
        self.lock().notes.clone()
    }

    pub fn content_of(&self, id: &str) -> Option<String> {
        self.lock()
            .notes
            .iter()
            .find(|n| n.id == id)
            .and_then(|n| n.content.clone())
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, StoreCall::List))
            .count()
    }

    pub fn update_calls(&self) -> Vec<(String, NoteUpdate)> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                StoreCall::Update { id, body } => Some((id.clone(), body.clone())),
                StoreCall::List => None,
            })
            .collect()
    }

    /// Make every update of `id` fail with a server error.
    pub fn fail_updates_for(&self, id: &str) {
        self.lock().failing_updates.insert(id.to_string());
    }

    /// Make `list_notes` fail (or succeed again).
    pub fn set_fail_list(&self, fail: bool) {
        self.lock().fail_list = fail;
    }

    /// Hold every update until `parties` updates are waiting at once.
    ///
    /// A batch of that size only completes if its requests are in flight
    /// together.
    pub fn gate_updates(&self, parties: usize) {
        self.lock().update_gate = Some(Arc::new(Barrier::new(parties)));
    }
}

impl NoteStore for InMemoryStore {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        let mut inner = self.lock();
        inner.calls.push(StoreCall::List);
        if inner.fail_list {
            return Err(JotterError::fetch(
                "GET /notes",
                "503 Service Unavailable (simulated)",
            ));
        }
        Ok(inner.notes.clone())
    }

    async fn update_note(&self, id: &str, update: &NoteUpdate) -> Result<()> {
        let gate = {
            let mut inner = self.lock();
            inner.calls.push(StoreCall::Update {
                id: id.to_string(),
                body: update.clone(),
            });
            inner.update_gate.clone()
        };

        if let Some(gate) = gate {
            gate.wait().await;
        }

        let mut inner = self.lock();
        if inner.failing_updates.contains(id) {
            return Err(JotterError::update(
                id,
                "500 Internal Server Error (simulated)",
            ));
        }
        let note = inner
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| JotterError::update(id, "404 Not Found"))?;
        note.content = Some(update.content.clone());
        note.attachment = update.attachment.clone();
        Ok(())
    }
}

// --- Test Fixtures ---
