//! # Replacement Batch
//!
//! A confirmed replacement becomes a [`ReplacementJob`]: a snapshot of the
//! filtered notes taken at confirmation time, plus the term and replacement.
//! The snapshot is never re-filtered while the batch runs.
//!
//! [`run`] issues one `update_note` per target, all in flight together on a
//! [`JoinSet`]. It waits for **every** request to settle: one failed update
//! does not cancel or skip its siblings. Each outcome is recorded per note in
//! a [`BatchReport`], and the caller decides what a mixed result means (the
//! API reloads either way, then reports the failures).
//!
//! Progress is reported through a callback after each successful update, so
//! an observer sees every value from 1 up to the number of successes. The
//! counter reaches the target count only if every update succeeded.
//!
//! The replacement text is used verbatim. An empty replacement deletes the
//! term; it is never padded or substituted.

use crate::error::{JotterError, Result, UpdateFailure};
use crate::matcher;
use crate::model::{Note, NoteUpdate};
use crate::store::NoteStore;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    NotStarted,
    InProgress,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct ReplacementJob {
    target_notes: Vec<Note>,
    term: String,
    replacement: String,
    completed: usize,
    state: JobState,
    report: Option<BatchReport>,
}

impl ReplacementJob {
    pub fn new(
        target_notes: Vec<Note>,
        term: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Result<Self> {
        let term = term.into();
        if term.is_empty() {
            return Err(JotterError::Validation(
                "search term must not be empty".into(),
            ));
        }
        if target_notes.is_empty() {
            return Err(JotterError::Validation(format!(
                "no notes contain {:?}, nothing to replace",
                term
            )));
        }

        Ok(Self {
            target_notes,
            term,
            replacement: replacement.into(),
            completed: 0,
            state: JobState::NotStarted,
            report: None,
        })
    }

    pub fn target_notes(&self) -> &[Note] {
        &self.target_notes
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.target_notes.len()
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// Outcome of the batch, once it has settled.
    pub fn report(&self) -> Option<&BatchReport> {
        self.report.as_ref()
    }

    /// The `PUT` body for one target: every occurrence rewritten, attachment untouched.
    pub fn update_for(&self, note: &Note) -> NoteUpdate {
        NoteUpdate {
            content: matcher::replace_all(note.text(), &self.term, &self.replacement),
            attachment: note.attachment.clone(),
        }
    }

    pub(crate) fn mark_done(&mut self) {
        self.state = JobState::Done;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteOutcome {
    Updated(String),
    Failed(UpdateFailure),
}

/// Per-note results of one batch, in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub total: usize,
    pub outcomes: Vec<NoteOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, NoteOutcome::Updated(_)))
            .count()
    }

    pub fn failures(&self) -> Vec<UpdateFailure> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                NoteOutcome::Failed(f) => Some(f.clone()),
                NoteOutcome::Updated(_) => None,
            })
            .collect()
    }

    pub fn all_succeeded(&self) -> bool {
        self.succeeded() == self.total
    }

    /// `PartialReplacement` naming every failed note, or `None` if all succeeded.
    pub fn failure_error(&self) -> Option<JotterError> {
        if self.all_succeeded() {
            return None;
        }
        Some(JotterError::PartialReplacement {
            failures: self.failures(),
            succeeded: self.succeeded(),
        })
    }
}

fn failure_message(err: JotterError) -> String {
    match err {
        JotterError::Update { message, .. } => message,
        other => other.to_string(),
    }
}

/// Runs the batch to completion. Must be called from inside a tokio runtime.
///
/// Returns `Err` only if the job was already started; per-note failures are
/// in the report.
#[instrument(skip_all, fields(term = %job.term, targets = job.target_notes.len()))]
pub async fn run<S, F>(
    store: &Arc<S>,
    job: &mut ReplacementJob,
    mut on_progress: F,
) -> Result<BatchReport>
where
    S: NoteStore,
    F: FnMut(Progress),
{
    if job.state != JobState::NotStarted {
        return Err(JotterError::Validation(
            "replacement job has already been started".into(),
        ));
    }
    job.state = JobState::InProgress;

    let total = job.total();
    info!("issuing {} note updates", total);

    let mut tasks = JoinSet::new();
    for note in &job.target_notes {
        let store = Arc::clone(store);
        let id = note.id.clone();
        let body = job.update_for(note);
        tasks.spawn(async move {
            let result = store.update_note(&id, &body).await;
            (id, result)
        });
    }

    let mut pending: HashSet<String> = job.target_notes.iter().map(|n| n.id.clone()).collect();
    let mut report = BatchReport {
        total,
        outcomes: Vec::with_capacity(total),
    };

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((id, Ok(()))) => {
                pending.remove(&id);
                job.completed += 1;
                debug!(note_id = %id, completed = job.completed, total, "note rewritten");
                on_progress(Progress {
                    completed: job.completed,
                    total,
                });
                report.outcomes.push(NoteOutcome::Updated(id));
            }
            Ok((id, Err(err))) => {
                pending.remove(&id);
                warn!(note_id = %id, error = %err, "note update failed");
                report.outcomes.push(NoteOutcome::Failed(UpdateFailure {
                    note_id: id,
                    message: failure_message(err),
                }));
            }
            Err(join_err) => {
                warn!(error = %join_err, "update task did not finish");
            }
        }
    }

    // A task that panicked never hands back its id.
    for note in &job.target_notes {
        if pending.contains(&note.id) {
            report.outcomes.push(NoteOutcome::Failed(UpdateFailure {
                note_id: note.id.clone(),
                message: "update task aborted".into(),
            }));
        }
    }

    info!(
        succeeded = report.succeeded(),
        failed = total - report.succeeded(),
        "replacement batch settled"
    );
    job.report = Some(report.clone());
    Ok(report)
}
