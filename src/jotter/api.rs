//! # API Facade
//!
//! [`JotterApi`] is the single owner of client-side state: the loaded note
//! collection, the filtered view, the search/replacement input and the
//! in-flight replacement job. Every change goes through a transition method;
//! nothing else holds a mutable reference to that state.
//!
//! ## Phases
//!
//! ```text
//!            set_search_term(Some)         stage_replacement(Some)
//!   Idle ─────────────────────────▶ Searching ─────────────────────▶ PreviewingReplacement
//!    ▲  ◀───────────────────────── │  ◀──────────────────────────── │
//!    │       set_search_term(None)        cancel_replacement         │ confirm_replacement
//!    │                                                               ▼
//!    └──────────────── Reloading ◀──────────────────────── ReplacingInFlight
//!         reload ok                 batch settled
//! ```
//!
//! A successful reload always lands in `Idle` with the search input cleared.
//! A failed reload returns to whichever phase the search input implies and
//! keeps that input, so the user can retry.
//!
//! ## Partial failures
//!
//! When some updates in a batch fail, the API still reloads, so the local
//! view matches what the server now holds, and then returns
//! [`JotterError::PartialReplacement`] naming each failed note. Running the
//! same replacement again only targets notes that still contain the term.
//!
//! If that reload fails too, the failed notes travel in
//! [`JotterError::ReloadAfterBatch`] and stay on the pending job until a
//! later [`JotterApi::reload`] succeeds and reports them.
//!
//! ## Generic Over NoteStore
//!
//! - Production: `JotterApi<HttpStore>`
//! - Testing: `JotterApi<InMemoryStore>`

use crate::commands::replace::{self, JobState, Progress, ReplacementJob};
use crate::commands::{reload, search};
use crate::error::{JotterError, Result};
use crate::highlight::{self, Line};
use crate::model::{Note, SearchState};
use crate::store::NoteStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

pub use crate::commands::replace::{BatchReport, NoteOutcome};
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Searching,
    PreviewingReplacement,
    ReplacingInFlight,
    Reloading,
}

/// How one note is shown in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteBody {
    /// No term active: first line only, no highlighting.
    Summary(String),
    /// Term active: every line, with matches marked.
    Lines(Vec<Line>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteView {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub body: NoteBody,
}

pub struct JotterApi<S: NoteStore> {
    store: Arc<S>,
    notes: Vec<Note>,
    filtered: Vec<Note>,
    search: SearchState,
    job: Option<ReplacementJob>,
    phase: Phase,
}

impl<S: NoteStore> JotterApi<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            notes: Vec::new(),
            filtered: Vec::new(),
            search: SearchState::default(),
            job: None,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn filtered(&self) -> &[Note] {
        &self.filtered
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    /// A job whose batch has run but whose follow-up reload has not yet succeeded.
    pub fn pending_job(&self) -> Option<&ReplacementJob> {
        self.job.as_ref()
    }

    /// Initial fetch. Same semantics as [`reload`](Self::reload).
    pub async fn load(&mut self) -> Result<()> {
        self.reload().await
    }

    /// Replaces the collection with a fresh fetch and resets all derived state.
    ///
    /// On failure the previous collection, filtered view and search input are
    /// left exactly as they were. If a replacement job is pending and its
    /// batch had failed notes, the error is `ReloadAfterBatch` carrying them.
    ///
    /// A successful reload retires the pending job. When that job's batch had
    /// failed notes, the state is reconciled and the failures are then
    /// returned as `PartialReplacement`, so they are reported exactly once.
    pub async fn reload(&mut self) -> Result<()> {
        self.phase = Phase::Reloading;
        match reload::run(self.store.as_ref()).await {
            Ok(notes) => {
                self.filtered = notes.clone();
                self.notes = notes;
                self.search.clear();
                self.phase = Phase::Idle;
                if let Some(mut job) = self.job.take() {
                    job.mark_done();
                    debug!(completed = job.completed(), "replacement job retired");
                    if let Some(err) = job.report().and_then(BatchReport::failure_error) {
                        return Err(err);
                    }
                }
                Ok(())
            }
            Err(err) => {
                self.phase = self.resting_phase();
                match self.job.as_ref().and_then(|job| job.report()) {
                    Some(report) if !report.all_succeeded() => {
                        Err(JotterError::ReloadAfterBatch {
                            failures: report.failures(),
                            succeeded: report.succeeded(),
                            source: Box::new(err),
                        })
                    }
                    _ => Err(err),
                }
            }
        }
    }

    /// Sets or clears the search term and recomputes the filtered view.
    ///
    /// An empty term counts as no term. Clearing the term also drops any
    /// staged replacement.
    pub fn set_search_term(&mut self, term: Option<String>) {
        let term = term.filter(|t| !t.is_empty());
        if term.is_none() {
            self.search.replacement = None;
        }
        self.search.term = term;
        self.refilter();
        self.phase = self.resting_phase();
        debug!(term = ?self.search.term, visible = self.filtered.len(), "search updated");
    }

    /// Stages a replacement for preview. `Some("")` is a valid staged
    /// replacement (delete the term); `None` un-stages.
    pub fn stage_replacement(&mut self, replacement: Option<String>) -> Result<()> {
        if replacement.is_some() && self.search.term.is_none() {
            return Err(JotterError::Validation(
                "enter a search term before staging a replacement".into(),
            ));
        }
        self.search.replacement = replacement;
        self.phase = self.resting_phase();
        Ok(())
    }

    /// Drops the staged replacement. Only possible before confirmation; a
    /// confirmed batch always runs to completion.
    pub fn cancel_replacement(&mut self) {
        self.search.replacement = None;
        self.phase = self.resting_phase();
    }

    /// Rewrites the term across the current filtered view, then reloads.
    ///
    /// Validation errors are raised before any request is sent. `on_progress`
    /// is called after every successful update.
    pub async fn confirm_replacement<F>(&mut self, on_progress: F) -> Result<CmdResult>
    where
        F: FnMut(Progress),
    {
        if self.job.is_some() {
            return Err(JotterError::Validation(
                "the previous replacement has not been reconciled yet; reload first".into(),
            ));
        }
        let term = self
            .search
            .term
            .clone()
            .ok_or_else(|| JotterError::Validation("no search term entered".into()))?;
        let replacement = self
            .search
            .replacement
            .clone()
            .ok_or_else(|| JotterError::Validation("no replacement staged".into()))?;

        let mut job = ReplacementJob::new(self.filtered.clone(), term, replacement)?;
        info!(
            targets = job.total(),
            term = job.term(),
            replacement = job.replacement(),
            "replacement confirmed"
        );

        self.phase = Phase::ReplacingInFlight;
        let report = replace::run(&self.store, &mut job, on_progress).await;
        let report = match report {
            Ok(report) => report,
            Err(err) => {
                self.phase = self.resting_phase();
                return Err(err);
            }
        };
        self.job = Some(job);

        // Surfaces the batch's failed notes whether or not the reload succeeds.
        self.reload().await?;

        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success(format!(
            "Replaced in {} note{}",
            report.succeeded(),
            if report.succeeded() == 1 { "" } else { "s" }
        )));
        Ok(result.with_report(report))
    }

    /// Display projection of the filtered view.
    pub fn note_views(&self) -> Vec<NoteView> {
        let term = self.search.term.as_deref();
        let replacement = self.search.replacement.as_deref();

        self.filtered
            .iter()
            .map(|note| {
                let body = match term {
                    None => NoteBody::Summary(highlight::first_line(note.text())),
                    Some(_) => NoteBody::Lines(highlight::render_lines(
                        note.text(),
                        term,
                        replacement,
                    )),
                };
                NoteView {
                    id: note.id.clone(),
                    created_at: note.created_at,
                    body,
                }
            })
            .collect()
    }

    /// Occurrences of the active term across the filtered view.
    pub fn match_count(&self) -> usize {
        self.search
            .term
            .as_deref()
            .map(|term| search::total_matches(&self.filtered, term))
            .unwrap_or(0)
    }

    pub fn job_state(&self) -> Option<JobState> {
        self.job.as_ref().map(|j| j.state())
    }

    fn refilter(&mut self) {
        self.filtered = search::filter(&self.notes, self.search.term.as_deref());
    }

    fn resting_phase(&self) -> Phase {
        match (&self.search.term, &self.search.replacement) {
            (Some(_), Some(_)) => Phase::PreviewingReplacement,
            (Some(_), None) => Phase::Searching,
            _ => Phase::Idle,
        }
    }
}
