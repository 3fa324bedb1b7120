//! # Storage Layer
//!
//! Notes live in a remote key-value note store. The [`NoteStore`] trait is the
//! only contract the rest of the crate has with it:
//!
//! - `GET /notes` → the full, server-ordered collection ([`NoteStore::list_notes`])
//! - `PUT /notes/{id}` with `{content, attachment}` → one note rewritten
//!   ([`NoteStore::update_note`])
//!
//! Any non-success response is a failure of that single call; the store does
//! not retry. Timeouts belong to the implementation (see [`http::HttpStore`]).
//!
//! ## Implementations
//!
//! - [`http::HttpStore`]: production client over HTTP (reqwest)
//! - [`memory::InMemoryStore`]: in-process store for tests, with failure
//!   injection and a log of every request it served
//!
//! Methods return `Send` futures so the replacement batch can spawn one task
//! per note.

use crate::error::Result;
use crate::model::{Note, NoteUpdate};
use std::future::Future;

pub mod http;
pub mod memory;

pub trait NoteStore: Send + Sync + 'static {
    /// Fetch the whole collection, in server order.
    fn list_notes(&self) -> impl Future<Output = Result<Vec<Note>>> + Send;

    /// Overwrite one note's content and attachment.
    fn update_note(
        &self,
        id: &str,
        update: &NoteUpdate,
    ) -> impl Future<Output = Result<()>> + Send;
}
