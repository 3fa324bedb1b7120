//! # Jotter Architecture
//!
//! Jotter is a client for a remote note store. The store owns the notes; jotter
//! holds a read-through copy, lets you search it, and rewrites a term across
//! every matching note in one confirmed batch.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, renders highlight tokens      │
//! │  - The ONLY place that knows about stdout/stdin/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - JotterApi: sole owner of notes, filtered view,           │
//! │    search input and the in-flight replacement job           │
//! │  - Explicit phase transitions, no ambient mutation          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs) + matcher, highlight         │
//! │  - Filter, replacement batch, reload                        │
//! │  - Pure segmentation and token rendering                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - NoteStore trait: GET /notes, PUT /notes/{id}             │
//! │  - HttpStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One definition of a match
//!
//! [`matcher::segment`] is the only code that looks for the term. Filtering
//! keeps notes with at least one match segment, highlighting marks match
//! segments, and the rewrite sent to the server swaps match segments for the
//! replacement. The three can never disagree.
//!
//! ## Concurrency
//!
//! One logical thread of control. The replacement batch spawns one task per
//! note on a tokio `JoinSet` and waits for all of them; state is only touched
//! by the API between awaits, so no locks guard it.
//!
//! ## Module Overview
//!
//! - [`api`]: state container and transitions
//! - [`commands`]: filter, replacement batch, reload
//! - [`matcher`]: literal segmentation
//! - [`highlight`]: display tokens, line blocks, first-line summary
//! - [`store`]: storage abstraction and implementations
//! - [`model`]: `Note`, `NoteUpdate`, `SearchState`
//! - [`config`]: configuration file and overrides
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod highlight;
pub mod matcher;
pub mod model;
pub mod store;
