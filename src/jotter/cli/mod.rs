//! # CLI Behavior
//!
//! This is **one possible UI client** for jotter, not the application itself.
//!
//! ### Naked Execution (`jotter`)
//!
//! Running `jotter` with no arguments lists every note by its first line.
//!
//! ### Search (`jotter search <term>`, `jotter list --search <term>`)
//!
//! Shows only the notes containing the term, every line of each, with the
//! matches highlighted.
//!
//! ### Replace (`jotter replace <term> <replacement>`)
//!
//! 1. Shows the preview: each match struck through, the replacement beside it.
//! 2. Asks for confirmation (skip with `--yes`). Declining changes nothing.
//! 3. Sends every update at once, printing progress as each one lands.
//! 4. Reloads the notes from the server. Any failed notes are reported and the
//!    command exits non-zero; rerunning it only touches what is left.
//!
//! ## Module Structure
//!
//! - `commands`: dispatch and per-command handlers
//! - `render`: note list and highlight token rendering
//! - `print`: messages and progress lines
//! - `setup`: argument parsing via clap
//! - `styles`: terminal styles

mod commands;
mod print;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
