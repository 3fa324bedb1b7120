//! # Highlight Rendering
//!
//! Turns [`Segment`]s into display tokens. This layer decides *what* gets
//! emphasized; the CLI decides *how* (see `cli/styles.rs`).
//!
//! - Non-match segments become [`Token::Text`], verbatim.
//! - Match segments become [`Token::Highlight`] when no replacement is staged.
//! - With a staged replacement, a match becomes [`Token::Strike`] followed by a
//!   [`Token::Highlight`] carrying the replacement. Nothing is mutated; this is
//!   a preview.
//!
//! Multi-line content is rendered as one block per line, in order. A match
//! that spans a line break is struck/highlighted on each line it touches and
//! the replacement preview follows its last piece.

use crate::matcher::{segment, Segment};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Text(String),
    Highlight(String),
    Strike(String),
}

pub type Line = Vec<Token>;

pub fn render(segments: &[Segment], replacement: Option<&str>) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(segments.len());
    for seg in segments {
        if !seg.is_match {
            tokens.push(Token::Text(seg.value.clone()));
            continue;
        }
        match replacement {
            None => tokens.push(Token::Highlight(seg.value.clone())),
            Some(rep) => {
                tokens.push(Token::Strike(seg.value.clone()));
                tokens.push(Token::Highlight(rep.to_string()));
            }
        }
    }
    tokens
}

/// Segments `text` against `term` and lays the tokens out line by line.
pub fn render_lines(text: &str, term: Option<&str>, replacement: Option<&str>) -> Vec<Line> {
    let mut lines: Vec<Line> = vec![Vec::new()];

    for seg in segment(text, term) {
        for (i, piece) in seg.value.split('\n').enumerate() {
            if i > 0 {
                lines.push(Vec::new());
            }
            if piece.is_empty() {
                continue;
            }
            let token = match (seg.is_match, replacement) {
                (false, _) => Token::Text(piece.to_string()),
                (true, None) => Token::Highlight(piece.to_string()),
                (true, Some(_)) => Token::Strike(piece.to_string()),
            };
            if let Some(current) = lines.last_mut() {
                current.push(token);
            }
        }
        if let (true, Some(rep)) = (seg.is_match, replacement) {
            if let Some(current) = lines.last_mut() {
                current.push(Token::Highlight(rep.to_string()));
            }
        }
    }

    lines
}

/// Compact single-line summary for list display: the first line of the
/// trimmed content, with no highlighting.
pub fn first_line(text: &str) -> String {
    text.trim().lines().next().unwrap_or("").trim().to_string()
}
