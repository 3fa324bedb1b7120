//! # Rendering Module
//!
//! Turns [`NoteView`]s into terminal text. Which parts of a note are marked
//! is decided by the library's highlight tokens; this module only decides
//! how a token looks.
//!
//! With color, matches are painted and removed text is struck through. When
//! colors are off (pipes, `NO_COLOR`), markers stand in: `**match**` and
//! `~~removed~~`.

use super::styles::{INDEX, MATCH, REMOVED, TIME};
use chrono::{DateTime, Utc};
use jotter::api::{NoteBody, NoteView};
use jotter::highlight::Token;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
const BODY_INDENT: &str = "      ";

pub fn render_note_list(views: &[NoteView], use_color: bool) -> String {
    render_note_list_at(views, use_color, Utc::now())
}

fn render_note_list_at(views: &[NoteView], use_color: bool, now: DateTime<Utc>) -> String {
    if views.is_empty() {
        return "No notes found.\n".to_string();
    }

    let mut out = String::new();
    for (i, view) in views.iter().enumerate() {
        let idx = format!("{:>3}. ", i + 1);
        let time = format_time_ago(view.created_at, now);
        let available = LINE_WIDTH.saturating_sub(idx.width() + TIME_WIDTH);

        let headline = match &view.body {
            NoteBody::Summary(line) => truncate_to_width(line, available),
            NoteBody::Lines(_) => truncate_to_width(&view.id, available),
        };
        let padding = " ".repeat(available.saturating_sub(headline.width()));

        out.push_str(&paint(&INDEX, &idx, use_color));
        out.push_str(&headline);
        out.push_str(&padding);
        out.push_str(&paint(&TIME, &time, use_color));
        out.push('\n');

        if let NoteBody::Lines(lines) = &view.body {
            for line in lines {
                out.push_str(BODY_INDENT);
                out.push_str(&render_tokens(line, use_color));
                out.push('\n');
            }
        }
    }
    out
}

pub fn render_tokens(tokens: &[Token], use_color: bool) -> String {
    tokens
        .iter()
        .map(|token| match token {
            Token::Text(s) => s.clone(),
            Token::Highlight(s) if use_color => paint(&MATCH, s, true),
            Token::Highlight(s) => format!("**{}**", s),
            Token::Strike(s) if use_color => paint(&REMOVED, s, true),
            Token::Strike(s) => format!("~~{}~~", s),
        })
        .collect()
}

fn paint(style: &console::Style, text: &str, use_color: bool) -> String {
    if use_color {
        style.apply_to(text).force_styling(true).to_string()
    } else {
        text.to_string()
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn view(id: &str, body: NoteBody, created_at: DateTime<Utc>) -> NoteView {
        NoteView {
            id: id.into(),
            created_at,
            body,
        }
    }

    #[test]
    fn empty_list_message() {
        assert_eq!(render_note_list(&[], false), "No notes found.\n");
    }

    #[test]
    fn plain_markers_without_color() {
        let tokens = vec![
            Token::Text("a ".into()),
            Token::Strike("cat".into()),
            Token::Highlight("dog".into()),
        ];
        assert_eq!(render_tokens(&tokens, false), "a ~~cat~~**dog**");
    }

    #[test]
    fn colored_tokens_carry_escape_codes() {
        let out = render_tokens(&[Token::Highlight("cat".into())], true);
        assert!(out.contains("cat"));
        assert!(out.contains('\u{1b}'));
    }

    #[test]
    fn summary_rows_are_fixed_width() {
        let now = Utc::now();
        let views = vec![
            view("n1", NoteBody::Summary("Groceries".into()), now - Duration::hours(2)),
            view("n2", NoteBody::Summary("Ideas".into()), now - Duration::days(3)),
        ];
        let out = render_note_list_at(&views, false, now);
        let rows: Vec<_> = out.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("  1. Groceries"));
        assert!(rows[0].ends_with("2 hours ago"));
        assert!(rows[1].starts_with("  2. Ideas"));
        assert!(rows.iter().all(|r| r.width() == LINE_WIDTH));
    }

    #[test]
    fn highlighted_notes_list_each_line() {
        let now = Utc::now();
        let views = vec![view(
            "n7",
            NoteBody::Lines(vec![
                vec![Token::Text("title".into())],
                vec![Token::Text("buy ".into()), Token::Highlight("cat".into())],
            ]),
            now,
        )];
        let out = render_note_list_at(&views, false, now);
        let rows: Vec<_> = out.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("  1. n7"));
        assert_eq!(rows[1], "      title");
        assert_eq!(rows[2], "      buy **cat**");
    }

    #[test]
    fn long_summaries_are_truncated() {
        let long = "x".repeat(200);
        let truncated = truncate_to_width(&long, 10);
        assert_eq!(truncated.width(), 10);
        assert!(truncated.ends_with('…'));
    }
}
