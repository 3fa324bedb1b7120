//! # Matcher
//!
//! Splits a text into an ordered run of [`Segment`]s, each either a literal
//! occurrence of the search term or the text between occurrences.
//!
//! Rules:
//! 1. Matching is literal and case-sensitive. No trimming, no regex.
//! 2. The scan is leftmost-first and non-overlapping: after a match the scan
//!    resumes right after it, so `"aa"` in `"aaa"` matches once.
//! 3. Non-match fragments are kept as-is, including the empty fragments
//!    before, between and after adjacent matches. Concatenating every
//!    segment's value always gives back the input.
//! 4. An empty or absent term (or an empty text) yields exactly one
//!    non-match segment holding the whole text.
//!
//! Filtering, highlighting and the rewrite used by bulk replace all go
//! through [`segment`], so they agree on what a match is.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub value: String,
    pub is_match: bool,
}

impl Segment {
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_match: false,
        }
    }

    pub fn matched(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_match: true,
        }
    }
}

pub fn segment(text: &str, term: Option<&str>) -> Vec<Segment> {
    let term = match term {
        Some(t) if !t.is_empty() && !text.is_empty() => t,
        _ => return vec![Segment::plain(text)],
    };

    let mut segments = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find(term) {
        segments.push(Segment::plain(&rest[..pos]));
        segments.push(Segment::matched(term));
        rest = &rest[pos + term.len()..];
    }
    segments.push(Segment::plain(rest));
    segments
}

pub fn count_matches(text: &str, term: Option<&str>) -> usize {
    segment(text, term).iter().filter(|s| s.is_match).count()
}

pub fn contains(text: &str, term: &str) -> bool {
    count_matches(text, Some(term)) > 0
}

/// Rewrites every occurrence of `term` in `text` with `replacement`.
///
/// `replacement` is inserted verbatim; an empty replacement deletes the
/// matches rather than leaving any filler behind.
pub fn replace_all(text: &str, term: &str, replacement: &str) -> String {
    segment(text, Some(term))
        .iter()
        .map(|s| if s.is_match { replacement } else { s.value.as_str() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.value.as_str()).collect()
    }

    fn matches(segments: &[Segment]) -> usize {
        segments.iter().filter(|s| s.is_match).count()
    }

    #[test]
    fn empty_or_absent_term_is_one_plain_segment() {
        for term in [None, Some("")] {
            let segs = segment("some text", term);
            assert_eq!(segs, vec![Segment::plain("some text")]);
        }
    }

    #[test]
    fn empty_text_is_one_empty_segment() {
        assert_eq!(segment("", Some("x")), vec![Segment::plain("")]);
    }

    #[test]
    fn interleaves_matches_and_gaps() {
        let segs = segment("hello world", Some("o"));
        assert_eq!(
            segs,
            vec![
                Segment::plain("hell"),
                Segment::matched("o"),
                Segment::plain(" w"),
                Segment::matched("o"),
                Segment::plain("rld"),
            ]
        );
    }

    #[test]
    fn keeps_empty_fragments_between_adjacent_matches() {
        let segs = segment("xx", Some("x"));
        assert_eq!(
            segs,
            vec![
                Segment::plain(""),
                Segment::matched("x"),
                Segment::plain(""),
                Segment::matched("x"),
                Segment::plain(""),
            ]
        );
    }

    #[test]
    fn scan_is_non_overlapping() {
        assert_eq!(count_matches("aaa", Some("aa")), 1);
        assert_eq!(count_matches("aaaa", Some("aa")), 2);
        assert_eq!(joined(&segment("aaa", Some("aa"))), "aaa");
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(count_matches("Cat cat CAT", Some("cat")), 1);
    }

    #[test]
    fn no_match_leaves_text_whole() {
        let segs = segment("nothing here", Some("zzz"));
        assert_eq!(segs, vec![Segment::plain("nothing here")]);
    }

    #[test]
    fn segments_reconstruct_input() {
        let cases = [
            ("", "a"),
            ("abc", "abc"),
            ("abcabc", "bc"),
            ("line one\nline two\n", "line"),
            ("ünïcödé ünï", "ünï"),
            ("  padded  ", " "),
            ("banana", "ana"),
        ];
        for (text, term) in cases {
            let segs = segment(text, Some(term));
            assert_eq!(joined(&segs), text, "term {:?}", term);
            assert_eq!(matches(&segs), text.matches(term).count(), "term {:?}", term);
        }
    }

    #[test]
    fn replace_all_rewrites_every_occurrence() {
        assert_eq!(replace_all("cat cat dog", "cat", "dog"), "dog dog dog");
        assert_eq!(count_matches("dog dog dog", Some("cat")), 0);
    }

    #[test]
    fn replace_with_empty_removes_matches() {
        assert_eq!(replace_all("axbxc", "x", ""), "abc");
    }

    #[test]
    fn replace_all_agrees_with_str_replace() {
        for (text, term, rep) in [("aaaa", "aa", "b"), ("a.b.c", ".", "::"), ("xyz", "q", "r")] {
            assert_eq!(replace_all(text, term, rep), text.replace(term, rep));
        }
    }
}
