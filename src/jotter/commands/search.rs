use crate::matcher;
use crate::model::Note;

/// Keeps the notes whose content contains `term`, preserving server order.
///
/// An absent or empty term keeps everything. Absent content counts as empty.
pub fn filter(notes: &[Note], term: Option<&str>) -> Vec<Note> {
    match term {
        Some(term) if !term.is_empty() => notes
            .iter()
            .filter(|note| matcher::contains(note.text(), term))
            .cloned()
            .collect(),
        _ => notes.to_vec(),
    }
}

/// Total number of occurrences of `term` across `notes`.
pub fn total_matches(notes: &[Note], term: &str) -> usize {
    notes
        .iter()
        .map(|note| matcher::count_matches(note.text(), Some(term)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes(contents: &[&str]) -> Vec<Note> {
        contents
            .iter()
            .enumerate()
            .map(|(i, c)| Note::new(format!("n{}", i + 1), *c))
            .collect()
    }

    fn ids(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn absent_term_keeps_everything() {
        let all = notes(&["foo", "foobar", "baz"]);
        assert_eq!(filter(&all, None), all);
        assert_eq!(filter(&all, Some("")), all);
    }

    #[test]
    fn keeps_only_containing_notes() {
        let all = notes(&["foo", "foobar", "baz"]);
        assert_eq!(ids(&filter(&all, Some("bar"))), vec!["n2"]);
    }

    #[test]
    fn single_match_among_three() {
        let all = notes(&["abc", "xyz", "ab"]);
        let kept = filter(&all, Some("x"));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text(), "xyz");
    }

    #[test]
    fn preserves_server_order() {
        let all = notes(&["cat 3", "dog", "cat 1", "cat 2"]);
        assert_eq!(ids(&filter(&all, Some("cat"))), vec!["n1", "n3", "n4"]);
    }

    #[test]
    fn is_case_sensitive_and_untrimmed() {
        let all = notes(&["Cat", "cat", " cat "]);
        assert_eq!(ids(&filter(&all, Some("cat"))), vec!["n2", "n3"]);
        assert_eq!(ids(&filter(&all, Some(" cat "))), vec!["n3"]);
    }

    #[test]
    fn absent_content_never_matches() {
        let mut all = notes(&["x"]);
        all[0].content = None;
        assert!(filter(&all, Some("x")).is_empty());
        assert_eq!(filter(&all, None).len(), 1);
    }

    #[test]
    fn counts_occurrences_across_notes() {
        let all = notes(&["a a", "b", "aaa"]);
        assert_eq!(total_matches(&all, "a"), 5);
        assert_eq!(total_matches(&all, "aa"), 1);
    }
}
