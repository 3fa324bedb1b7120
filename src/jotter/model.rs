use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A note as held by the remote store.
///
/// The client only ever holds a read-through copy; writes go through
/// [`crate::store::NoteStore::update_note`] followed by a full reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(rename = "noteId", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    // Opaque to the client, round-tripped as-is on update
    #[serde(default)]
    pub attachment: Value,
}

impl Note {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: Some(content.into()),
            created_at: Utc::now(),
            attachment: Value::Null,
        }
    }

    pub fn with_attachment(mut self, attachment: Value) -> Self {
        self.attachment = attachment;
        self
    }

    /// Content with absent treated as empty.
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// Body of `PUT /notes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteUpdate {
    pub content: String,
    #[serde(default)]
    pub attachment: Value,
}

/// Transient client-side search input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub term: Option<String>,
    pub replacement: Option<String>,
}

impl SearchState {
    pub fn is_clear(&self) -> bool {
        self.term.is_none() && self.replacement.is_none()
    }

    pub fn clear(&mut self) {
        self.term = None;
        self.replacement = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_store_payload() {
        let raw = json!({
            "noteId": "abc",
            "content": "hello",
            "createdAt": 1_600_000_000_000i64,
            "attachment": "photo.png"
        });
        let note: Note = serde_json::from_value(raw).unwrap();
        assert_eq!(note.id, "abc");
        assert_eq!(note.text(), "hello");
        assert_eq!(note.created_at.timestamp_millis(), 1_600_000_000_000);
        assert_eq!(note.attachment, json!("photo.png"));
    }

    #[test]
    fn missing_content_and_attachment_default() {
        let raw = json!({ "id": "x", "createdAt": 0 });
        let note: Note = serde_json::from_value(raw).unwrap();
        assert_eq!(note.content, None);
        assert_eq!(note.text(), "");
        assert_eq!(note.attachment, Value::Null);
    }

    #[test]
    fn update_body_keeps_attachment_shape() {
        let update = NoteUpdate {
            content: "new".into(),
            attachment: json!({ "key": "k1", "size": 3 }),
        };
        let encoded = serde_json::to_value(&update).unwrap();
        assert_eq!(
            encoded,
            json!({ "content": "new", "attachment": { "key": "k1", "size": 3 } })
        );
    }
}
