use thiserror::Error;

/// One note that could not be rewritten during a replacement batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateFailure {
    pub note_id: String,
    pub message: String,
}

impl std::fmt::Display for UpdateFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.note_id, self.message)
    }
}

#[derive(Error, Debug)]
pub enum JotterError {
    #[error("{operation} failed: {message}")]
    Fetch {
        operation: &'static str,
        message: String,
    },

    #[error("Update of note {note_id} failed: {message}")]
    Update { note_id: String, message: String },

    #[error(
        "Replacement finished with {} failed note(s) ({} updated): {}",
        .failures.len(),
        .succeeded,
        format_failures(.failures)
    )]
    PartialReplacement {
        failures: Vec<UpdateFailure>,
        succeeded: usize,
    },

    #[error(
        "Reload after replacement failed ({}); {} note(s) were not updated: {}",
        .source,
        .failures.len(),
        format_failures(.failures)
    )]
    ReloadAfterBatch {
        failures: Vec<UpdateFailure>,
        succeeded: usize,
        source: Box<JotterError>,
    },

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl JotterError {
    pub fn fetch(operation: &'static str, message: impl Into<String>) -> Self {
        JotterError::Fetch {
            operation,
            message: message.into(),
        }
    }

    pub fn update(note_id: impl Into<String>, message: impl Into<String>) -> Self {
        JotterError::Update {
            note_id: note_id.into(),
            message: message.into(),
        }
    }

    /// The note this error is about, if any.
    pub fn note_id(&self) -> Option<&str> {
        match self {
            JotterError::Update { note_id, .. } => Some(note_id),
            _ => None,
        }
    }

    /// Per-note failures of a settled replacement batch, with the number of
    /// notes that were updated.
    pub fn batch_failures(&self) -> Option<(&[UpdateFailure], usize)> {
        match self {
            JotterError::PartialReplacement {
                failures,
                succeeded,
            }
            | JotterError::ReloadAfterBatch {
                failures,
                succeeded,
                ..
            } => Some((failures, *succeeded)),
            _ => None,
        }
    }
}

fn format_failures(failures: &[UpdateFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, JotterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_error_names_the_note() {
        let err = JotterError::update("n-42", "500 Internal Server Error");
        assert_eq!(err.note_id(), Some("n-42"));
        assert_eq!(
            err.to_string(),
            "Update of note n-42 failed: 500 Internal Server Error"
        );
    }

    #[test]
    fn partial_replacement_lists_every_failure() {
        let err = JotterError::PartialReplacement {
            failures: vec![
                UpdateFailure {
                    note_id: "a".into(),
                    message: "boom".into(),
                },
                UpdateFailure {
                    note_id: "b".into(),
                    message: "gone".into(),
                },
            ],
            succeeded: 3,
        };
        assert_eq!(
            err.to_string(),
            "Replacement finished with 2 failed note(s) (3 updated): a: boom; b: gone"
        );
    }

    #[test]
    fn reload_after_batch_keeps_failures_and_cause() {
        let err = JotterError::ReloadAfterBatch {
            failures: vec![UpdateFailure {
                note_id: "n2".into(),
                message: "500".into(),
            }],
            succeeded: 1,
            source: Box::new(JotterError::fetch("GET /notes", "503")),
        };
        assert_eq!(
            err.to_string(),
            "Reload after replacement failed (GET /notes failed: 503); 1 note(s) were not updated: n2: 500"
        );
        assert!(std::error::Error::source(&err).is_some());

        let (failures, succeeded) = err.batch_failures().unwrap();
        assert_eq!(failures[0].note_id, "n2");
        assert_eq!(succeeded, 1);
        assert!(JotterError::Validation("x".into()).batch_failures().is_none());
    }
}
