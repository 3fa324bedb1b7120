use super::NoteStore;
use crate::config::JotterConfig;
use crate::error::{JotterError, Result};
use crate::model::{Note, NoteUpdate};
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// REST client for the remote note store.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
    base: Url,
}

impl HttpStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .map_err(|e| JotterError::Config(format!("invalid api_url {:?}: {}", base_url, e)))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(JotterError::Config(format!(
                "api_url must be an http(s) URL, got {:?}",
                base_url
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            base,
        })
    }

    pub fn from_config(config: &JotterConfig) -> Result<Self> {
        Self::new(&config.api_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn notes_url(&self) -> Url {
        self.endpoint(&["notes"])
    }

    /// The id is one percent-encoded path segment, whatever it contains.
    fn note_url(&self, id: &str) -> Url {
        self.endpoint(&["notes", id])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // `new` only accepts URLs that can carry a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn status_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        status.to_string()
    } else {
        format!("{} ({})", status, body)
    }
}

impl NoteStore for HttpStore {
    #[instrument(skip(self), fields(url = %self.notes_url()))]
    async fn list_notes(&self) -> Result<Vec<Note>> {
        const OP: &str = "GET /notes";

        let response = self
            .client
            .get(self.notes_url())
            .send()
            .await
            .map_err(|e| JotterError::fetch(OP, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "note fetch rejected");
            return Err(JotterError::fetch(OP, status_message(status, &body)));
        }

        let notes: Vec<Note> = response
            .json()
            .await
            .map_err(|e| JotterError::fetch(OP, format!("invalid response body: {}", e)))?;
        debug!(count = notes.len(), "fetched notes");
        Ok(notes)
    }

    #[instrument(skip(self, update), fields(len = update.content.len()))]
    async fn update_note(&self, id: &str, update: &NoteUpdate) -> Result<()> {
        let response = self
            .client
            .put(self.note_url(id))
            .json(update)
            .send()
            .await
            .map_err(|e| JotterError::update(id, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "note update rejected");
            return Err(JotterError::update(id, status_message(status, &body)));
        }

        debug!("note updated");
        Ok(())
    }
}
