use async_trait::async_trait;
use cardmill_core::{CardSink, KeyValPair};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::protocol::{
    AddNotesParams, AnkiNote, AnkiRequest, AnkiResponse, CreateDeckParams, FindNotesParams,
    NoParams, NoteFields, NoteUpdate, UpdateNoteFieldsParams,
};
use crate::retry::retry_with_backoff;

/// Transport retry schedule in seconds; attempts = delays + 1.
const RETRY_DELAYS: &[u64] = &[2, 4, 6, 8, 10, 10, 10];

/// HTTP client for a local AnkiConnect endpoint.
pub struct AnkiClient {
    client: Client,
    base_url: String,
}

impl Default for AnkiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AnkiClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: "http://localhost:8765".to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Send one action, retrying transport failures with backoff.
    ///
    /// An error reported by AnkiConnect itself (the `error` field) is not
    /// retried: the same request would fail the same way again.
    async fn invoke<P, T>(&self, action: &'static str, params: P) -> anyhow::Result<Option<T>>
    where
        P: Serialize + Sync,
        T: DeserializeOwned,
    {
        let request = AnkiRequest::new(action, params);
        let response: AnkiResponse<T> =
            retry_with_backoff(|| self.try_send(&request), RETRY_DELAYS).await?;

        if let Some(error) = response.error {
            anyhow::bail!("AnkiConnect error for '{action}': {error}");
        }
        Ok(response.result)
    }

    async fn try_send<P, T>(&self, request: &AnkiRequest<P>) -> anyhow::Result<AnkiResponse<T>>
    where
        P: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(&self.base_url)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<AnkiResponse<T>>()
            .await?;

        Ok(response)
    }

    /// Names of all decks known to Anki.
    pub async fn deck_names(&self) -> anyhow::Result<Vec<String>> {
        self.invoke("deckNames", NoParams::default())
            .await?
            .ok_or_else(|| anyhow::anyhow!("AnkiConnect returned no result for 'deckNames'"))
    }

    /// Create a deck. Creating an existing deck is not an error in Anki.
    pub async fn create_deck(&self, deck: &str) -> anyhow::Result<()> {
        self.invoke::<_, serde_json::Value>(
            "createDeck",
            CreateDeckParams {
                deck: deck.to_string(),
            },
        )
        .await?;

        info!("Deck \"{deck}\" created successfully");
        Ok(())
    }

    /// Create `deck` only if it does not exist yet.
    pub async fn ensure_deck_exists(&self, deck: &str) -> anyhow::Result<()> {
        let deck_names = self.deck_names().await?;
        if deck_names.iter().any(|name| name == deck) {
            info!("Deck \"{deck}\" already exists");
        } else {
            info!("Deck \"{deck}\" does not exist, creating it");
            self.create_deck(deck).await?;
        }
        Ok(())
    }

    /// Note ids matching an Anki search query.
    pub async fn find_notes(&self, query: &str) -> anyhow::Result<Vec<u64>> {
        self.invoke(
            "findNotes",
            FindNotesParams {
                query: query.to_string(),
            },
        )
        .await?
        .ok_or_else(|| anyhow::anyhow!("AnkiConnect returned no result for 'findNotes'"))
    }

    /// Add a fresh Basic note to `deck`.
    pub async fn add_note(&self, deck: &str, front: &str, back: &str) -> anyhow::Result<()> {
        self.invoke::<_, serde_json::Value>(
            "addNotes",
            AddNotesParams {
                notes: vec![AnkiNote::basic(deck, front, back)],
            },
        )
        .await?;
        Ok(())
    }

    /// Overwrite the fields of an existing note.
    pub async fn update_note_fields(
        &self,
        note_id: u64,
        front: &str,
        back: &str,
    ) -> anyhow::Result<()> {
        self.invoke::<_, serde_json::Value>(
            "updateNoteFields",
            UpdateNoteFieldsParams {
                note: NoteUpdate {
                    id: note_id,
                    fields: NoteFields {
                        front: front.to_string(),
                        back: back.to_string(),
                    },
                },
            },
        )
        .await?;
        Ok(())
    }

    /// Upsert one note: update the first note whose front matches, or add a
    /// new one. Re-running over the same source converges to the same notes.
    pub async fn add_or_update_note(
        &self,
        deck: &str,
        front: &str,
        back: &str,
    ) -> anyhow::Result<()> {
        let existing = self.find_notes(&upsert_query(deck, front)).await?;

        if let Some(note_id) = existing.first() {
            info!("Updating existing note {note_id}");
            self.update_note_fields(*note_id, front, back).await
        } else {
            self.add_note(deck, front, back).await
        }
    }
}

#[async_trait]
impl CardSink for AnkiClient {
    async fn upsert(&self, deck: &str, pair: &KeyValPair) -> anyhow::Result<()> {
        self.add_or_update_note(deck, &pair.key, &pair.val).await
    }
}

/// Search query scoping a note lookup to one deck and one front field.
fn upsert_query(deck: &str, front: &str) -> String {
    format!("\"deck:{deck}\" \"Front:{front}\"")
}
