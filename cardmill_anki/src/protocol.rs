//! AnkiConnect wire types.
//!
//! Every call is a POST with an `{ action, version, params }` envelope and an
//! `{ result, error }` reply.

use serde::{Deserialize, Serialize};

/// AnkiConnect protocol version spoken by this client.
pub const PROTOCOL_VERSION: u8 = 6;

/// The note model used for extracted pairs.
pub const BASIC_MODEL: &str = "Basic";

/// Request envelope wrapping one action's parameters.
#[derive(Debug, Serialize)]
pub struct AnkiRequest<P> {
    pub action: &'static str,
    pub version: u8,
    pub params: P,
}

impl<P> AnkiRequest<P> {
    #[must_use]
    pub const fn new(action: &'static str, params: P) -> Self {
        Self {
            action,
            version: PROTOCOL_VERSION,
            params,
        }
    }
}

/// Response envelope. `error` is set instead of an HTTP error status when the
/// action itself fails inside Anki.
#[derive(Debug, Deserialize)]
pub struct AnkiResponse<T> {
    pub result: Option<T>,
    pub error: Option<String>,
}

/// Parameters for actions that take none (e.g. `deckNames`).
#[derive(Debug, Default, Serialize)]
pub struct NoParams {}

#[derive(Debug, Serialize)]
pub struct CreateDeckParams {
    pub deck: String,
}

#[derive(Debug, Serialize)]
pub struct FindNotesParams {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AddNotesParams {
    pub notes: Vec<AnkiNote>,
}

#[derive(Debug, Serialize)]
pub struct UpdateNoteFieldsParams {
    pub note: NoteUpdate,
}

#[derive(Debug, Serialize)]
pub struct NoteUpdate {
    pub id: u64,
    pub fields: NoteFields,
}

/// One Basic-model note.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnkiNote {
    pub deck_name: String,
    pub model_name: &'static str,
    pub fields: NoteFields,
}

impl AnkiNote {
    /// Build a Basic note with the pair's key on the front and value on the
    /// back.
    #[must_use]
    pub fn basic(deck: impl Into<String>, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            deck_name: deck.into(),
            model_name: BASIC_MODEL,
            fields: NoteFields {
                front: front.into(),
                back: back.into(),
            },
        }
    }
}

/// Front/Back field payload, named as the Basic model names them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteFields {
    #[serde(rename = "Front")]
    pub front: String,

    #[serde(rename = "Back")]
    pub back: String,
}
