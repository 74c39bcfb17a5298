#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! AnkiConnect sink: pushes extracted pairs into Anki as Basic notes,
//! upserting by deck and front field.

pub mod client;
pub mod protocol;
pub mod retry;

pub use client::AnkiClient;
pub use protocol::{AnkiNote, NoteFields, PROTOCOL_VERSION};
pub use retry::retry_with_backoff;
