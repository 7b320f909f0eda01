use chrono::NaiveDateTime;
use diesel::prelude::*;
use nanoid::nanoid;
use serde::{Deserialize, Serialize};

use super::tag::Tags;
use crate::schema::notes;
use crate::utils;

pub const DEFAULT_TITLE: &str = "New Note";

/// Share tokens are 32 hex characters — 128 bits of CSPRNG output. A
/// collision against the unique index is a retry, not a failure mode.
const TOKEN_ALPHABET: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];

pub fn mint_share_token() -> String {
    nanoid!(32, &TOKEN_ALPHABET)
}

#[derive(Debug, Clone, Queryable, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    #[serde(rename = "user")]
    pub user_id: String,
    #[serde(rename = "folder")]
    pub folder_id: Option<String>,
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub is_trashed: bool,
    pub trashed_at: Option<NaiveDateTime>,
    pub tags: Tags,
    pub is_shared: bool,
    pub share_token: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = notes)]
pub struct NewNote {
    pub id: String,
    pub user_id: String,
    pub folder_id: Option<String>,
    pub title: String,
    pub content: String,
    pub tags: Tags,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewNote {
    pub fn from_request(owner: &str, req: CreateNote) -> NewNote {
        let time_now = utils::now();
        NewNote {
            id: nanoid!(12),
            user_id: owner.to_owned(),
            folder_id: req.folder,
            title: req.title.unwrap_or_else(|| DEFAULT_TITLE.to_owned()),
            content: req.content.unwrap_or_default(),
            tags: Tags::default(),
            created_at: time_now,
            updated_at: time_now,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct CreateNote {
    pub title: Option<String>,
    pub content: Option<String>,
    pub folder: Option<String>,
}

/// Partial update: a field left out of the request body never touches the
/// stored value. `folder` additionally distinguishes an explicit `null`
/// (unfile the note) from absence, so it is a double `Option` — diesel
/// skips the outer `None` and writes `NULL` for `Some(None)`.
#[derive(AsChangeset, Deserialize, Default)]
#[diesel(table_name = notes)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNote {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(
        default,
        rename = "folder",
        deserialize_with = "crate::utils::double_option"
    )]
    pub folder_id: Option<Option<String>>,
    pub is_pinned: Option<bool>,
    pub is_locked: Option<bool>,
    pub tags: Option<Tags>,
}

/// Listing shape: the full record plus a plain-text preview of the content.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteListItem {
    #[serde(flatten)]
    pub note: Note,
    pub preview: String,
}

impl From<Note> for NoteListItem {
    fn from(note: Note) -> Self {
        let preview = utils::preview(&note.content);
        NoteListItem { note, preview }
    }
}

/// Anonymous projection served on the shared-link path: no owner, no flags.
#[derive(Queryable, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedNote {
    pub title: String,
    pub content: String,
    pub tags: Tags,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
