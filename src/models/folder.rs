use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::folders;

#[derive(Debug, Clone, Queryable, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    #[serde(rename = "user")]
    pub user_id: String,
    pub name: String,
    pub icon: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = folders)]
pub struct NewFolder {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub icon: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize, Default)]
pub struct CreateFolder {
    pub name: Option<String>,
    pub icon: Option<String>,
}

#[derive(AsChangeset, Deserialize, Default)]
#[diesel(table_name = folders)]
pub struct UpdateFolder {
    pub name: Option<String>,
    pub icon: Option<String>,
}

/// Listing shape: the folder plus how many live (non-trashed) notes it holds.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderListItem {
    #[serde(flatten)]
    pub folder: Folder,
    pub note_count: i64,
}
