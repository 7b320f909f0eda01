use chrono::NaiveDateTime;
use diesel::dsl::max;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use nanoid::nanoid;
use serde::Serialize;

use super::note::Note;
use crate::schema::versions;
use crate::utils;

/// An immutable snapshot of a note's title and content. Numbered 1, 2, 3…
/// per note in creation order; never updated after insert.
#[derive(Debug, Clone, Queryable, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: String,
    #[serde(rename = "note")]
    pub note_id: String,
    #[serde(rename = "user")]
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub version_number: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = versions)]
struct NewVersion<'a> {
    id: String,
    note_id: &'a str,
    user_id: &'a str,
    title: &'a str,
    content: &'a str,
    version_number: i32,
    created_at: NaiveDateTime,
}

/// Summary row for version listings; the content payload stays behind.
#[derive(Debug, Queryable, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSummary {
    pub id: String,
    pub version_number: i32,
    pub title: String,
    pub created_at: NaiveDateTime,
}

impl Version {
    /// Inserts a snapshot of the note's current title/content, numbered one
    /// past the note's current maximum (1 when none exist yet).
    ///
    /// The max+insert pair is only race-free inside a write transaction;
    /// callers wrap this in `immediate_transaction` so concurrent appends on
    /// the same note serialize on the database write lock and the per-note
    /// sequence stays gapless.
    pub fn append(conn: &mut SqliteConnection, note: &Note) -> QueryResult<Version> {
        let current: Option<i32> = versions::table
            .filter(versions::note_id.eq(&note.id))
            .select(max(versions::version_number))
            .first(conn)?;

        diesel::insert_into(versions::table)
            .values(NewVersion {
                id: nanoid!(12),
                note_id: &note.id,
                user_id: &note.user_id,
                title: &note.title,
                content: &note.content,
                version_number: current.unwrap_or(0) + 1,
                created_at: utils::now(),
            })
            .get_result(conn)
    }
}
