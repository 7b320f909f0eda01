use actix_web::{web, HttpResponse};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use serde_json::json;

use crate::auth::AuthUser;
use crate::db::Pool;
use crate::errors::ServerError;
use crate::models::note::Note;
use crate::models::version::{Version, VersionSummary};
use crate::schema::{notes, versions};
use crate::utils;

fn owned_note(conn: &mut SqliteConnection, owner: &str, nid: &str) -> Result<Note, ServerError> {
    notes::table
        .filter(notes::id.eq(nid).and(notes::user_id.eq(owner)))
        .first::<Note>(conn)
        .optional()?
        .ok_or(ServerError::NotFound("Note not found"))
}

pub async fn save(
    note_path: web::Path<String>,
    owner: AuthUser,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let nid = note_path.into_inner();
    let mut connection = pool.get()?;

    let version = connection.immediate_transaction::<_, ServerError, _>(|conn| {
        let note = owned_note(conn, &owner.id, &nid)?;
        Ok(Version::append(conn, &note)?)
    })?;

    Ok(HttpResponse::Created().json(json!(version)))
}

pub async fn list(
    note_path: web::Path<String>,
    owner: AuthUser,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let nid = note_path.into_inner();
    let mut connection = pool.get()?;

    owned_note(&mut connection, &owner.id, &nid)?;

    let summaries = versions::table
        .filter(versions::note_id.eq(&nid))
        .select((
            versions::id,
            versions::version_number,
            versions::title,
            versions::created_at,
        ))
        .order(versions::version_number.desc())
        .load::<VersionSummary>(&mut connection)?;
    Ok(HttpResponse::Ok().json(json!(summaries)))
}

pub async fn get(
    path: web::Path<(String, String)>,
    owner: AuthUser,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let (nid, vid) = path.into_inner();
    let mut connection = pool.get()?;

    owned_note(&mut connection, &owner.id, &nid)?;

    // a version id paired with the wrong note reads as nonexistent
    let version = versions::table
        .filter(versions::id.eq(&vid).and(versions::note_id.eq(&nid)))
        .first::<Version>(&mut connection)
        .optional()?
        .ok_or(ServerError::NotFound("Version not found"))?;
    Ok(HttpResponse::Ok().json(json!(version)))
}

pub async fn restore(
    path: web::Path<(String, String)>,
    owner: AuthUser,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let (nid, vid) = path.into_inner();
    let mut connection = pool.get()?;

    let note = connection.immediate_transaction::<_, ServerError, _>(|conn| {
        let note = owned_note(conn, &owner.id, &nid)?;
        let target = versions::table
            .filter(versions::id.eq(&vid).and(versions::note_id.eq(&nid)))
            .first::<Version>(conn)
            .optional()?
            .ok_or(ServerError::NotFound("Version not found"))?;

        // the pre-restore state becomes a new version first; if that insert
        // fails the whole restore rolls back
        Version::append(conn, &note)?;

        let updated = diesel::update(notes::table.find(&note.id))
            .set((
                notes::title.eq(&target.title),
                notes::content.eq(&target.content),
                notes::updated_at.eq(utils::now()),
            ))
            .get_result::<Note>(conn)?;
        Ok(updated)
    })?;

    Ok(HttpResponse::Ok().json(json!(note)))
}
