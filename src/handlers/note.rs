use actix_web::{web, HttpResponse};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use serde::Deserialize;
use serde_json::json;

use crate::auth::AuthUser;
use crate::db::Pool;
use crate::errors::ServerError;
use crate::models::note::{CreateNote, NewNote, Note, NoteListItem, UpdateNote};
use crate::models::tag::Tags;
use crate::schema::notes::dsl::*;
use crate::schema::{folders, versions};
use crate::utils;

pub mod share;
pub mod version;

fn assert_folder_owned(
    conn: &mut SqliteConnection,
    owner: &str,
    fid: &str,
) -> Result<(), ServerError> {
    folders::table
        .filter(folders::id.eq(fid).and(folders::user_id.eq(owner)))
        .select(folders::id)
        .first::<String>(conn)
        .optional()?
        .map(|_| ())
        .ok_or(ServerError::NotFound("Folder not found"))
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub folder: Option<String>,
    pub search: Option<String>,
    pub trashed: Option<bool>,
}

pub async fn list(
    query: web::Query<ListQuery>,
    owner: AuthUser,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let mut connection = pool.get()?;

    let mut q = notes.filter(user_id.eq(owner.id)).into_boxed();
    q = if query.trashed.unwrap_or(false) {
        q.filter(is_trashed.eq(true))
    } else {
        q.filter(is_trashed.eq(false))
    };
    if let Some(f) = &query.folder {
        q = q.filter(folder_id.eq(f.clone()));
    }
    if let Some(s) = &query.search {
        // case-insensitive substring scan over title and content
        let pattern = format!("%{}%", s);
        q = q.filter(title.like(pattern.clone()).or(content.like(pattern)));
    }

    let results = q
        .order((is_pinned.desc(), updated_at.desc()))
        .load::<Note>(&mut connection)?;
    let items: Vec<NoteListItem> = results.into_iter().map(NoteListItem::from).collect();
    Ok(HttpResponse::Ok().json(json!(items)))
}

pub async fn create(
    input: web::Json<CreateNote>,
    owner: AuthUser,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let req = input.into_inner();
    let mut connection = pool.get()?;

    if let Some(fid) = &req.folder {
        assert_folder_owned(&mut connection, &owner.id, fid)?;
    }

    let note = diesel::insert_into(notes)
        .values(NewNote::from_request(&owner.id, req))
        .get_result::<Note>(&mut connection)?;
    Ok(HttpResponse::Created().json(json!(note)))
}

pub async fn get(
    note_path: web::Path<String>,
    owner: AuthUser,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let nid = note_path.into_inner();
    let mut connection = pool.get()?;

    let note = notes
        .filter(id.eq(&nid).and(user_id.eq(&owner.id)))
        .first::<Note>(&mut connection)
        .optional()?
        .ok_or(ServerError::NotFound("Note not found"))?;
    Ok(HttpResponse::Ok().json(json!(note)))
}

pub async fn update(
    note_path: web::Path<String>,
    input: web::Json<UpdateNote>,
    owner: AuthUser,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let nid = note_path.into_inner();
    let mut changes = input.into_inner();
    changes.tags = changes.tags.map(Tags::dedup);

    let mut connection = pool.get()?;

    if let Some(Some(fid)) = &changes.folder_id {
        assert_folder_owned(&mut connection, &owner.id, fid)?;
    }

    let note = diesel::update(notes.filter(id.eq(&nid).and(user_id.eq(&owner.id))))
        .set((&changes, updated_at.eq(utils::now())))
        .get_result::<Note>(&mut connection)
        .optional()?
        .ok_or(ServerError::NotFound("Note not found"))?;
    Ok(HttpResponse::Ok().json(json!(note)))
}

pub async fn trash(
    note_path: web::Path<String>,
    owner: AuthUser,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let nid = note_path.into_inner();
    let mut connection = pool.get()?;

    let time_now = utils::now();
    let note = diesel::update(notes.filter(id.eq(&nid).and(user_id.eq(&owner.id))))
        .set((
            is_trashed.eq(true),
            trashed_at.eq(time_now),
            updated_at.eq(time_now),
        ))
        .get_result::<Note>(&mut connection)
        .optional()?
        .ok_or(ServerError::NotFound("Note not found"))?;
    Ok(HttpResponse::Ok().json(json!(note)))
}

pub async fn restore_from_trash(
    note_path: web::Path<String>,
    owner: AuthUser,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let nid = note_path.into_inner();
    let mut connection = pool.get()?;

    let note = diesel::update(notes.filter(id.eq(&nid).and(user_id.eq(&owner.id))))
        .set((
            is_trashed.eq(false),
            trashed_at.eq(None::<chrono::NaiveDateTime>),
            updated_at.eq(utils::now()),
        ))
        .get_result::<Note>(&mut connection)
        .optional()?
        .ok_or(ServerError::NotFound("Note not found"))?;
    Ok(HttpResponse::Ok().json(json!(note)))
}

pub async fn delete(
    note_path: web::Path<String>,
    owner: AuthUser,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let nid = note_path.into_inner();
    let mut connection = pool.get()?;

    connection.immediate_transaction::<_, ServerError, _>(|conn| {
        let existing = notes
            .filter(id.eq(&nid).and(user_id.eq(&owner.id)))
            .select(id)
            .first::<String>(conn)
            .optional()?;
        if existing.is_none() {
            return Err(ServerError::NotFound("Note not found"));
        }

        // versions reference the note; they go first
        diesel::delete(versions::table.filter(versions::note_id.eq(&nid))).execute(conn)?;
        diesel::delete(notes.filter(id.eq(&nid))).execute(conn)?;
        Ok(())
    })?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Note permanently deleted" })))
}
