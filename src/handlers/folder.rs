use actix_web::{web, HttpResponse};
use diesel::prelude::*;
use nanoid::nanoid;
use serde_json::json;

use crate::auth::AuthUser;
use crate::db::Pool;
use crate::errors::ServerError;
use crate::models::folder::{CreateFolder, Folder, FolderListItem, NewFolder, UpdateFolder};
use crate::schema::{folders, notes};
use crate::utils;

const DEFAULT_NAME: &str = "New Folder";
const DEFAULT_ICON: &str = "📁";
const MAX_NAME_LEN: usize = 100;

fn validate_name(name: &str) -> Result<(), ServerError> {
    if name.trim().is_empty() {
        return Err(ServerError::Validation("Folder name is required.".to_string()));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ServerError::Validation("Folder name is too long.".to_string()));
    }
    Ok(())
}

pub async fn list(owner: AuthUser, pool: web::Data<Pool>) -> Result<HttpResponse, ServerError> {
    let mut connection = pool.get()?;

    let folder_rows = folders::table
        .filter(folders::user_id.eq(&owner.id))
        .order(folders::name.asc())
        .load::<Folder>(&mut connection)?;

    let mut items = Vec::with_capacity(folder_rows.len());
    for folder in folder_rows {
        let note_count: i64 = notes::table
            .filter(
                notes::folder_id
                    .eq(&folder.id)
                    .and(notes::is_trashed.eq(false)),
            )
            .count()
            .get_result(&mut connection)?;
        items.push(FolderListItem { folder, note_count });
    }

    Ok(HttpResponse::Ok().json(json!(items)))
}

pub async fn create(
    input: web::Json<CreateFolder>,
    owner: AuthUser,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let req = input.into_inner();
    let folder_name = req.name.unwrap_or_else(|| DEFAULT_NAME.to_owned());
    validate_name(&folder_name)?;

    let mut connection = pool.get()?;
    let time_now = utils::now();
    let folder = diesel::insert_into(folders::table)
        .values(NewFolder {
            id: nanoid!(12),
            user_id: owner.id,
            name: folder_name,
            icon: req.icon.unwrap_or_else(|| DEFAULT_ICON.to_owned()),
            created_at: time_now,
            updated_at: time_now,
        })
        .get_result::<Folder>(&mut connection)?;
    Ok(HttpResponse::Created().json(json!(folder)))
}

pub async fn update(
    folder_path: web::Path<String>,
    input: web::Json<UpdateFolder>,
    owner: AuthUser,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let fid = folder_path.into_inner();
    let changes = input.into_inner();
    if let Some(folder_name) = &changes.name {
        validate_name(folder_name)?;
    }

    let mut connection = pool.get()?;
    let folder = diesel::update(
        folders::table.filter(folders::id.eq(&fid).and(folders::user_id.eq(&owner.id))),
    )
    .set((&changes, folders::updated_at.eq(utils::now())))
    .get_result::<Folder>(&mut connection)
    .optional()?
    .ok_or(ServerError::NotFound("Folder not found"))?;
    Ok(HttpResponse::Ok().json(json!(folder)))
}

pub async fn delete(
    folder_path: web::Path<String>,
    owner: AuthUser,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let fid = folder_path.into_inner();
    let mut connection = pool.get()?;

    connection.immediate_transaction::<_, ServerError, _>(|conn| {
        let existing = folders::table
            .filter(folders::id.eq(&fid).and(folders::user_id.eq(&owner.id)))
            .select(folders::id)
            .first::<String>(conn)
            .optional()?;
        if existing.is_none() {
            return Err(ServerError::NotFound("Folder not found"));
        }

        // unfile the folder's notes before the row goes away
        diesel::update(
            notes::table.filter(notes::folder_id.eq(&fid).and(notes::user_id.eq(&owner.id))),
        )
        .set((
            notes::folder_id.eq(None::<String>),
            notes::updated_at.eq(utils::now()),
        ))
        .execute(conn)?;

        diesel::delete(folders::table.find(&fid)).execute(conn)?;
        Ok(())
    })?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Folder deleted" })))
}
