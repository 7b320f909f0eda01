use actix_web::{web, HttpResponse};
use diesel::prelude::*;
use serde_json::json;

use crate::db::Pool;
use crate::errors::ServerError;
use crate::models::note::SharedNote;
use crate::schema::notes;

/// The one unauthenticated read path. The sharing flag and trash state are
/// re-checked on every call — holding an old token grants nothing once
/// sharing is off or the note is in the trash.
pub async fn resolve(
    token_path: web::Path<String>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let token = token_path.into_inner();
    let mut connection = pool.get()?;

    let note = notes::table
        .filter(
            notes::share_token
                .eq(&token)
                .and(notes::is_shared.eq(true))
                .and(notes::is_trashed.eq(false)),
        )
        .select((
            notes::title,
            notes::content,
            notes::tags,
            notes::created_at,
            notes::updated_at,
        ))
        .first::<SharedNote>(&mut connection)
        .optional()?
        .ok_or(ServerError::NotFound(
            "Shared note not found or sharing is disabled",
        ))?;

    Ok(HttpResponse::Ok().json(json!(note)))
}
