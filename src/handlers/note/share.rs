use actix_web::{web, HttpResponse};
use diesel::prelude::*;
use serde_json::json;

use crate::auth::AuthUser;
use crate::db::Pool;
use crate::errors::ServerError;
use crate::models::note::{mint_share_token, Note};
use crate::schema::notes;
use crate::utils;

pub async fn toggle(
    note_path: web::Path<String>,
    owner: AuthUser,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let nid = note_path.into_inner();
    let mut connection = pool.get()?;

    let note = notes::table
        .filter(notes::id.eq(&nid).and(notes::user_id.eq(&owner.id)))
        .first::<Note>(&mut connection)
        .optional()?
        .ok_or(ServerError::NotFound("Note not found"))?;

    let updated = if note.is_shared {
        diesel::update(notes::table.find(&note.id))
            .set((
                notes::is_shared.eq(false),
                notes::share_token.eq(None::<String>),
                notes::updated_at.eq(utils::now()),
            ))
            .get_result::<Note>(&mut connection)?
    } else {
        // a revoked token is never reused; every enable mints a fresh one
        loop {
            let token = mint_share_token();
            match diesel::update(notes::table.find(&note.id))
                .set((
                    notes::is_shared.eq(true),
                    notes::share_token.eq(&token),
                    notes::updated_at.eq(utils::now()),
                ))
                .get_result::<Note>(&mut connection)
            {
                Ok(n) => break n,
                Err(diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    _,
                )) => continue,
                Err(e) => return Err(e.into()),
            }
        }
    };

    Ok(HttpResponse::Ok().json(json!(updated)))
}
