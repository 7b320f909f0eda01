use actix_web::{web, HttpResponse};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use diesel::prelude::*;
use nanoid::nanoid;
use serde_json::json;

use crate::auth::{issue_token, AppState, AuthUser};
use crate::db::Pool;
use crate::errors::ServerError;
use crate::models::user::{LoginRequest, NewUser, RegisterRequest, User};
use crate::schema::users::dsl::*;
use crate::utils;

pub async fn register(
    input: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let input = input.into_inner();
    if input.name.trim().is_empty() {
        return Err(ServerError::Validation("Name is required.".to_string()));
    }
    if !input.email.contains('@') {
        return Err(ServerError::Validation(
            "A valid email is required.".to_string(),
        ));
    }
    if input.password.len() < 6 {
        return Err(ServerError::Validation(
            "Password must be at least 6 characters.".to_string(),
        ));
    }

    let mut connection = pool.get()?;

    let existing = users
        .filter(email.eq(&input.email))
        .select(id)
        .first::<String>(&mut connection)
        .optional()?;
    if existing.is_some() {
        return Err(ServerError::Validation(
            "An account with this email already exists.".to_string(),
        ));
    }

    let hashed = Argon2::default()
        .hash_password(input.password.as_bytes(), &SaltString::generate(&mut OsRng))?
        .to_string();

    let time_now = utils::now();
    let user = diesel::insert_into(users)
        .values(NewUser {
            id: nanoid!(12),
            name: input.name,
            email: input.email,
            password: hashed,
            created_at: time_now,
            updated_at: time_now,
        })
        .get_result::<User>(&mut connection)?;

    let token = issue_token(&state, &user.id)?;
    Ok(HttpResponse::Created().json(json!({ "token": token, "user": user })))
}

pub async fn login(
    input: web::Json<LoginRequest>,
    state: web::Data<AppState>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    if input.email.is_empty() || input.password.is_empty() {
        return Err(ServerError::Validation(
            "Email and password are required.".to_string(),
        ));
    }

    let mut connection = pool.get()?;

    // unknown email and wrong password answer identically
    let user = users
        .filter(email.eq(&input.email))
        .first::<User>(&mut connection)
        .optional()?
        .ok_or(ServerError::Unauthorized("Invalid email or password."))?;

    let parsed_hash = PasswordHash::new(&user.password)?;
    if Argon2::default()
        .verify_password(input.password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(ServerError::Unauthorized("Invalid email or password."));
    }

    let token = issue_token(&state, &user.id)?;
    Ok(HttpResponse::Ok().json(json!({ "token": token, "user": user })))
}

pub async fn me(owner: AuthUser, pool: web::Data<Pool>) -> Result<HttpResponse, ServerError> {
    let mut connection = pool.get()?;
    let user = users
        .find(&owner.id)
        .first::<User>(&mut connection)
        .optional()?
        .ok_or(ServerError::Unauthorized(
            "User not found. Please log in again.",
        ))?;
    Ok(HttpResponse::Ok().json(json!(user)))
}
