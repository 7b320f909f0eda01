use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::ServerError;

/// Shared JWT material, built once at startup from `SECRET_KEY`.
pub struct AppState {
    pub secret: String,
    pub jwt_header: Header,
    pub jwt_validation: Validation,
}

impl AppState {
    pub fn new(secret: String) -> Self {
        AppState {
            secret,
            jwt_header: Header::default(),
            jwt_validation: Validation::default(),
        }
    }

    pub fn from_env() -> Result<Self, ServerError> {
        Ok(Self::new(std::env::var("SECRET_KEY")?))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

const TOKEN_LIFETIME_DAYS: i64 = 30;

pub fn issue_token(state: &AppState, user_id: &str) -> Result<String, ServerError> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: user_id.to_owned(),
        iat: now.timestamp() as usize,
        exp: (now + chrono::Duration::days(TOKEN_LIFETIME_DAYS)).timestamp() as usize,
    };
    Ok(encode(
        &state.jwt_header,
        &claims,
        &EncodingKey::from_secret(state.secret.as_bytes()),
    )?)
}

/// The authenticated caller. Every owner-scoped handler takes this; a
/// missing or invalid bearer token rejects the request before the handler
/// body runs.
pub struct AuthUser {
    pub id: String,
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, ServerError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or(ServerError::EnvironmentError)?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ServerError::Unauthorized("No token provided. Please log in."))?;

    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.secret.as_bytes()),
        &state.jwt_validation,
    ) {
        Ok(data) => Ok(AuthUser {
            id: data.claims.sub,
        }),
        Err(e) => match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(ServerError::Unauthorized(
                "Token expired. Please log in again.",
            )),
            _ => Err(ServerError::Unauthorized("Invalid token. Please log in.")),
        },
    }
}

impl FromRequest for AuthUser {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
