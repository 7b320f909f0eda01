use actix_web::HttpResponse;
use derive_more::Display;
use serde_json::json;

#[derive(Debug, Display)]
pub enum ServerError {
    #[display(fmt = "Diesel Error")]
    DieselError,
    #[display(fmt = "Pooling Error")]
    R2D2Error,
    #[display(fmt = "Environment Error")]
    EnvironmentError,
    #[display(fmt = "Password Hash Error")]
    HashError,
    #[display(fmt = "JWT Error")]
    JwtError,
    #[display(fmt = "{}", _0)]
    Unauthorized(&'static str),
    #[display(fmt = "{}", _0)]
    NotFound(&'static str),
    #[display(fmt = "{}", _0)]
    Validation(String),
}

impl From<r2d2::Error> for ServerError {
    fn from(_: r2d2::Error) -> ServerError {
        ServerError::R2D2Error
    }
}

impl From<std::env::VarError> for ServerError {
    fn from(_: std::env::VarError) -> ServerError {
        ServerError::EnvironmentError
    }
}

impl From<diesel::result::Error> for ServerError {
    fn from(_: diesel::result::Error) -> ServerError {
        ServerError::DieselError
    }
}

impl From<argon2::password_hash::Error> for ServerError {
    fn from(_: argon2::password_hash::Error) -> ServerError {
        ServerError::HashError
    }
}

impl From<jsonwebtoken::errors::Error> for ServerError {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        ServerError::JwtError
    }
}

impl actix_web::error::ResponseError for ServerError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ServerError::Unauthorized(msg) => {
                HttpResponse::Unauthorized().json(json!({ "error": msg }))
            }
            ServerError::NotFound(msg) => HttpResponse::NotFound().json(json!({ "error": msg })),
            ServerError::Validation(msg) => HttpResponse::BadRequest().json(json!({ "error": msg })),
            other => {
                log::error!("internal error: {}", other);
                HttpResponse::InternalServerError()
                    .json(json!({ "error": format!("Internal Error: {}", other) }))
            }
        }
    }
}
