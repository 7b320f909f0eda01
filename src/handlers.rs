use actix_web::HttpResponse;
use serde_json::json;

pub mod auth;
pub mod folder;
pub mod note;
pub mod shared;

pub async fn health() -> impl actix_web::Responder {
    HttpResponse::Ok().json(json!({ "status": "ok", "timestamp": crate::utils::now() }))
}
