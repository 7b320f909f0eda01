use actix_web::{web, HttpResponse};
use serde_json::json;

pub mod auth;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod schema;
pub mod utils;

pub use auth::AppState;
pub use db::Pool;

/// Mounts every route. `main` and the test harness share this so the suite
/// exercises the same routing table the server runs.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({ "error": message })),
        )
        .into()
    }))
    .route("/api/health", web::get().to(handlers::health))
    .service(
        web::scope("/api/auth")
            .route("/register", web::post().to(handlers::auth::register))
            .route("/login", web::post().to(handlers::auth::login))
            .route("/me", web::get().to(handlers::auth::me)),
    )
    .service(
        web::scope("/api/notes")
            .route("", web::get().to(handlers::note::list))
            .route("", web::post().to(handlers::note::create))
            .route("/{id}", web::get().to(handlers::note::get))
            .route("/{id}", web::put().to(handlers::note::update))
            .route("/{id}", web::delete().to(handlers::note::delete))
            .route("/{id}/trash", web::put().to(handlers::note::trash))
            .route(
                "/{id}/restore",
                web::put().to(handlers::note::restore_from_trash),
            )
            .route("/{id}/share", web::put().to(handlers::note::share::toggle))
            .route(
                "/{id}/versions",
                web::post().to(handlers::note::version::save),
            )
            .route("/{id}/versions", web::get().to(handlers::note::version::list))
            .route(
                "/{id}/versions/{version_id}",
                web::get().to(handlers::note::version::get),
            )
            .route(
                "/{id}/versions/{version_id}/restore",
                web::put().to(handlers::note::version::restore),
            ),
    )
    .service(
        web::scope("/api/folders")
            .route("", web::get().to(handlers::folder::list))
            .route("", web::post().to(handlers::folder::create))
            .route("/{id}", web::put().to(handlers::folder::update))
            .route("/{id}", web::delete().to(handlers::folder::delete)),
    )
    .service(web::scope("/api/shared").route("/{token}", web::get().to(handlers::shared::resolve)));
}
