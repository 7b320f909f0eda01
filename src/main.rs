use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware::Logger, web, App, HttpServer};

use quillbox::{db, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let port = std::env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let database_url = std::env::var("DATABASE_URL").expect("env DATABASE_URL");
    let state = web::Data::new(AppState::from_env().expect("env SECRET_KEY"));

    let pool = db::init_pool(&database_url).expect("failed to create a sqlite pool");
    let mut connection = pool.get().expect("failed to check out a connection");
    db::run_migrations(&mut connection).expect("failed to run migrations");
    drop(connection);

    let governor_conf = GovernorConfigBuilder::default()
        .per_second(2)
        .burst_size(120)
        .finish()
        .expect("valid rate limit config");

    log::info!("listening on 0.0.0.0:{}", port);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(web::Data::new(pool.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Governor::new(&governor_conf))
            .wrap(Logger::default())
            .configure(quillbox::configure)
    })
    .bind(format!("0.0.0.0:{}", port))?
    .run()
    .await
}
