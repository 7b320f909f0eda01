#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use serde_json::{json, Value};
use tempfile::NamedTempFile;

use quillbox::{AppState, Pool};

pub const TEST_SECRET: &str = "test-secret";

pub struct TestContext {
    pub pool: Pool,
    _db_file: NamedTempFile,
}

pub fn setup() -> TestContext {
    let db_file = NamedTempFile::new().expect("temp db file");
    let url = db_file.path().to_str().expect("utf-8 path").to_string();
    let pool = quillbox::db::init_pool(&url).expect("pool");
    let mut connection = pool.get().expect("connection");
    quillbox::db::run_migrations(&mut connection).expect("migrations");
    TestContext {
        pool,
        _db_file: db_file,
    }
}

pub async fn init_app(
    ctx: &TestContext,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::new(TEST_SECRET.to_string())))
            .app_data(web::Data::new(ctx.pool.clone()))
            .configure(quillbox::configure),
    )
    .await
}

/// Sends the request (with a bearer token when given) and returns status +
/// parsed JSON body.
pub async fn api<S, B>(
    app: &S,
    req: test::TestRequest,
    token: Option<&str>,
) -> (u16, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = match token {
        Some(t) => req.insert_header(("Authorization", format!("Bearer {}", t))),
        None => req,
    };
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status().as_u16();
    let bytes = test::read_body(resp).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn register<S, B>(app: &S, name: &str, email: &str) -> (String, String)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let (status, body) = api(
        app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "name": name, "email": email, "password": "hunter42" })),
        None,
    )
    .await;
    assert_eq!(status, 201, "register failed: {}", body);
    (
        body["token"].as_str().expect("token").to_string(),
        body["user"]["id"].as_str().expect("user id").to_string(),
    )
}

pub async fn create_note<S, B>(app: &S, token: &str, body: Value) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let (status, note) = api(
        app,
        test::TestRequest::post().uri("/api/notes").set_json(body),
        Some(token),
    )
    .await;
    assert_eq!(status, 201, "create note failed: {}", note);
    note
}
