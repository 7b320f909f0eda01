mod common;

use actix_web::test::TestRequest;
use serde_json::json;

use common::{api, create_note, init_app, register, setup};

#[actix_web::test]
async fn create_applies_defaults() {
    let ctx = setup();
    let app = init_app(&ctx).await;
    let (token, _) = register(&app, "Ada", "ada@example.com").await;

    let (status, folder) = api(
        &app,
        TestRequest::post().uri("/api/folders").set_json(json!({})),
        Some(&token),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(folder["name"], "New Folder");
    assert_eq!(folder["icon"], "📁");
}

#[actix_web::test]
async fn listing_counts_live_notes_only() {
    let ctx = setup();
    let app = init_app(&ctx).await;
    let (token, _) = register(&app, "Ada", "ada@example.com").await;

    let (_, folder) = api(
        &app,
        TestRequest::post()
            .uri("/api/folders")
            .set_json(json!({ "name": "Work" })),
        Some(&token),
    )
    .await;
    let fid = folder["id"].as_str().unwrap();

    create_note(&app, &token, json!({ "folder": fid })).await;
    let doomed = create_note(&app, &token, json!({ "folder": fid })).await;
    let (status, _) = api(
        &app,
        TestRequest::put().uri(&format!(
            "/api/notes/{}/trash",
            doomed["id"].as_str().unwrap()
        )),
        Some(&token),
    )
    .await;
    assert_eq!(status, 200);

    let (_, listing) = api(&app, TestRequest::get().uri("/api/folders"), Some(&token)).await;
    let items = listing.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["noteCount"], 1);
}

#[actix_web::test]
async fn folders_sort_by_name() {
    let ctx = setup();
    let app = init_app(&ctx).await;
    let (token, _) = register(&app, "Ada", "ada@example.com").await;

    for name in ["Zebra", "Alpha", "Mango"] {
        let (status, _) = api(
            &app,
            TestRequest::post()
                .uri("/api/folders")
                .set_json(json!({ "name": name })),
            Some(&token),
        )
        .await;
        assert_eq!(status, 201);
    }

    let (_, listing) = api(&app, TestRequest::get().uri("/api/folders"), Some(&token)).await;
    let names: Vec<&str> = listing
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alpha", "Mango", "Zebra"]);
}

#[actix_web::test]
async fn rename_keeps_unsupplied_fields() {
    let ctx = setup();
    let app = init_app(&ctx).await;
    let (token, _) = register(&app, "Ada", "ada@example.com").await;

    let (_, folder) = api(
        &app,
        TestRequest::post()
            .uri("/api/folders")
            .set_json(json!({ "name": "Work", "icon": "🗂" })),
        Some(&token),
    )
    .await;
    let fid = folder["id"].as_str().unwrap();

    let (status, updated) = api(
        &app,
        TestRequest::put()
            .uri(&format!("/api/folders/{}", fid))
            .set_json(json!({ "name": "Projects" })),
        Some(&token),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["name"], "Projects");
    assert_eq!(updated["icon"], "🗂");
}

#[actix_web::test]
async fn name_validation() {
    let ctx = setup();
    let app = init_app(&ctx).await;
    let (token, _) = register(&app, "Ada", "ada@example.com").await;

    let (status, _) = api(
        &app,
        TestRequest::post()
            .uri("/api/folders")
            .set_json(json!({ "name": "   " })),
        Some(&token),
    )
    .await;
    assert_eq!(status, 400);

    let (status, _) = api(
        &app,
        TestRequest::post()
            .uri("/api/folders")
            .set_json(json!({ "name": "x".repeat(101) })),
        Some(&token),
    )
    .await;
    assert_eq!(status, 400);
}

#[actix_web::test]
async fn deleting_a_folder_unfiles_its_notes() {
    let ctx = setup();
    let app = init_app(&ctx).await;
    let (token, _) = register(&app, "Ada", "ada@example.com").await;

    let (_, folder) = api(
        &app,
        TestRequest::post()
            .uri("/api/folders")
            .set_json(json!({ "name": "Work" })),
        Some(&token),
    )
    .await;
    let fid = folder["id"].as_str().unwrap();
    let note = create_note(&app, &token, json!({ "title": "kept", "folder": fid })).await;

    let (status, body) = api(
        &app,
        TestRequest::delete().uri(&format!("/api/folders/{}", fid)),
        Some(&token),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Folder deleted");

    let (status, body) = api(
        &app,
        TestRequest::get().uri(&format!("/api/notes/{}", note["id"].as_str().unwrap())),
        Some(&token),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["title"], "kept");
    assert_eq!(body["folder"], json!(null));
}

#[actix_web::test]
async fn folders_of_other_users_read_as_nonexistent() {
    let ctx = setup();
    let app = init_app(&ctx).await;
    let (token_a, _) = register(&app, "Ada", "ada@example.com").await;
    let (token_b, _) = register(&app, "Bob", "bob@example.com").await;

    let (_, folder) = api(
        &app,
        TestRequest::post()
            .uri("/api/folders")
            .set_json(json!({ "name": "Ada's" })),
        Some(&token_a),
    )
    .await;
    let fid = folder["id"].as_str().unwrap();

    let (status, _) = api(
        &app,
        TestRequest::put()
            .uri(&format!("/api/folders/{}", fid))
            .set_json(json!({ "name": "Bob's now" })),
        Some(&token_b),
    )
    .await;
    assert_eq!(status, 404);

    let (status, _) = api(
        &app,
        TestRequest::delete().uri(&format!("/api/folders/{}", fid)),
        Some(&token_b),
    )
    .await;
    assert_eq!(status, 404);
}
