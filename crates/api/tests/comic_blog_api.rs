//! HTTP-level tests for publishing and looking up comic blogs.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json, post_json_auth, register};
use serde_json::json;
use sqlx::PgPool;

fn blog(title: &str, email: &str) -> serde_json::Value {
    json!({
        "title": title,
        "email": email,
        "chapters": [
            {
                "chapter_number": 1,
                "chapter_title": "Fire Below",
                "narration_box": "Deep under the crust...",
                "chat_bubbles": [{ "character": "Ash", "text": "It's getting hot." }],
                "image_context": "a magma chamber",
                "image_url": "https://img.example/1.png"
            },
            { "chapter_title": "" }
        ]
    })
}

// ---------------------------------------------------------------------------
// Publishing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn add_comic_blog_returns_201_with_normalized_chapters(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/chapter/add-comicblogs", blog("Volcanoes", "ada@example.com")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Comic blog created successfully");

    let created = &json["comicBlog"];
    assert!(created["id"].is_number());
    assert_eq!(created["title"], "Volcanoes");
    assert_eq!(created["email"], "ada@example.com");
    assert_eq!(created["chapters"][0]["chat_bubbles"][0]["dialogue"], "It's getting hot.");
    assert_eq!(created["chapters"][1]["chapter_number"], 2);
    assert_eq!(created["chapters"][1]["chapter_title"], "Chapter 2");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn add_comic_blog_without_title_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "email": "ada@example.com", "chapters": [{ "chapter_number": 1 }] });
    let response = post_json(app, "/chapter/add-comicblogs", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn add_comic_blog_without_chapters_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "title": "Empty", "email": "ada@example.com", "chapters": [] });
    let response = post_json(app, "/chapter/add-comicblogs", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_titles_are_accepted_and_first_wins(pool: PgPool) {
    let app = common::build_test_app(pool);
    let first = post_json(app.clone(), "/chapter/add-comicblogs", blog("Bees", "a@example.com")).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let second = post_json(app.clone(), "/chapter/add-comicblogs", blog("Bees", "b@example.com")).await;
    assert_eq!(second.status(), StatusCode::CREATED);

    let response = post_json(app, "/comic-blog/get-comic-blog", json!({ "title": "Bees" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["comicBlog"]["email"], "a@example.com");
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_returns_blogs_in_creation_order(pool: PgPool) {
    let app = common::build_test_app(pool);
    post_json(app.clone(), "/chapter/add-comicblogs", blog("One", "a@example.com")).await;
    post_json(app.clone(), "/chapter/add-comicblogs", blog("Two", "a@example.com")).await;

    let response = post_json(app, "/chapter/get-comicblogs", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let titles: Vec<_> = json["blogs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["One", "Two"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_unknown_title_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/comic-blog/get-comic-blog", json!({ "title": "Nope" })).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn user_blogs_are_filtered_by_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    post_json(app.clone(), "/chapter/add-comicblogs", blog("Mine", "ada@example.com")).await;
    post_json(app.clone(), "/chapter/add-comicblogs", blog("Theirs", "bob@example.com")).await;

    let response = post_json(
        app.clone(),
        "/comic-blog/get-user-comic-blogs",
        json!({ "email": "ada@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let blogs = json["comicBlogs"].as_array().unwrap();
    assert_eq!(blogs.len(), 1);
    assert_eq!(blogs[0]["title"], "Mine");

    let missing = post_json(app, "/comic-blog/get-user-comic-blogs", json!({})).await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Attaching a reel
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn owner_can_attach_video(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ada@example.com").await;
    post_json(app.clone(), "/chapter/add-comicblogs", blog("Volcanoes", "ada@example.com")).await;

    let response = post_json_auth(
        app.clone(),
        "/comic-blog/attach-video",
        json!({ "title": "Volcanoes", "video_url": "https://cdn.example/reel.mp4" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["comicBlog"]["video_url"],
        "https://cdn.example/reel.mp4"
    );

    let fetched = post_json(app, "/comic-blog/get-comic-blog", json!({ "title": "Volcanoes" })).await;
    assert_eq!(
        body_json(fetched).await["comicBlog"]["video_url"],
        "https://cdn.example/reel.mp4"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn other_users_cannot_attach_video(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "bob@example.com").await;
    post_json(app.clone(), "/chapter/add-comicblogs", blog("Volcanoes", "ada@example.com")).await;

    let response = post_json_auth(
        app,
        "/comic-blog/attach-video",
        json!({ "title": "Volcanoes", "video_url": "https://cdn.example/reel.mp4" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn owner_of_a_later_duplicate_title_can_attach(pool: PgPool) {
    let app = common::build_test_app(pool);
    let bob_token = register(app.clone(), "bob@example.com").await;
    post_json(app.clone(), "/chapter/add-comicblogs", blog("Volcanoes", "ada@example.com")).await;
    post_json(app.clone(), "/chapter/add-comicblogs", blog("Volcanoes", "bob@example.com")).await;

    let response = post_json_auth(
        app.clone(),
        "/comic-blog/attach-video",
        json!({ "title": "Volcanoes", "video_url": "https://cdn.example/bob.mp4" }),
        &bob_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let attached = body_json(response).await;
    assert_eq!(attached["comicBlog"]["email"], "bob@example.com");
    assert_eq!(attached["comicBlog"]["video_url"], "https://cdn.example/bob.mp4");

    // Ada's earlier blog with the same title is untouched.
    let first = post_json(app, "/comic-blog/get-comic-blog", json!({ "title": "Volcanoes" })).await;
    let first = body_json(first).await;
    assert_eq!(first["comicBlog"]["email"], "ada@example.com");
    assert!(first["comicBlog"]["video_url"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn attach_by_id_targets_that_blog(pool: PgPool) {
    let app = common::build_test_app(pool);
    let ada_token = register(app.clone(), "ada@example.com").await;
    let bob_token = register(app.clone(), "bob@example.com").await;

    let older = post_json(app.clone(), "/chapter/add-comicblogs", blog("Bees", "ada@example.com")).await;
    let older_id = body_json(older).await["comicBlog"]["id"].clone();
    post_json(app.clone(), "/chapter/add-comicblogs", blog("Bees", "ada@example.com")).await;

    let response = post_json_auth(
        app.clone(),
        "/comic-blog/attach-video",
        json!({ "id": older_id, "video_url": "https://cdn.example/bees.mp4" }),
        &ada_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let attached = body_json(response).await;
    assert_eq!(attached["comicBlog"]["id"], older_id);

    let forbidden = post_json_auth(
        app.clone(),
        "/comic-blog/attach-video",
        json!({ "id": older_id, "video_url": "https://cdn.example/x.mp4" }),
        &bob_token,
    )
    .await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let missing = post_json_auth(
        app,
        "/comic-blog/attach-video",
        json!({ "id": 999_999, "video_url": "https://cdn.example/x.mp4" }),
        &ada_token,
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn attach_to_unknown_title_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ada@example.com").await;

    let response = post_json_auth(
        app,
        "/comic-blog/attach-video",
        json!({ "title": "Nothing here", "video_url": "https://cdn.example/x.mp4" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn attach_video_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app.clone(),
        "/comic-blog/attach-video",
        json!({ "title": "Volcanoes", "video_url": "https://cdn.example/reel.mp4" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let bad = post_json_auth(
        app,
        "/comic-blog/attach-video",
        json!({ "title": "Volcanoes", "video_url": "https://cdn.example/reel.mp4" }),
        "not-a-token",
    )
    .await;
    assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);
}
