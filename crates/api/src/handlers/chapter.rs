//! Handlers for the `/chapter` resource: publishing and listing comic blogs.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use infocomic_core::comic::{normalize_chapters, Chapter};
use infocomic_core::error::CoreError;
use infocomic_db::models::comic_blog::{ComicBlog, CreateComicBlog};
use infocomic_db::repositories::ComicBlogRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::required;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /chapter/add-comicblogs`.
///
/// Every field is optional at the JSON level so that omissions are reported
/// as validation errors.
#[derive(Debug, Deserialize)]
pub struct AddComicBlogRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub chapters: Option<Vec<Chapter>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicBlogCreated {
    pub message: &'static str,
    pub comic_blog: ComicBlog,
}

#[derive(Debug, Serialize)]
pub struct ComicBlogList {
    pub blogs: Vec<ComicBlog>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /chapter/add-comicblogs
///
/// Chapters missing a number take their 1-based position; missing titles
/// become `"Chapter {n}"`. Duplicate titles are accepted.
pub async fn add_comic_blog(
    State(state): State<AppState>,
    Json(input): Json<AddComicBlogRequest>,
) -> AppResult<(StatusCode, Json<ComicBlogCreated>)> {
    let title = required("title", input.title.as_deref())?;
    let email = required("email", input.email.as_deref())?;
    let mut chapters = input.chapters.unwrap_or_default();
    if chapters.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "chapters must contain at least one chapter".into(),
        )));
    }
    normalize_chapters(&mut chapters);

    let blog = ComicBlogRepo::create(
        &state.pool,
        &CreateComicBlog {
            title,
            email,
            chapters,
        },
    )
    .await?;

    tracing::info!(
        blog_id = blog.id,
        title = %blog.title,
        chapters = blog.chapters.0.len(),
        "Comic blog created",
    );

    Ok((
        StatusCode::CREATED,
        Json(ComicBlogCreated {
            message: "Comic blog created successfully",
            comic_blog: blog,
        }),
    ))
}

/// POST /chapter/get-comicblogs
pub async fn list_comic_blogs(State(state): State<AppState>) -> AppResult<Json<ComicBlogList>> {
    let blogs = ComicBlogRepo::list(&state.pool).await?;
    Ok(Json(ComicBlogList { blogs }))
}
