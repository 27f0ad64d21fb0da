//! Handlers for the `/comic-blog` resource: lookups and reel attachment.

use axum::extract::State;
use axum::Json;
use infocomic_core::error::CoreError;
use infocomic_core::types::DbId;
use infocomic_db::models::comic_blog::ComicBlog;
use infocomic_db::repositories::ComicBlogRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::required;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TitleRequest {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    #[serde(default)]
    pub email: Option<String>,
}

/// Request body for `POST /comic-blog/attach-video`.
///
/// `id` names the blog exactly; without it the caller's newest blog with
/// `title` is used.
#[derive(Debug, Deserialize)]
pub struct AttachVideoRequest {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicBlogBody {
    pub comic_blog: ComicBlog,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicBlogsBody {
    pub comic_blogs: Vec<ComicBlog>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /comic-blog/get-comic-blog
///
/// Returns the earliest blog with the given title.
pub async fn get_comic_blog(
    State(state): State<AppState>,
    Json(input): Json<TitleRequest>,
) -> AppResult<Json<ComicBlogBody>> {
    let title = required("title", input.title.as_deref())?;
    let comic_blog = find_by_title(&state, &title).await?;
    Ok(Json(ComicBlogBody { comic_blog }))
}

/// POST /comic-blog/get-user-comic-blogs
pub async fn get_user_comic_blogs(
    State(state): State<AppState>,
    Json(input): Json<EmailRequest>,
) -> AppResult<Json<ComicBlogsBody>> {
    let email = required("email", input.email.as_deref())?;
    let comic_blogs = ComicBlogRepo::list_by_email(&state.pool, &email).await?;
    Ok(Json(ComicBlogsBody { comic_blogs }))
}

/// POST /comic-blog/attach-video
///
/// Only the blog's owner (matched by email) may attach a reel. Titles are
/// not unique, so a title lookup only considers the caller's own blogs.
pub async fn attach_video(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<AttachVideoRequest>,
) -> AppResult<Json<ComicBlogBody>> {
    let video_url = required("video_url", input.video_url.as_deref())?;

    let blog = match input.id {
        Some(id) => {
            let blog = ComicBlogRepo::find_by_id(&state.pool, id)
                .await?
                .ok_or_else(|| not_found(&id.to_string()))?;
            if blog.email != auth_user.email {
                return Err(not_owner());
            }
            blog
        }
        None => {
            let title = required("title", input.title.as_deref())?;
            let owned =
                ComicBlogRepo::find_owned_by_title(&state.pool, &title, &auth_user.email).await?;
            match owned {
                Some(blog) => blog,
                // Someone else's blog under this title is a 403, no blog at all a 404.
                None => {
                    find_by_title(&state, &title).await?;
                    return Err(not_owner());
                }
            }
        }
    };

    let comic_blog = ComicBlogRepo::attach_video(&state.pool, blog.id, &video_url)
        .await?
        .ok_or_else(|| not_found(&blog.title))?;

    tracing::info!(
        blog_id = comic_blog.id,
        user_id = auth_user.user_id,
        "Reel attached to comic blog",
    );

    Ok(Json(ComicBlogBody { comic_blog }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_by_title(state: &AppState, title: &str) -> AppResult<ComicBlog> {
    ComicBlogRepo::find_by_title(&state.pool, title)
        .await?
        .ok_or_else(|| not_found(title))
}

fn not_found(key: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ComicBlog",
        key: key.to_string(),
    })
}

fn not_owner() -> AppError {
    AppError::Core(CoreError::Forbidden(
        "Only the owner can attach a video to this comic blog".into(),
    ))
}
