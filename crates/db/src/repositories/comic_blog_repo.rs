//! Repository for the `comic_blogs` table.

use infocomic_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::comic_blog::{ComicBlog, CreateComicBlog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, email, chapters, video_url, created_at, updated_at";

/// Provides create and lookup operations for comic blogs.
///
/// Titles are not unique. Lookups by title return the earliest created match.
pub struct ComicBlogRepo;

impl ComicBlogRepo {
    /// Insert a new comic blog, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateComicBlog) -> Result<ComicBlog, sqlx::Error> {
        let query = format!(
            "INSERT INTO comic_blogs (title, email, chapters)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ComicBlog>(&query)
            .bind(&input.title)
            .bind(&input.email)
            .bind(Json(&input.chapters))
            .fetch_one(pool)
            .await
    }

    /// List every comic blog in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<ComicBlog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comic_blogs ORDER BY created_at, id");
        sqlx::query_as::<_, ComicBlog>(&query).fetch_all(pool).await
    }

    /// Find the first comic blog with the given title.
    pub async fn find_by_title(
        pool: &PgPool,
        title: &str,
    ) -> Result<Option<ComicBlog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comic_blogs WHERE title = $1 ORDER BY created_at, id LIMIT 1"
        );
        sqlx::query_as::<_, ComicBlog>(&query)
            .bind(title)
            .fetch_optional(pool)
            .await
    }

    /// Find a comic blog by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ComicBlog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comic_blogs WHERE id = $1");
        sqlx::query_as::<_, ComicBlog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the most recently created blog with `title` owned by `email`.
    ///
    /// Titles repeat across owners, and an owner may publish one title more
    /// than once; the newest copy is the one a freshly built reel belongs to.
    pub async fn find_owned_by_title(
        pool: &PgPool,
        title: &str,
        email: &str,
    ) -> Result<Option<ComicBlog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comic_blogs
             WHERE title = $1 AND email = $2
             ORDER BY created_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, ComicBlog>(&query)
            .bind(title)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List the comic blogs owned by an email, in creation order.
    pub async fn list_by_email(pool: &PgPool, email: &str) -> Result<Vec<ComicBlog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comic_blogs WHERE email = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, ComicBlog>(&query)
            .bind(email)
            .fetch_all(pool)
            .await
    }

    /// Set the reel video URL on a blog.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn attach_video(
        pool: &PgPool,
        id: DbId,
        video_url: &str,
    ) -> Result<Option<ComicBlog>, sqlx::Error> {
        let query = format!(
            "UPDATE comic_blogs SET video_url = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ComicBlog>(&query)
            .bind(id)
            .bind(video_url)
            .fetch_optional(pool)
            .await
    }
}
