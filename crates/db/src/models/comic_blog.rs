//! Comic blog entity model and DTOs.

use infocomic_core::comic::{Chapter, Comic};
use infocomic_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `comic_blogs` table.
///
/// Serializes directly as the API representation; `chapters` is emitted as a
/// plain JSON array.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ComicBlog {
    pub id: DbId,
    pub title: String,
    pub email: String,
    pub chapters: Json<Vec<Chapter>>,
    pub video_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ComicBlog {
    /// The stored blog as a comic the client can render or assemble.
    pub fn to_comic(&self) -> Comic {
        let mut comic = Comic::new(self.title.clone(), self.chapters.0.clone());
        comic.video_reference = self.video_url.clone();
        comic
    }
}

/// DTO for creating a comic blog. Chapters should already be normalized.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComicBlog {
    pub title: String,
    pub email: String,
    pub chapters: Vec<Chapter>,
}
