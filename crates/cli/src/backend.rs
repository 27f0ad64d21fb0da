//! Client for the InfoComic backend API.

use anyhow::{bail, Context as _};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use infocomic_core::comic::{Chapter, Comic};
use infocomic_core::types::DbId;
use infocomic_core::user::AuthResponse;

/// A comic blog as stored by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct BlogRecord {
    pub id: DbId,
    pub title: String,
    pub email: String,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub video_url: Option<String>,
}

impl BlogRecord {
    pub fn into_comic(self) -> Comic {
        let mut comic = Comic::new(self.title, self.chapters);
        comic.video_reference = self.video_url;
        comic
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComicBlogBody {
    comic_blog: BlogRecord,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComicBlogsBody {
    comic_blogs: Vec<BlogRecord>,
}

#[derive(Deserialize)]
struct BlogList {
    blogs: Vec<BlogRecord>,
}

pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
        domains: &[String],
        education_level: Option<&str>,
    ) -> anyhow::Result<AuthResponse> {
        let body = json!({
            "email": email,
            "password": password,
            "first_name": first_name,
            "last_name": last_name,
            "domains": domains,
            "education_level": education_level,
        });
        self.post("/user/auth/register", &body, None).await
    }

    pub async fn login(&self, email: &str, password: &str) -> anyhow::Result<AuthResponse> {
        let body = json!({ "email": email, "password": password });
        self.post("/user/auth/login", &body, None).await
    }

    /// Publish `comic` under `title`, owned by `email`.
    pub async fn publish(&self, title: &str, email: &str, comic: &Comic) -> anyhow::Result<BlogRecord> {
        let body = json!({
            "title": title,
            "email": email,
            "chapters": comic.chapters,
        });
        let created: ComicBlogBody = self.post("/chapter/add-comicblogs", &body, None).await?;
        Ok(created.comic_blog)
    }

    pub async fn list_blogs(&self) -> anyhow::Result<Vec<BlogRecord>> {
        let list: BlogList = self.post("/chapter/get-comicblogs", &json!({}), None).await?;
        Ok(list.blogs)
    }

    pub async fn get_blog(&self, title: &str) -> anyhow::Result<BlogRecord> {
        let body: ComicBlogBody = self
            .post("/comic-blog/get-comic-blog", &json!({ "title": title }), None)
            .await?;
        Ok(body.comic_blog)
    }

    pub async fn user_blogs(&self, email: &str) -> anyhow::Result<Vec<BlogRecord>> {
        let body: ComicBlogsBody = self
            .post("/comic-blog/get-user-comic-blogs", &json!({ "email": email }), None)
            .await?;
        Ok(body.comic_blogs)
    }

    /// Attach a reel to the blog with `id`. The token must belong to its owner.
    pub async fn attach_video(
        &self,
        token: &str,
        id: DbId,
        video_url: &str,
    ) -> anyhow::Result<BlogRecord> {
        let body = json!({ "id": id, "video_url": video_url });
        let updated: ComicBlogBody = self
            .post("/comic-blog/attach-video", &body, Some(token))
            .await?;
        Ok(updated.comic_blog)
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
        token: Option<&str>,
    ) -> anyhow::Result<T> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.client.post(&url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(%url, "Calling backend");
        let response = request
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;
        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .with_context(|| format!("decode response from {url}"))?;

        if !status.is_success() {
            let message = payload
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("request failed");
            bail!("backend returned {status}: {message}");
        }
        serde_json::from_value(payload).with_context(|| format!("unexpected response from {url}"))
    }
}
