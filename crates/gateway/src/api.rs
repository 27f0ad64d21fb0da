//! REST client for the generation service endpoints.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use infocomic_core::comic::Comic;

use crate::error::GatewayError;
use crate::messages::{
    ComicReply, ComicRequest, ErrorBody, ExplainReply, ExplainRequest, ImageReply, ImageRequest,
    NarrationReply, NarrationRequest, RenderedVideo, VideoReply, VideoRequest,
};
use crate::Gateway;

/// Connection settings for the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base HTTP URL, e.g. `http://localhost:5001`.
    pub api_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl GatewayConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for a single generation service.
#[derive(Debug, Clone)]
pub struct GatewayApi {
    client: reqwest::Client,
    api_url: String,
}

impl GatewayApi {
    /// Build a client from `config`. A trailing slash on the URL is ignored.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, &config.api_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    // ---- private helpers ----

    /// POST `body` as JSON to `path` and decode the reply, returning it with
    /// the response status.
    async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(u16, R), GatewayError> {
        tracing::debug!(endpoint = path, "Calling generation service");

        let response = self
            .client
            .post(format!("{}{path}", self.api_url))
            .json(body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let status = response.status().as_u16();
        let reply = Self::parse_response(response).await?;
        Ok((status, reply))
    }

    /// Ensure the response has a success status code. On failure the
    /// service's `{error}` text is used as the message when present,
    /// otherwise the raw body.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.message())
                .unwrap_or(body);
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    /// Decode a successful JSON body. A body that does not fit the expected
    /// shape is [`GatewayError::Malformed`], not a transport failure.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::Malformed(e.to_string()))
    }
}

impl Gateway for GatewayApi {
    async fn generate_narration(&self, comic_script: &str) -> Result<String, GatewayError> {
        let (status, reply): (_, NarrationReply) = self
            .post("/generate_short_narration", &NarrationRequest { comic_script })
            .await?;
        reply.into_result(status)
    }

    async fn generate_video(&self, request: &VideoRequest) -> Result<RenderedVideo, GatewayError> {
        let (status, reply): (_, VideoReply) = self.post("/generate_video", request).await?;
        reply.into_result(status)
    }

    async fn generate_comic(&self, request: &ComicRequest) -> Result<Comic, GatewayError> {
        let (status, reply): (_, ComicReply) = self.post("/generate_comic", request).await?;
        reply.into_result(status)
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, GatewayError> {
        let (status, reply): (_, ImageReply) = self
            .post("/generate_image", &ImageRequest { prompt })
            .await?;
        reply.into_result(status)
    }

    async fn explain_highlight(
        &self,
        context: &str,
        highlight: &str,
    ) -> Result<String, GatewayError> {
        let (status, reply): (_, ExplainReply) = self
            .post("/explain_highlight", &ExplainRequest { context, highlight })
            .await?;
        reply.into_result(status)
    }
}
