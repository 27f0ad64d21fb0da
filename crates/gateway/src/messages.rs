//! Request and response bodies of the generation service.
//!
//! Every endpoint answers either with its payload or with `{"error": ...}`.
//! Replies are decoded into untagged enums and then checked, so callers only
//! ever see fully-formed values.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use infocomic_core::comic::Comic;

use crate::error::GatewayError;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of `POST /generate_short_narration`.
#[derive(Debug, Clone, Serialize)]
pub struct NarrationRequest<'a> {
    /// The sanitized comic serialized as one JSON string.
    pub comic_script: &'a str,
}

/// Body of `POST /generate_video`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRequest {
    pub texts: Vec<String>,
    pub image_urls: Vec<String>,
    pub subtitle_style: String,
    pub output_filename: String,
}

/// Body of `POST /generate_comic`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComicRequest {
    pub topic: String,
    pub domain: String,
    pub complexity: String,
    pub age: String,
    pub education: String,
    pub style: String,
}

impl ComicRequest {
    /// A request for `topic` with every other field at its default.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            domain: "general".to_string(),
            complexity: "medium".to_string(),
            age: "teens".to_string(),
            education: "middle_school".to_string(),
            style: "educational".to_string(),
        }
    }
}

/// Body of `POST /generate_image`.
#[derive(Debug, Clone, Serialize)]
pub struct ImageRequest<'a> {
    pub prompt: &'a str,
}

/// Body of `POST /explain_highlight`.
#[derive(Debug, Clone, Serialize)]
pub struct ExplainRequest<'a> {
    pub context: &'a str,
    pub highlight: &'a str,
}

// ---------------------------------------------------------------------------
// Replies
// ---------------------------------------------------------------------------

/// `{"error": ...}` body. The value is usually a string but is not
/// guaranteed to be one. `"error": null` is not an error, so a payload
/// carrying it falls through to the success variant.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(deserialize_with = "non_null")]
    pub error: Value,
}

fn non_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Err(serde::de::Error::custom("error is null")),
        value => Ok(value),
    }
}

impl ErrorBody {
    pub fn message(&self) -> String {
        match &self.error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum NarrationReply {
    Failed(ErrorBody),
    Narration { narration: String },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum VideoReply {
    Failed(ErrorBody),
    Rendered {
        #[serde(default)]
        success: bool,
        #[serde(default)]
        video_url: Option<String>,
        #[serde(default)]
        cloudinary_public_id: Option<String>,
        #[serde(default)]
        format: Option<String>,
        #[serde(default)]
        duration: Option<f64>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ComicReply {
    Failed(ErrorBody),
    Comic(Comic),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ImageReply {
    Failed(ErrorBody),
    Image { image_url: String },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ExplainReply {
    Failed(ErrorBody),
    Explained { explanation: String },
}

// ---------------------------------------------------------------------------
// Validated values
// ---------------------------------------------------------------------------

/// A video the service reports as rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedVideo {
    pub video_url: String,
    pub public_id: Option<String>,
    pub format: Option<String>,
    pub duration_seconds: Option<f64>,
}

fn failed(status: u16, body: ErrorBody) -> GatewayError {
    GatewayError::Api {
        status,
        message: body.message(),
    }
}

fn non_blank(value: String, what: &str) -> Result<String, GatewayError> {
    if value.trim().is_empty() {
        Err(GatewayError::Malformed(format!("{what} is empty")))
    } else {
        Ok(value)
    }
}

impl NarrationReply {
    pub fn into_result(self, status: u16) -> Result<String, GatewayError> {
        match self {
            Self::Failed(body) => Err(failed(status, body)),
            Self::Narration { narration } => Ok(narration),
        }
    }
}

impl VideoReply {
    pub fn into_result(self, status: u16) -> Result<RenderedVideo, GatewayError> {
        match self {
            Self::Failed(body) => Err(failed(status, body)),
            Self::Rendered { success: false, .. } => Err(GatewayError::Malformed(
                "Video service did not report success".to_string(),
            )),
            Self::Rendered {
                video_url,
                cloudinary_public_id,
                format,
                duration,
                ..
            } => {
                let video_url = video_url
                    .filter(|url| !url.trim().is_empty())
                    .ok_or_else(|| GatewayError::Malformed("Response has no video_url".to_string()))?;
                Ok(RenderedVideo {
                    video_url,
                    public_id: cloudinary_public_id.filter(|id| !id.trim().is_empty()),
                    format: format.filter(|f| !f.trim().is_empty()),
                    duration_seconds: duration,
                })
            }
        }
    }
}

impl ComicReply {
    pub fn into_result(self, status: u16) -> Result<Comic, GatewayError> {
        match self {
            Self::Failed(body) => Err(failed(status, body)),
            Self::Comic(comic) if comic.chapters.is_empty() => Err(GatewayError::Malformed(
                "Generated comic has no chapters".to_string(),
            )),
            Self::Comic(mut comic) => {
                comic.normalize();
                Ok(comic)
            }
        }
    }
}

impl ImageReply {
    pub fn into_result(self, status: u16) -> Result<String, GatewayError> {
        match self {
            Self::Failed(body) => Err(failed(status, body)),
            Self::Image { image_url } => non_blank(image_url, "image_url"),
        }
    }
}

impl ExplainReply {
    pub fn into_result(self, status: u16) -> Result<String, GatewayError> {
        match self {
            Self::Failed(body) => Err(failed(status, body)),
            Self::Explained { explanation } => Ok(explanation),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
