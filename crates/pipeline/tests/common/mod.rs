//! In-memory generation service that records every call it receives.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use infocomic_core::comic::{Chapter, Comic};
use infocomic_gateway::{ComicRequest, Gateway, GatewayError, RenderedVideo, VideoRequest};

/// A call as seen by the service.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Narration(String),
    Video(VideoRequest),
    Comic(ComicRequest),
    Image(String),
    Explain { context: String, highlight: String },
}

/// A scripted reply. Errors are rebuilt on every call since
/// [`GatewayError`] is not `Clone`.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Api(String),
    Malformed(String),
}

impl<T: Clone> Reply<T> {
    fn produce(&self) -> Result<T, GatewayError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Api(message) => Err(GatewayError::Api {
                status: 500,
                message: message.clone(),
            }),
            Reply::Malformed(message) => Err(GatewayError::Malformed(message.clone())),
        }
    }
}

/// Pauses narration until released, to hold an assembly in flight.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

pub struct MockGateway {
    pub narration: Reply<String>,
    pub video: Reply<RenderedVideo>,
    pub comic: Reply<Comic>,
    /// Image replies handed out in order; an empty queue answers with a
    /// URL derived from the prompt.
    pub images: Mutex<VecDeque<Reply<String>>>,
    pub explanation: Reply<String>,
    pub gate: Option<Arc<Gate>>,
    pub calls: Mutex<Vec<Call>>,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self {
            narration: Reply::Ok("- Line one\n- Line two\n- Line three".to_string()),
            video: Reply::Ok(rendered("https://cdn.example/reel.mp4")),
            comic: Reply::Ok(comic_with_images(2)),
            images: Mutex::default(),
            explanation: Reply::Ok("An explanation".to_string()),
            gate: None,
            calls: Mutex::default(),
        }
    }
}

impl MockGateway {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn video_calls(&self) -> Vec<VideoRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Video(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn narration_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Narration(script) => Some(script),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Gateway for MockGateway {
    async fn generate_narration(&self, comic_script: &str) -> Result<String, GatewayError> {
        self.record(Call::Narration(comic_script.to_string()));
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        self.narration.produce()
    }

    async fn generate_video(&self, request: &VideoRequest) -> Result<RenderedVideo, GatewayError> {
        self.record(Call::Video(request.clone()));
        self.video.produce()
    }

    async fn generate_comic(&self, request: &ComicRequest) -> Result<Comic, GatewayError> {
        self.record(Call::Comic(request.clone()));
        self.comic.produce()
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, GatewayError> {
        self.record(Call::Image(prompt.to_string()));
        let next = self.images.lock().unwrap().pop_front();
        match next {
            Some(reply) => reply.produce(),
            None => Ok(format!("https://img.example/{}.png", prompt.replace(' ', "-"))),
        }
    }

    async fn explain_highlight(&self, context: &str, highlight: &str) -> Result<String, GatewayError> {
        self.record(Call::Explain {
            context: context.to_string(),
            highlight: highlight.to_string(),
        });
        self.explanation.produce()
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn rendered(url: &str) -> RenderedVideo {
    RenderedVideo {
        video_url: url.to_string(),
        public_id: None,
        format: None,
        duration_seconds: None,
    }
}

/// A comic whose chapters `1..=n` all carry narration and an image.
pub fn comic_with_images(n: u32) -> Comic {
    let chapters = (1..=n)
        .map(|i| {
            let mut chapter = Chapter::new(i, format!("Title {i}"));
            chapter.narration_box = Some(format!("Narration {i}"));
            chapter.image_context = format!("scene {i}");
            chapter.image_url = Some(format!("https://img.example/{i}.png"));
            chapter
        })
        .collect();
    Comic::new("Volcanoes", chapters)
}
