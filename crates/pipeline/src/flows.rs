//! Comic generation, image back-fill and hover-term explanations.

use infocomic_core::comic::Comic;
use infocomic_core::presentation::clean_term;
use infocomic_core::theme::ComicStyle;
use infocomic_gateway::{ComicRequest, Gateway, GatewayError};

use crate::session::SessionContext;

/// Errors from the comic flows.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// The request was rejected before contacting the service.
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Image back-fill stopped early. Images generated before the failure
    /// are kept on the comic.
    #[error("Image generation stopped at chapter {chapter_number} after {generated} image(s): {source}")]
    ImageFill {
        chapter_number: u32,
        generated: usize,
        source: GatewayError,
    },
}

/// Generate a comic and make it the session's current comic.
///
/// `style` overrides the display style; without it the style is guessed
/// from the topic.
pub async fn generate_comic<'s, G: Gateway>(
    gateway: &G,
    session: &'s mut SessionContext,
    request: &ComicRequest,
    style: Option<ComicStyle>,
) -> Result<&'s Comic, FlowError> {
    if request.topic.trim().is_empty() {
        return Err(FlowError::Validation("Topic is required".to_string()));
    }

    tracing::info!(topic = %request.topic, "Generating comic");
    let mut comic = gateway.generate_comic(request).await?;

    if comic.topic.trim().is_empty() {
        comic.topic = request.topic.clone();
    }
    comic.style = Some(style.unwrap_or_else(|| ComicStyle::guess_from_topic(&comic.topic)));

    tracing::info!(
        topic = %comic.topic,
        chapters = comic.chapters.len(),
        pending_images = comic.pending_images().count(),
        "Comic generated",
    );

    Ok(session.set_comic(comic))
}

/// Generate images for every chapter that describes one but has none yet.
///
/// Chapters are processed one at a time in order. Returns the number of
/// images generated.
pub async fn fill_missing_images<G: Gateway>(
    gateway: &G,
    comic: &mut Comic,
) -> Result<usize, FlowError> {
    let pending: Vec<usize> = comic.pending_images().map(|(index, _)| index).collect();
    let mut generated = 0;

    for index in pending {
        let chapter = &mut comic.chapters[index];
        match gateway.generate_image(&chapter.image_context).await {
            Ok(url) => {
                tracing::debug!(chapter = chapter.chapter_number, "Chapter image generated");
                chapter.image_url = Some(url);
                generated += 1;
            }
            Err(source) => {
                tracing::warn!(
                    chapter = chapter.chapter_number,
                    generated,
                    error = %source,
                    "Chapter image generation failed",
                );
                return Err(FlowError::ImageFill {
                    chapter_number: chapter.chapter_number,
                    generated,
                    source,
                });
            }
        }
    }

    tracing::info!(topic = %comic.topic, generated, "Chapter images filled");
    Ok(generated)
}

/// Explain a hovered word in the context of the text around it.
///
/// Surrounding punctuation is stripped from `word` first.
pub async fn explain_term<G: Gateway>(
    gateway: &G,
    context: &str,
    word: &str,
) -> Result<String, FlowError> {
    let term = clean_term(word);
    if term.is_empty() {
        return Err(FlowError::Validation(format!(
            "'{word}' has no word to explain"
        )));
    }
    Ok(gateway.explain_highlight(context, term).await?)
}
