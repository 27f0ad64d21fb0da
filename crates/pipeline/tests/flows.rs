//! Comic generation, image back-fill and term explanation flows.

mod common;

use assert_matches::assert_matches;
use common::{comic_with_images, Call, MockGateway, Reply};
use infocomic_core::theme::ComicStyle;
use infocomic_gateway::{ComicRequest, GatewayError};
use infocomic_pipeline::flows::{explain_term, fill_missing_images, generate_comic};
use infocomic_pipeline::{FlowError, SessionContext};

// ---------------------------------------------------------------------------
// generate_comic
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generated_comic_becomes_current_with_guessed_style() {
    let mut comic = comic_with_images(2);
    comic.topic = "Ninja history".into();
    let gateway = MockGateway {
        comic: Reply::Ok(comic),
        ..MockGateway::default()
    };
    let mut session = SessionContext::default();

    let stored = generate_comic(&gateway, &mut session, &ComicRequest::new("Ninja history"), None)
        .await
        .unwrap();
    assert_eq!(stored.style, Some(ComicStyle::Manga));

    assert_eq!(session.comic.as_ref().unwrap().topic, "Ninja history");
    assert_matches!(&gateway.calls()[0], Call::Comic(request) if request.domain == "general");
}

#[tokio::test]
async fn explicit_style_wins_and_blank_topic_is_filled() {
    let mut comic = comic_with_images(1);
    comic.topic = String::new();
    let gateway = MockGateway {
        comic: Reply::Ok(comic),
        ..MockGateway::default()
    };
    let mut session = SessionContext::default();

    let stored = generate_comic(
        &gateway,
        &mut session,
        &ComicRequest::new("Batman"),
        Some(ComicStyle::Indie),
    )
    .await
    .unwrap();

    assert_eq!(stored.topic, "Batman");
    assert_eq!(stored.style, Some(ComicStyle::Indie));
}

#[tokio::test]
async fn blank_topic_is_rejected_before_any_call() {
    let gateway = MockGateway::default();
    let mut session = SessionContext::default();

    let err = generate_comic(&gateway, &mut session, &ComicRequest::new("   "), None)
        .await
        .unwrap_err();

    assert_matches!(err, FlowError::Validation(_));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn failed_generation_keeps_previous_comic() {
    let gateway = MockGateway {
        comic: Reply::Api("quota exceeded".into()),
        ..MockGateway::default()
    };
    let mut session = SessionContext::default();
    session.set_comic(comic_with_images(1));
    let before = session.clone();

    let err = generate_comic(&gateway, &mut session, &ComicRequest::new("Bees"), None)
        .await
        .unwrap_err();

    assert_matches!(err, FlowError::Gateway(GatewayError::Api { .. }));
    assert_eq!(session, before);
}

// ---------------------------------------------------------------------------
// fill_missing_images
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fills_only_pending_chapters_in_order() {
    let gateway = MockGateway::default();
    let mut comic = comic_with_images(3);
    comic.chapters[0].image_url = None;
    comic.chapters[2].image_url = None;

    let generated = fill_missing_images(&gateway, &mut comic).await.unwrap();

    assert_eq!(generated, 2);
    assert_eq!(
        gateway.calls(),
        vec![Call::Image("scene 1".into()), Call::Image("scene 3".into())]
    );
    assert_eq!(
        comic.chapters[0].image(),
        Some("https://img.example/scene-1.png")
    );
    assert_eq!(comic.chapters[1].image(), Some("https://img.example/2.png"));
    assert_eq!(comic.pending_images().count(), 0);
}

#[tokio::test]
async fn stops_at_first_failure_keeping_earlier_images() {
    let gateway = MockGateway::default();
    gateway.images.lock().unwrap().extend([
        Reply::Ok("https://img.example/first.png".to_string()),
        Reply::Api("image model unavailable".to_string()),
    ]);
    let mut comic = comic_with_images(3);
    for chapter in &mut comic.chapters {
        chapter.image_url = None;
    }

    let err = fill_missing_images(&gateway, &mut comic).await.unwrap_err();

    assert_matches!(
        err,
        FlowError::ImageFill { chapter_number: 2, generated: 1, .. }
    );
    assert_eq!(gateway.calls().len(), 2);
    assert_eq!(comic.chapters[0].image(), Some("https://img.example/first.png"));
    assert!(comic.chapters[1].is_pending_image());
    assert!(comic.chapters[2].is_pending_image());
}

#[tokio::test]
async fn chapters_without_image_context_are_skipped() {
    let gateway = MockGateway::default();
    let mut comic = comic_with_images(2);
    comic.chapters[0].image_url = None;
    comic.chapters[0].image_context = "  ".into();

    let generated = fill_missing_images(&gateway, &mut comic).await.unwrap();
    assert_eq!(generated, 0);
    assert!(gateway.calls().is_empty());
}

// ---------------------------------------------------------------------------
// explain_term
// ---------------------------------------------------------------------------

#[tokio::test]
async fn explain_strips_punctuation() {
    let gateway = MockGateway::default();

    let text = explain_term(&gateway, "Magma rises, slowly.", "rises,")
        .await
        .unwrap();

    assert_eq!(text, "An explanation");
    assert_eq!(
        gateway.calls(),
        vec![Call::Explain {
            context: "Magma rises, slowly.".into(),
            highlight: "rises".into()
        }]
    );
}

#[tokio::test]
async fn explain_rejects_punctuation_only() {
    let gateway = MockGateway::default();
    let err = explain_term(&gateway, "...", "...").await.unwrap_err();
    assert_matches!(err, FlowError::Validation(_));
    assert!(gateway.calls().is_empty());
}
