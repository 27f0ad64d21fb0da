//! Client session state.

use serde::{Deserialize, Serialize};

use infocomic_core::comic::Comic;
use infocomic_core::reel::VideoResult;
use infocomic_core::user::{AuthResponse, PublicUser};

/// Everything the client remembers between commands: the current comic, the
/// last reel built from it, and who is signed in.
///
/// Flows mutate it only after a remote call succeeds, so a failure leaves
/// the previous state in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    #[serde(default)]
    pub comic: Option<Comic>,
    #[serde(default)]
    pub generated_video: Option<VideoResult>,
    #[serde(default)]
    pub user: Option<PublicUser>,
    #[serde(default)]
    pub token: Option<String>,
}

impl SessionContext {
    /// Make `comic` current. A reel cached for a previous comic is dropped.
    pub fn set_comic(&mut self, comic: Comic) -> &Comic {
        self.generated_video = None;
        self.comic.insert(comic)
    }

    /// Cache a finished reel and point the current comic at it.
    pub fn record_video(&mut self, video: VideoResult) {
        if let Some(comic) = self.comic.as_mut() {
            comic.video_reference = Some(video.url.clone());
        }
        self.generated_video = Some(video);
    }

    pub fn sign_in(&mut self, auth: AuthResponse) {
        self.user = Some(auth.user);
        self.token = Some(auth.token);
    }

    pub fn sign_out(&mut self) {
        self.user = None;
        self.token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}
