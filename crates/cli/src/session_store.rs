//! Session persistence between CLI invocations.

use std::path::Path;

use anyhow::Context as _;
use infocomic_pipeline::SessionContext;

/// Load the session at `path`. A missing file is an empty session.
pub fn load(path: &Path) -> anyhow::Result<SessionContext> {
    if !path.exists() {
        return Ok(SessionContext::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read session '{}'", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse session '{}'", path.display()))
}

/// Write `session` to `path`, creating parent directories as needed.
pub fn save(path: &Path, session: &SessionContext) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create session dir '{}'", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(session)?;
    std::fs::write(path, json).with_context(|| format!("write session '{}'", path.display()))
}
