// src/web/handlers/preview_handlers.rs
use crate::types::Theme;
use crate::utils::file_accessible;
use crate::web::types::{ApiError, ServerState};
use rocket::fs::NamedFile;
use rocket::State;
use tracing::{info, warn};

pub const PREVIEW_NOT_FOUND: &str = "Preview not found";

/// Sample PDF for a theme from the fixed theme table
pub async fn get_preview_handler(
    name: &str,
    state: &State<ServerState>,
) -> Result<NamedFile, ApiError> {
    // Exact match only: the table keys are the lowercase theme names
    let Some(theme) = Theme::ALL.into_iter().find(|t| t.as_str() == name) else {
        warn!("Preview requested for unknown theme: {}", name);
        return Err(ApiError::not_found(PREVIEW_NOT_FOUND));
    };

    let path = state.previews_dir.join(theme.preview_filename());
    if !file_accessible(&path).await {
        warn!("Preview file missing for {}: {}", theme, path.display());
        return Err(ApiError::not_found(PREVIEW_NOT_FOUND));
    }

    info!("Serving preview for {}: {}", theme, path.display());
    NamedFile::open(&path).await.map_err(|e| {
        warn!("Failed to open preview {}: {}", path.display(), e);
        ApiError::not_found(PREVIEW_NOT_FOUND)
    })
}
