use std::io::ErrorKind;
use std::sync::Arc;
use axum::{
    extract::{Path, State},
    Json,
};
use studio_shared::{ContentOverrides, Locale};

use crate::AppState;

/// Serves `CONTENT_DIR/{locale}.json`. The frontend has built-in text for
/// every key, so any problem here degrades to an empty set of overrides.
pub async fn get_content(
    State(state): State<Arc<AppState>>,
    Path(locale): Path<String>,
) -> Json<ContentOverrides> {
    let locale = Locale::from_tag(&locale);
    let Some(dir) = state.config.content_dir.as_ref() else {
        return Json(ContentOverrides::new());
    };

    let path = dir.join(format!("{}.json", locale.code()));
    let raw = match tokio::fs::read_to_string(&path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Json(ContentOverrides::new()),
        Err(e) => {
            tracing::error!("Failed to read content file {}: {}", path.display(), e);
            return Json(ContentOverrides::new());
        }
    };

    match serde_json::from_str::<ContentOverrides>(&raw) {
        Ok(overrides) => Json(overrides),
        Err(e) => {
            tracing::error!("Malformed content file {}: {}", path.display(), e);
            Json(ContentOverrides::new())
        }
    }
}
