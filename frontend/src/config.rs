//! Where API requests go. A release build is served by the backend itself
//! (`STATIC_DIR`), so its requests stay on the same origin.

/// `STUDIO_API_URL` at build time wins. Otherwise debug builds talk to the
/// backend on its default bind address, since the dev server runs elsewhere.
pub fn get_backend_url() -> &'static str {
    match option_env!("STUDIO_API_URL") {
        Some(url) => url.trim_end_matches('/'),
        None if cfg!(debug_assertions) => "http://localhost:3000",
        None => "",
    }
}
