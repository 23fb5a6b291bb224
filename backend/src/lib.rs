use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use studio_shared::PriceTable;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod config;
pub mod error;
pub mod handlers {
    pub mod contact_handlers;
    pub mod content_handlers;
    pub mod estimate_handlers;
}
pub mod utils {
    pub mod mailer;
    pub mod rate_limit;
}

use config::Config;
use handlers::{contact_handlers, content_handlers, estimate_handlers};
use utils::mailer::{ContactSink, LogSink, SmtpSink};
use utils::rate_limit::ContactLimiter;

pub struct AppState {
    pub config: Config,
    pub price_table: PriceTable,
    pub contact_sink: Arc<dyn ContactSink>,
    pub contact_limiter: ContactLimiter,
}

impl AppState {
    pub fn new(config: Config, price_table: PriceTable, contact_sink: Arc<dyn ContactSink>) -> Self {
        let contact_limiter = ContactLimiter::per_minute(config.contact_rate_per_minute);
        Self {
            config,
            price_table,
            contact_sink,
            contact_limiter,
        }
    }

    /// Wires up state from config: price table file and mail delivery.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let price_table = config.load_price_table()?;
        let contact_sink: Arc<dyn ContactSink> = match &config.smtp {
            Some(smtp) => {
                tracing::info!("Delivering contact requests to {} via {}", smtp.inbox, smtp.host);
                Arc::new(SmtpSink::new(smtp)?)
            }
            None => {
                tracing::warn!("SMTP not configured, contact requests will only be logged");
                Arc::new(LogSink)
            }
        };
        Ok(Self::new(config, price_table, contact_sink))
    }
}

async fn health_check() -> &'static str {
    "OK"
}

fn cors_layer(frontend_url: Option<&str>) -> CorsLayer {
    let origin = match frontend_url.and_then(|url| HeaderValue::from_str(url.trim_end_matches('/')).ok()) {
        Some(origin) => AllowOrigin::exact(origin),
        None => AllowOrigin::from(Any),
    };
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(origin)
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_TYPE])
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/contact", post(contact_handlers::submit_contact))
        .route("/api/estimate", post(estimate_handlers::estimate))
        .route("/api/pricing", get(estimate_handlers::get_price_table))
        .route("/api/content/{locale}", get(content_handlers::get_content));

    // Built frontend; unknown paths get index.html so client-side routes work on reload.
    if let Some(dir) = &state.config.static_dir {
        let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        app = app.fallback_service(spa);
    }

    app.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
    .layer(cors_layer(state.config.frontend_url.as_deref()))
    .with_state(state)
}
