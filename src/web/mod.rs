//! HTTP surface: the rendered story list, a JSON view, health and static files.

pub mod handlers;
pub mod redirect;
pub mod render;

use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::get;
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::app::{AppContext, Result};
use crate::cache::SnapshotCache;

#[derive(Clone)]
pub struct WebState {
    pub cache: Arc<SnapshotCache>,
    pub redirect_https: bool,
    pub static_dir: PathBuf,
}

impl WebState {
    pub fn from_context(ctx: &AppContext) -> Self {
        Self {
            cache: ctx.cache.clone(),
            redirect_https: !ctx.config.is_dev(),
            static_dir: ctx.config.static_dir.clone(),
        }
    }
}

/// Build the router. `/healthz` is never redirected.
pub fn router(state: WebState) -> Router {
    let site = Router::new()
        .route("/", get(handlers::index))
        .route("/api/stories", get(handlers::stories))
        .nest_service("/static", ServeDir::new(&state.static_dir))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            redirect::redirect_to_https,
        ));

    Router::new()
        .route("/healthz", get(handlers::healthz))
        .merge(site)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on `listener` until SIGINT/SIGTERM, refreshing in the background.
///
/// The scheduler starts before the first request is accepted but does not
/// delay it; on shutdown it is stopped after the server drains.
pub async fn serve(ctx: &AppContext, listener: TcpListener) -> Result<()> {
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    let scheduler = ctx.scheduler().spawn();
    let app = router(WebState::from_context(ctx));

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    scheduler.stop().await;
    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Wait for SIGTERM or SIGINT (Ctrl+C) for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RawItem, Snapshot, Story};

    fn state(redirect_https: bool) -> WebState {
        let story = Story::from_raw(
            1,
            RawItem {
                id: Some(1),
                title: Some("Hello".into()),
                text: None,
                url: Some("https://www.example.com/hello".into()),
            },
        );
        WebState {
            cache: Arc::new(SnapshotCache::with_snapshot(Snapshot::new(vec![story], 1))),
            redirect_https,
            static_dir: PathBuf::from("static"),
        }
    }

    async fn spawn(state: WebState) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client() -> reqwest::Client {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_lists_stories() {
        let base = spawn(state(false)).await;
        let response = client().get(&base).send().await.unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body = response.text().await.unwrap();
        assert!(body.contains(r#"<a href="https://www.example.com/hello">Hello</a>"#));
        assert!(body.contains("(example.com)"));
    }

    #[tokio::test]
    async fn test_stories_json() {
        let base = spawn(state(false)).await;
        let body = client()
            .get(format!("{}/api/stories", base))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["stories"][0]["id"], 1);
        assert_eq!(value["stories"][0]["host"], "example.com");
        assert!(value["refreshed_at"].is_string());
        assert_eq!(value["scanned"], 1);
        assert!(value["stories"][0].get("text").is_none());
    }

    #[tokio::test]
    async fn test_plain_http_is_redirected() {
        let base = spawn(state(true)).await;
        let response = client()
            .get(format!("{}/some/path", base))
            .header("host", "quiethn.example")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers()["location"],
            "https://quiethn.example/some/path"
        );
    }

    #[tokio::test]
    async fn test_forwarded_https_is_served() {
        let base = spawn(state(true)).await;
        let response = client()
            .get(&base)
            .header(redirect::FORWARDED_PROTO, "https")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_healthz_is_never_redirected() {
        let base = spawn(state(true)).await;
        let response = client()
            .get(format!("{}/healthz", base))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
    }
}
