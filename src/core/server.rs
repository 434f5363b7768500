use crate::core::slug_handler::{show_home, show_page, SlugHandler};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use axum::routing::get;
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

pub fn build_router(handler: Arc<SlugHandler>) -> Router {
    Router::new()
        .route("/", get(show_home))
        .route("/{slug}", get(show_page))
        .with_state(handler)
}

pub async fn serve<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    let handler = Arc::new(SlugHandler::from_config(config)?);
    let listener = TcpListener::bind(config.bind_address()).await?;
    serve_on(listener, handler).await
}

/// Runs until Ctrl+C or SIGTERM, draining in-flight requests first.
pub async fn serve_on(listener: TcpListener, handler: Arc<SlugHandler>) -> Result<()> {
    serve_until(listener, handler, shutdown_signal()).await
}

pub async fn serve_until<F>(
    listener: TcpListener,
    handler: Arc<SlugHandler>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::info!("🚀 Serving pages on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(handler))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
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
    tracing::info!("Shutdown signal received, stopping server...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Slug, Story};
    use crate::domain::ports::{ContentSource, ViewRenderer};
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::oneshot;

    struct SlowSource;

    #[async_trait]
    impl ContentSource for SlowSource {
        async fn story_by_slug(&self, slug: &Slug) -> Result<Story> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(serde_json::json!({ "name": slug.as_str() }))
        }
    }

    struct NameView;

    impl ViewRenderer for NameView {
        fn render(&self, _view: &str, story: &Story) -> Result<String> {
            Ok(story["name"].as_str().unwrap_or_default().to_string())
        }
    }

    #[tokio::test]
    async fn test_shutdown_drains_in_flight_request() {
        let handler = Arc::new(SlugHandler::new(
            Arc::new(SlowSource),
            Arc::new(NameView),
            "index",
        ));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let server = tokio::spawn(serve_until(listener, handler, async move {
            let _ = stop_rx.await;
        }));

        let request = tokio::spawn(reqwest::get(format!("http://{}/draining", addr)));
        tokio::time::sleep(Duration::from_millis(50)).await;
        stop_tx.send(()).unwrap();

        let response = request.await.unwrap().unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.text().await.unwrap(), "draining");

        tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
    }
}
