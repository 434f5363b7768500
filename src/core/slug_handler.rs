use crate::adapters::storyblok::StoryblokClient;
use crate::adapters::views::MiniJinjaViews;
use crate::domain::model::Slug;
use crate::domain::ports::{ConfigProvider, ContentSource, ViewRenderer};
use crate::utils::error::{PageError, Result};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;

const ERROR_PAGE: &str = "<!DOCTYPE html><html><head><title>Server Error</title></head>\
<body><h1>500 | Server Error</h1></body></html>";

/// Maps a slug to a story lookup and a view render.
pub struct SlugHandler {
    content: Arc<dyn ContentSource>,
    views: Arc<dyn ViewRenderer>,
    view: String,
}

impl SlugHandler {
    pub fn new(
        content: Arc<dyn ContentSource>,
        views: Arc<dyn ViewRenderer>,
        view: impl Into<String>,
    ) -> Self {
        Self {
            content,
            views,
            view: view.into(),
        }
    }

    /// Draft content is always served; the client is put in edit mode unconditionally.
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let content = StoryblokClient::from_config(config)?.edit_mode();

        let views = match config.template_dir() {
            Some(dir) => MiniJinjaViews::from_dir(dir),
            None => MiniJinjaViews::builtin()?,
        };

        Ok(Self::new(Arc::new(content), Arc::new(views), config.view()))
    }

    pub async fn handle(&self, slug: &Slug) -> Result<String> {
        let story = self.content.story_by_slug(slug).await?;
        self.views.render(&self.view, &story)
    }

    async fn respond(&self, slug: Slug) -> Response {
        match self.handle(&slug).await {
            Ok(html) => {
                tracing::info!("📄 Rendered '{}' with view '{}'", slug, self.view);
                Html(html).into_response()
            }
            Err(e) => {
                tracing::error!(
                    "❌ Request for '{}' failed: {} (Category: {:?}, Severity: {:?})",
                    slug,
                    e,
                    e.category(),
                    e.severity()
                );
                e.into_response()
            }
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Html(ERROR_PAGE)).into_response()
    }
}

pub async fn show_home(State(handler): State<Arc<SlugHandler>>) -> Response {
    handler.respond(Slug::default()).await
}

pub async fn show_page(
    State(handler): State<Arc<SlugHandler>>,
    Path(slug): Path<String>,
) -> Response {
    handler.respond(Slug::from_path(Some(slug))).await
}
