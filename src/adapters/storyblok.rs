use crate::domain::model::{ContentVersion, Slug, Story};
use crate::domain::ports::{ConfigProvider, ContentSource};
use crate::utils::error::{PageError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

/// Storyblok hosts its Content Delivery API per region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Eu,
    Us,
    Ap,
    Ca,
    Cn,
}

impl Region {
    pub fn api_base(&self) -> &'static str {
        match self {
            Region::Eu => "https://api.storyblok.com/v1",
            Region::Us => "https://api-us.storyblok.com/v1",
            Region::Ap => "https://api-ap.storyblok.com/v1",
            Region::Ca => "https://api-ca.storyblok.com/v1",
            Region::Cn => "https://app.storyblokchina.cn/v1",
        }
    }
}

pub struct StoryblokClient {
    client: Client,
    base_url: String,
    token: String,
    version: ContentVersion,
    language: Option<String>,
}

impl StoryblokClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Region::default().api_base().to_string(),
            token: token.into(),
            version: ContentVersion::default(),
            language: None,
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.api_base().trim_end_matches('/').to_string(),
            token: config.token().to_string(),
            version: ContentVersion::default(),
            language: config.language().map(str::to_string),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Serve unpublished draft content instead of the published version.
    pub fn edit_mode(mut self) -> Self {
        self.version = ContentVersion::Draft;
        self
    }

    pub fn version(&self) -> ContentVersion {
        self.version
    }

    fn story_url(&self, slug: &Slug) -> Result<Url> {
        // `.` and `..` would be collapsed by the URL parser and hit the list endpoint
        if matches!(slug.as_str(), "." | "..") {
            return Err(PageError::InvalidSlug {
                slug: slug.to_string(),
            });
        }

        let mut url = Url::parse(&format!("{}/cdn/stories", self.base_url)).map_err(|e| {
            PageError::ConfigError {
                message: format!("Invalid API base '{}': {}", self.base_url, e),
            }
        })?;

        url.path_segments_mut()
            .map_err(|_| PageError::ConfigError {
                message: format!("API base '{}' cannot carry a path", self.base_url),
            })?
            .push(slug.as_str());

        Ok(url)
    }
}

#[async_trait]
impl ContentSource for StoryblokClient {
    async fn story_by_slug(&self, slug: &Slug) -> Result<Story> {
        let url = self.story_url(slug)?;
        tracing::debug!(
            "📡 Requesting story '{}' ({}) from {}",
            slug,
            self.version.as_query_value(),
            url
        );

        let mut request = self.client.get(url).query(&[
            ("token", self.token.as_str()),
            ("version", self.version.as_query_value()),
        ]);
        if let Some(language) = &self.language {
            request = request.query(&[("language", language.as_str())]);
        }

        // reqwest errors carry the request URL, and with it the token
        let response = request
            .send()
            .await
            .map_err(|e| PageError::ApiError(e.without_url()))?;
        let status = response.status();
        tracing::debug!("📡 Content API response status: {}", status);

        if !status.is_success() {
            return Err(PageError::UpstreamStatus {
                status: status.as_u16(),
                slug: slug.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PageError::ApiError(e.without_url()))?;
        let mut body: serde_json::Value = serde_json::from_slice(&bytes)?;
        match body.get_mut("story") {
            Some(story) if !story.is_null() => Ok(story.take()),
            _ => Err(PageError::MissingStory {
                slug: slug.to_string(),
            }),
        }
    }
}
