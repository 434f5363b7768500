use crate::domain::model::{Slug, Story};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> String;
    fn api_base(&self) -> String;
    fn token(&self) -> &str;
    fn timeout(&self) -> Duration;
    fn language(&self) -> Option<&str>;
    fn template_dir(&self) -> Option<&str>;
    fn view(&self) -> &str;
}

#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn story_by_slug(&self, slug: &Slug) -> Result<Story>;
}

pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: &str, story: &Story) -> Result<String>;
}
