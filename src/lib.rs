pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{storyblok::StoryblokClient, views::MiniJinjaViews};
pub use config::toml_config::PagesConfig;
pub use crate::core::{server::build_router, slug_handler::SlugHandler};
pub use domain::model::{ContentVersion, Slug, Story};
pub use utils::error::{PageError, Result};
