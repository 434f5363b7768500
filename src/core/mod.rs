pub mod server;
pub mod slug_handler;

pub use crate::domain::model::{ContentVersion, Slug, Story};
pub use crate::domain::ports::{ConfigProvider, ContentSource, ViewRenderer};
pub use crate::utils::error::Result;
