use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_SLUG: &str = "home";

/// Path segment identifying one content entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Missing or empty segments resolve to the home story.
    pub fn from_path(segment: Option<String>) -> Self {
        match segment {
            Some(s) if !s.is_empty() => Self(s),
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Slug {
    fn default() -> Self {
        Self(DEFAULT_SLUG.to_string())
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Untyped document returned under the `story` key of the content API.
pub type Story = serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentVersion {
    Draft,
    #[default]
    Published,
}

impl ContentVersion {
    pub fn as_query_value(&self) -> &'static str {
        match self {
            ContentVersion::Draft => "draft",
            ContentVersion::Published => "published",
        }
    }
}
