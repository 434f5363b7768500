use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    TemplateError(#[from] minijinja::Error),

    #[error("Content service returned {status} for slug '{slug}'")]
    UpstreamStatus { status: u16, slug: String },

    #[error("Slug '{slug}' is not a valid path segment")]
    InvalidSlug { slug: String },

    #[error("Content service response for slug '{slug}' has no story")]
    MissingStory { slug: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Upstream,
    Rendering,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PageError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PageError::ApiError(_)
            | PageError::UpstreamStatus { .. }
            | PageError::MissingStory { .. }
            | PageError::InvalidSlug { .. }
            | PageError::SerializationError(_) => ErrorCategory::Upstream,
            PageError::TemplateError(_) => ErrorCategory::Rendering,
            PageError::ConfigError { .. }
            | PageError::ConfigValidationError { .. }
            | PageError::InvalidConfigValueError { .. }
            | PageError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PageError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PageError::UpstreamStatus { status, .. } if *status == 404 => ErrorSeverity::Low,
            PageError::InvalidSlug { .. } => ErrorSeverity::Low,
            PageError::UpstreamStatus { .. }
            | PageError::ApiError(_)
            | PageError::MissingStory { .. }
            | PageError::SerializationError(_) => ErrorSeverity::Medium,
            PageError::TemplateError(_) => ErrorSeverity::High,
            PageError::ConfigError { .. }
            | PageError::ConfigValidationError { .. }
            | PageError::InvalidConfigValueError { .. }
            | PageError::MissingConfigError { .. } => ErrorSeverity::High,
            PageError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PageError::UpstreamStatus { status: 401, .. } => {
                "Check that storyblok.token is a valid preview token"
            }
            PageError::UpstreamStatus { status: 404, .. } => {
                "Check that a story with this slug exists in the space"
            }
            PageError::UpstreamStatus { .. } | PageError::ApiError(_) => {
                "Check network connectivity and the Storyblok status page"
            }
            PageError::InvalidSlug { .. } => "Request a slug other than '.' or '..'",
            PageError::MissingStory { .. } | PageError::SerializationError(_) => {
                "Check that storyblok.api_base points at the Content Delivery API"
            }
            PageError::TemplateError(_) => "Check views.template_dir and the template syntax",
            PageError::ConfigError { .. }
            | PageError::ConfigValidationError { .. }
            | PageError::InvalidConfigValueError { .. }
            | PageError::MissingConfigError { .. } => {
                "Fix the configuration file, or run with --check to validate it"
            }
            PageError::IoError(_) => "Check file permissions and that the bind address is free",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Upstream => format!("Could not load content: {}", self),
            ErrorCategory::Rendering => format!("Could not render page: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_not_found_is_low_severity() {
        let err = PageError::UpstreamStatus {
            status: 404,
            slug: "missing".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Upstream);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_config_errors_share_category() {
        let err = PageError::MissingConfigError {
            field: "storyblok.token".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.user_friendly_message().starts_with("Invalid configuration"));
    }

    #[test]
    fn test_auth_failure_suggests_token() {
        let err = PageError::UpstreamStatus {
            status: 401,
            slug: "home".to_string(),
        };
        assert!(err.recovery_suggestion().contains("token"));
    }
}
