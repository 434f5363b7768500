use crate::adapters::storyblok::Region;
use crate::core::ConfigProvider;
use crate::utils::error::{PageError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PagesConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub storyblok: StoryblokConfig,
    #[serde(default)]
    pub views: ViewsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoryblokConfig {
    pub token: Option<String>,
    #[serde(default)]
    pub region: Region,
    pub api_base: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewsConfig {
    pub template_dir: Option<String>,
    #[serde(default = "default_view")]
    pub view: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_view() -> String {
    "index".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            template_dir: None,
            view: default_view(),
        }
    }
}

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

impl PagesConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PageError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PageError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${STORYBLOK_TOKEN})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let token = validation::validate_required_field("storyblok.token", &self.storyblok.token)?;
        validation::validate_non_empty_string("storyblok.token", token)?;
        validation::validate_substituted("storyblok.token", token)?;

        validation::validate_url("storyblok.api_base", &self.api_base())?;

        if let Some(timeout) = self.storyblok.timeout_seconds {
            validation::validate_positive_number("storyblok.timeout_seconds", timeout, 1)?;
        }

        if let Some(language) = &self.storyblok.language {
            validation::validate_non_empty_string("storyblok.language", language)?;
        }

        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_non_empty_string("views.view", &self.views.view)?;

        if let Some(dir) = &self.views.template_dir {
            validation::validate_path("views.template_dir", dir)?;
        }

        Ok(())
    }
}

impl ConfigProvider for PagesConfig {
    fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn api_base(&self) -> String {
        self.storyblok
            .api_base
            .clone()
            .unwrap_or_else(|| self.storyblok.region.api_base().to_string())
    }

    fn token(&self) -> &str {
        self.storyblok.token.as_deref().unwrap_or_default()
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.storyblok
                .timeout_seconds
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        )
    }

    fn language(&self) -> Option<&str> {
        self.storyblok.language.as_deref()
    }

    fn template_dir(&self) -> Option<&str> {
        self.views.template_dir.as_deref()
    }

    fn view(&self) -> &str {
        &self.views.view
    }
}

impl Validate for PagesConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_config_uses_defaults() {
        let toml_content = r#"
[storyblok]
token = "preview-token"
"#;

        let config = PagesConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8000");
        assert_eq!(config.api_base(), "https://api.storyblok.com/v1");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.view(), "index");
        assert!(config.template_dir().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_region_and_override() {
        let toml_content = r#"
[storyblok]
token = "t"
region = "us"
"#;
        let config = PagesConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_base(), "https://api-us.storyblok.com/v1");

        let toml_content = r#"
[storyblok]
token = "t"
region = "us"
api_base = "http://localhost:9000/v1"
"#;
        let config = PagesConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_base(), "http://localhost:9000/v1");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PAGES_TEST_TOKEN", "from-env");

        let toml_content = r#"
[storyblok]
token = "${PAGES_TEST_TOKEN}"
"#;

        let config = PagesConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.token(), "from-env");

        std::env::remove_var("PAGES_TEST_TOKEN");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[storyblok]
token = "${PAGES_TEST_TOKEN_NEVER_SET}"
"#;

        let config = PagesConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(PageError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let missing_token = PagesConfig::from_toml_str("[storyblok]\n").unwrap();
        assert!(matches!(
            missing_token.validate(),
            Err(PageError::MissingConfigError { .. })
        ));

        let bad_base = PagesConfig::from_toml_str(
            "[storyblok]\ntoken = \"t\"\napi_base = \"ftp://example.com\"\n",
        )
        .unwrap();
        assert!(bad_base.validate().is_err());

        let zero_timeout =
            PagesConfig::from_toml_str("[storyblok]\ntoken = \"t\"\ntimeout_seconds = 0\n")
                .unwrap();
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_unknown_region_is_parse_error() {
        let err = PagesConfig::from_toml_str("[storyblok]\ntoken = \"t\"\nregion = \"mars\"\n")
            .unwrap_err();
        assert!(matches!(err, PageError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[server]
host = "0.0.0.0"
port = 8080

[storyblok]
token = "file-token"
language = "de"

[views]
template_dir = "./templates"
view = "page"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = PagesConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.language(), Some("de"));
        assert_eq!(config.template_dir(), Some("./templates"));
        assert_eq!(config.view(), "page");
    }
}
