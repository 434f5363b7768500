pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
use toml_config::PagesConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "storyblok-pages")]
#[command(about = "Serve Storyblok stories through server-side templates")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "pages-config.toml")]
    pub config: String,

    /// Override server.host from config
    #[arg(long)]
    pub host: Option<String>,

    /// Override server.port from config
    #[arg(long)]
    pub port: Option<u16>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Validate the configuration and exit")]
    pub check: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn apply_overrides(&self, config: &mut PagesConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
            tracing::info!("🔧 server.host overridden to: {}", host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
            tracing::info!("🔧 server.port overridden to: {}", port);
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;

    #[test]
    fn test_cli_overrides_bind_address() {
        let cli = CliConfig::parse_from(["storyblok-pages", "--host", "0.0.0.0", "--port", "9090"]);
        let mut config = PagesConfig::from_toml_str("[storyblok]\ntoken = \"t\"\n").unwrap();

        cli.apply_overrides(&mut config);

        assert_eq!(config.bind_address(), "0.0.0.0:9090");
        assert_eq!(cli.config, "pages-config.toml");
    }
}
