pub mod toml_config;

use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
use toml_config::CrawlerConfig;

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "curriculum-etl"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Build the cross-referenced curriculum dataset for OST study programs")
)]
pub struct CliConfig {
    /// Path to a TOML configuration file; built-in study programs are used when omitted
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub config: Option<String>,

    /// Override the curriculum source base URL
    #[cfg_attr(feature = "cli", arg(long))]
    pub base_url: Option<String>,

    /// Override the directory artifacts are written below
    #[cfg_attr(feature = "cli", arg(long))]
    pub output_root: Option<String>,

    /// Build the dataset without writing any artifact
    #[cfg_attr(feature = "cli", arg(long))]
    pub dry_run: bool,

    /// Enable verbose output
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[cfg_attr(feature = "cli", arg(long))]
    pub json_logs: bool,
}

impl CliConfig {
    /// 載入配置檔（或預設值）並套用命令列覆蓋
    pub fn resolve(&self) -> Result<CrawlerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                CrawlerConfig::from_file(path)?
            }
            None => {
                tracing::info!("📁 No configuration file given, using built-in study programs");
                CrawlerConfig::default()
            }
        };

        if let Some(base_url) = &self.base_url {
            tracing::info!("🔧 Base URL overridden to: {}", base_url);
            config.source.base_url = base_url.clone();
        }
        if let Some(root) = &self.output_root {
            tracing::info!("🔧 Output root overridden to: {}", root);
            config.output.root = root.clone();
        }

        Ok(config)
    }
}
