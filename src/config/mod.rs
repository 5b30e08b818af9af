pub mod cli;
pub mod toml_config;

use crate::core::uncovered::DEFAULT_SOURCE_ROOT;
use crate::core::ConfigProvider;
use crate::domain::model::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_source_root, Validate};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_REPORT_PATH: &str = "target/site/jacoco/jacoco.xml";
pub const DEFAULT_OUTPUT_PATH: &str = "righe_non_coperte.txt";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, clap::Parser)]
#[command(name = "jacoco-uncovered")]
#[command(about = "List the source lines a JaCoCo report marks as not covered")]
pub struct CliConfig {
    /// JaCoCo XML report [default: target/site/jacoco/jacoco.xml]
    #[arg(long)]
    pub report: Option<String>,

    /// Output file, truncated on every run [default: righe_non_coperte.txt]
    #[arg(long)]
    pub output: Option<String>,

    /// Directory prefixed to every package path [default: src/main/java]
    #[arg(long)]
    pub source_root: Option<String>,

    /// Output format [default: text]
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Optional TOML configuration file
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage for each stage")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 優先順序：命令列參數 > TOML 檔案 > 預設值
    pub fn resolve(&self) -> Result<RunConfig> {
        let mut config = RunConfig::default();

        if let Some(path) = &self.config {
            tracing::info!("📁 Loading configuration from: {}", path);
            config = config.with_toml(&TomlConfig::from_file(path)?);
        }

        if let Some(report) = &self.report {
            config.report_path = report.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(source_root) = &self.source_root {
            config.source_root = source_root.clone();
        }
        if let Some(format) = self.format {
            config.output_format = format;
        }
        config.monitor |= self.monitor;

        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub report_path: String,
    pub output_path: String,
    pub source_root: String,
    pub output_format: OutputFormat,
    pub monitor: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            report_path: DEFAULT_REPORT_PATH.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            source_root: DEFAULT_SOURCE_ROOT.to_string(),
            output_format: OutputFormat::default(),
            monitor: false,
        }
    }
}

impl RunConfig {
    pub fn with_toml(mut self, toml: &TomlConfig) -> Self {
        if let Some(path) = toml.report_path() {
            self.report_path = path.to_string();
        }
        if let Some(path) = toml.output_path() {
            self.output_path = path.to_string();
        }
        if let Some(root) = toml.source_root() {
            self.source_root = root.to_string();
        }
        if let Some(format) = toml.output_format() {
            self.output_format = format;
        }
        self.monitor |= toml.monitoring_enabled();
        self
    }
}

impl ConfigProvider for RunConfig {
    fn report_path(&self) -> &str {
        &self.report_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn source_root(&self) -> &str {
        &self.source_root
    }

    fn output_format(&self) -> OutputFormat {
        self.output_format
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_path("report_path", &self.report_path)?;
        validate_path("output_path", &self.output_path)?;
        validate_source_root("source_root", &self.source_root)?;
        Ok(())
    }
}
