pub mod file;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "validation-reports")]
#[command(about = "Read, aggregate and export file validation results")]
pub struct CliConfig {
    /// Address the HTTP API listens on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind: String,

    /// Base URL of the document store HTTP API.
    #[arg(long, default_value = "http://localhost:9090")]
    pub store_url: String,

    /// Directory where report artifacts are materialized.
    #[arg(long, default_value = "reports")]
    pub reports_dir: String,

    #[arg(long, default_value = "30")]
    pub store_timeout_seconds: u64,

    /// Load settings from a TOML file instead of the CLI flags.
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn bind_addr(&self) -> &str {
        &self.bind
    }

    fn store_url(&self) -> &str {
        &self.store_url
    }

    fn reports_dir(&self) -> &str {
        &self.reports_dir
    }

    fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_seconds)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("store_url", &self.store_url)?;
        validate_path("reports_dir", &self.reports_dir)?;
        validate_path("bind", &self.bind)?;
        validate_positive_number("store_timeout_seconds", self.store_timeout_seconds as usize, 1)?;
        Ok(())
    }
}
