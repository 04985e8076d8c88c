use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, ServiceError};
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_STORE_TIMEOUT_SECONDS: u64 = 30;

/// Deployment configuration loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub server: ServerSection,
    pub store: StoreSection,
    pub reports: ReportsSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    pub url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsSection {
    pub dir: String,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| ServiceError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    fn timeout_seconds(&self) -> u64 {
        self.store.timeout_seconds.unwrap_or(DEFAULT_STORE_TIMEOUT_SECONDS)
    }
}

/// Replace `${VAR_NAME}` placeholders with environment values. Unset
/// variables are left in place so validation can point at them.
fn substitute_env_vars(content: &str) -> String {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();
    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

impl ConfigProvider for FileConfig {
    fn bind_addr(&self) -> &str {
        &self.server.bind
    }

    fn store_url(&self) -> &str {
        &self.store.url
    }

    fn reports_dir(&self) -> &str {
        &self.reports.dir
    }

    fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds())
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        validate_url("store.url", &self.store.url)?;
        validate_path("reports.dir", &self.reports.dir)?;
        validate_path("server.bind", &self.server.bind)?;
        validate_positive_number("store.timeout_seconds", self.timeout_seconds() as usize, 1)?;
        Ok(())
    }
}
