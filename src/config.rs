use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

const DEFAULT_SERVICE_NAME: &str = "valuation-desk";
const DEFAULT_PORT: u16 = 8890;
const DEFAULT_ENVIRONMENT: &str = "development";

// YAML-serializable configuration structure
#[derive(Serialize, Deserialize, Debug)]
pub struct ConfigYaml {
    pub service_name: Option<String>,
    pub port: Option<u16>,
    pub environment: Option<String>,
    pub records_source: String,
    pub cors_allow_any_origin: Option<bool>,
}

// Holds application-wide settings
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub service_name: String,
    pub port: u16,
    pub environment: String,
    /// File path or http(s) URL of the record document, loaded once at startup.
    pub records_source: String,
    pub cors_allow_any_origin: bool,
}

impl AppConfig {
    // CONFIG_FILE points at a YAML file; otherwise read the environment
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        match env::var("CONFIG_FILE") {
            Ok(config_file) => Self::from_yaml(&config_file),
            Err(_) => Self::from_env(),
        }
    }

    pub fn from_yaml(file_path: &str) -> anyhow::Result<Self> {
        let yaml_content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read config file {}", file_path))?;
        Self::from_yaml_str(&yaml_content)
    }

    pub fn from_yaml_str(yaml_content: &str) -> anyhow::Result<Self> {
        let yaml_config: ConfigYaml =
            serde_yaml::from_str(yaml_content).context("Failed to parse YAML config")?;

        Ok(Self {
            service_name: yaml_config
                .service_name
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            port: yaml_config.port.unwrap_or(DEFAULT_PORT),
            environment: yaml_config
                .environment
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            records_source: yaml_config.records_source,
            cors_allow_any_origin: yaml_config.cors_allow_any_origin.unwrap_or(true),
        })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let records_source = lookup("RECORDS_SOURCE")
            .filter(|s| !s.trim().is_empty())
            .context("RECORDS_SOURCE must be set")?;

        let port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got {}", port))?,
            None => DEFAULT_PORT,
        };

        let cors_allow_any_origin = lookup("CORS_ALLOW_ANY_ORIGIN")
            .and_then(|s| s.parse().ok())
            .unwrap_or(true);

        Ok(Self {
            service_name: lookup("SERVICE_NAME").unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            port,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            records_source,
            cors_allow_any_origin,
        })
    }
}
