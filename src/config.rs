use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub artifacts: ArtifactSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

/// Paths of the three artifacts exported by one training run
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactSettings {
    #[serde(default = "default_encoder_path")]
    pub encoder_path: String,
    #[serde(default = "default_scaler_path")]
    pub scaler_path: String,
    #[serde(default = "default_model_path")]
    pub model_path: String,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            encoder_path: default_encoder_path(),
            scaler_path: default_scaler_path(),
            model_path: default_model_path(),
        }
    }
}

impl ArtifactSettings {
    /// Point all three paths at the standard file names inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let path = |name: &str| dir.join(name).to_string_lossy().into_owned();
        Self {
            encoder_path: path("encoder.json"),
            scaler_path: path("scaler.json"),
            model_path: path("model.json"),
        }
    }
}

fn default_encoder_path() -> String { "artifacts/encoder.json".to_string() }
fn default_scaler_path() -> String { "artifacts/scaler.json".to_string() }
fn default_model_path() -> String { "artifacts/model.json".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local configuration file (config/local.toml)
    /// 4. Environment variables (prefixed with HPP__)
    /// 5. HPP_ARTIFACT_DIR, which replaces all three artifact paths
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false));

        Self::from_sources(builder, std::env::var("HPP_ARTIFACT_DIR").ok())
    }

    /// Load configuration from a custom path
    ///
    /// Environment variables and HPP_ARTIFACT_DIR still override the file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = Config::builder().add_source(File::from(path.as_ref()));

        Self::from_sources(builder, std::env::var("HPP_ARTIFACT_DIR").ok())
    }

    fn from_sources(
        builder: ConfigBuilder<DefaultState>,
        artifact_dir: Option<String>,
    ) -> Result<Self, ConfigError> {
        let settings = builder
            // e.g., HPP__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("HPP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_artifact_dir(settings, artifact_dir)?.try_deserialize()
    }
}

/// Override the artifact paths when an artifact directory is given
fn apply_artifact_dir(settings: Config, dir: Option<String>) -> Result<Config, ConfigError> {
    let Some(dir) = dir else {
        return Ok(settings);
    };

    let paths = ArtifactSettings::in_dir(dir);

    Config::builder()
        .add_source(settings)
        .set_override("artifacts.encoder_path", paths.encoder_path)?
        .set_override("artifacts.scaler_path", paths.scaler_path)?
        .set_override("artifacts.model_path", paths.model_path)?
        .build()
}
