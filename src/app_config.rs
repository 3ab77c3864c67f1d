use config::{Config, ConfigError, Environment, Source};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

pub const DEFAULT_SKYPORT_URL: &str = "https://api.daikinskyport.com";

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    skyport: Skyport,
    output: Output,
    log: Log,
}

impl AppConfig {
    /// Built-in defaults, overridden by an optional `skyport_snapshot` file and then by
    /// `SKYPORT_SNAPSHOT__*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(config::File::with_name("skyport_snapshot").required(false), environment())
    }

    fn load_from(file: impl Source + Send + Sync + 'static, environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("skyport.url", DEFAULT_SKYPORT_URL)?
            .set_default("skyport.request_timeout", "30s")?
            .set_default("output.directory", ".")?
            .set_default("log.level", "warn")?
            .add_source(file)
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    pub fn skyport(&self) -> &Skyport {
        &self.skyport
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    pub fn log(&self) -> &Log {
        &self.log
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SKYPORT_SNAPSHOT").prefix_separator("__").separator("__")
}

#[derive(Debug, Deserialize)]
pub struct Skyport {
    url: String,
    #[serde(with = "humantime_serde")]
    request_timeout: Duration,
}

impl Skyport {
    pub fn url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

#[derive(Debug, Deserialize)]
pub struct Output {
    directory: PathBuf,
}

impl Output {
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

#[derive(Debug, Deserialize)]
pub struct Log {
    level: String,
}

impl Log {
    /// Unknown level names fall back to `WARN`.
    pub fn level(&self) -> Level {
        Level::from_str(&self.level).unwrap_or(Level::WARN)
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                skyport: Skyport {
                    url: "https://skyport.url".to_string(),
                    request_timeout: Duration::from_secs(5),
                },
                output: Output {
                    directory: PathBuf::from("."),
                },
                log: Log {
                    level: "warn".to_string(),
                },
            },
        }
    }

    pub fn skyport_url(mut self, url: String) -> Self {
        self.config.skyport.url = url;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
