use std::{env, fmt::Display, time::Duration};

use config::{Config, ConfigError};
use secrecy::Secret;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

/// Global configuration, loaded from the `configuration` directory. See
/// [`get_configuration`].
#[derive(Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub log_level: String,
    pub waitlist: WaitlistSettings,
    pub analytics: AnalyticsSettings,
    pub links: LinkSettings,
}

#[derive(Clone, Deserialize)]
pub struct ApplicationSettings {
    /// `127.0.0.1` on a dev machine, `0.0.0.0` in production.
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub base_url: String,
}

#[derive(Clone, Deserialize)]
pub struct WaitlistSettings {
    /// Used in place of the remote insert when no store is configured.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub simulated_delay_milliseconds: u64,
    pub store: Option<StoreSettings>,
}

impl WaitlistSettings {
    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_milliseconds)
    }
}

/// Connection details of the hosted table receiving signups.
#[derive(Clone, Deserialize)]
pub struct StoreSettings {
    pub base_url: String,
    pub api_key: Secret<String>,
    pub table: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl StoreSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(Clone, Deserialize)]
pub struct AnalyticsSettings {
    /// Client-side snippet injected into the landing page.
    pub script_src: Option<String>,
    /// Server-side page-view collector.
    pub endpoint: Option<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl AnalyticsSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(Clone, Deserialize)]
pub struct LinkSettings {
    pub linkedin: String,
    pub twitter: String,
    pub substack: String,
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

/// Load `base.yaml` and the environment specific file from
/// `<project_root>/configuration`, then apply `APP_` prefixed environment
/// variables on top.
///
/// `APP_APPLICATION__PORT=5001` sets `Settings.application.port`.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = env::current_dir().map_err(|e| {
        ConfigError::Message(format!("Failed to determine the current directory: {e}"))
    })?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;

    let settings = Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(format!("{environment}.yaml")),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
