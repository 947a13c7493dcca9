use std::sync::OnceLock;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct EmailSettings {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub recipient: String,
}

#[derive(Deserialize, Debug)]
pub struct InfluxSettings {
    pub url: String,
    pub org: String,
    pub bucket: String,
    pub token: String,
}

#[derive(Deserialize, Debug)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Deserialize, Debug)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Deserialize, Debug)]
pub struct DispatchSettings {
    pub initial_delay_secs: u64,
    pub interval_secs: u64,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            initial_delay_secs: 30,
            interval_secs: 60,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct AppSettings {
    pub email: EmailSettings,
    pub influx: InfluxSettings,
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    #[serde(default)]
    pub dispatch: DispatchSettings,
}

impl AppSettings {
    fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("appsettings").required(true))
            .add_source(File::with_name("appsettings.local").required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?;

        settings.try_deserialize()
    }
}

pub fn get() -> &'static AppSettings {
    static APPSETTINGS: OnceLock<AppSettings> = OnceLock::new();
    APPSETTINGS.get_or_init(|| AppSettings::new().unwrap())
}
