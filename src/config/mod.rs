//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthSettings, BootstrapSettings, LogFormat, LoggingConfig, MetricsSettings,
    ServerConfig, StorageSettings,
};
