//! Configuration structs

mod app_config;

pub use app_config::{
    parse_algorithm, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig,
    Environment, JwtConfig, ServerConfig,
};
