pub mod address;
pub mod app_config;
pub mod config;
pub mod matcher;
pub mod text;
pub mod types;

pub use address::AddressComponents;
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use types::{Business, Query};
