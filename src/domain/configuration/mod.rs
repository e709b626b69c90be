mod app_config;
mod loader;

pub use app_config::{AppConfig, BackendConfig, StorageConfig};
pub use loader::{CONFIG_FILE, load_config, parse_config_content};
