pub mod build_info;
pub mod config;

pub use self::config::{load_config, AppConfig};
