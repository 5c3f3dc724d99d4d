pub mod layers;

mod config;
mod manager;
mod merge;


pub use config::{EndpointsConfig, HttpConfig, RecordHookConfig};
pub use manager::{ConfigManager, RuntimeOverrides};
pub use merge::merge_toml_values;
