//! Configuration for the recordhook client.
//!
//! Configuration is read from TOML files layered from the user's home
//! directory and the workspace, then overridden by environment variables and
//! finally by runtime (CLI) overrides. Every field has a default, so an empty
//! or missing file yields a working configuration that targets the stock
//! webhook endpoints.

pub mod bootstrap;
pub mod constants;
pub mod debug;
pub mod env;
pub mod loader;

pub use bootstrap::{default_config_toml, write_default_config};
pub use debug::{DebugConfig, TraceLevel};
pub use env::load_dotenv;
pub use loader::{
    ConfigManager, EndpointsConfig, HttpConfig, RecordHookConfig, RuntimeOverrides,
    merge_toml_values,
};
