/// Default webhook that returns a single record for `?id=<id>`.
pub const DEFAULT_LOAD_URL: &str =
    "https://n8n.rpi-virtuell.de/webhook/b33d9b27-ee96-41c1-b4be-030e79d2a01c";

/// Default webhook that accepts a full record as a JSON body.
///
/// This points at the workflow's test-mode path, which only answers while the
/// workflow editor is listening.
pub const DEFAULT_SAVE_URL: &str =
    "https://n8n.rpi-virtuell.de/webhook-test/82fdca55-53bb-442e-a27d-627bf250bc7c";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Name of the configuration file searched in the workspace and home dirs.
pub const CONFIG_FILE_NAME: &str = "recordhook.toml";
/// Directory under `$HOME` that holds the user-level configuration file.
pub const HOME_CONFIG_DIR: &str = ".recordhook";

pub mod env_vars {
    pub const CONFIG_PATH: &str = "RECORDHOOK_CONFIG_PATH";
    pub const WORKSPACE: &str = "RECORDHOOK_WORKSPACE";
    pub const LOAD_URL: &str = "RECORDHOOK_LOAD_URL";
    pub const SAVE_URL: &str = "RECORDHOOK_SAVE_URL";
    pub const VERBOSE: &str = "RECORDHOOK_VERBOSE";
}
