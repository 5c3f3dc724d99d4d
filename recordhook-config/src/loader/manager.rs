use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use toml::Value as TomlValue;

use crate::constants::{self, env_vars};
use crate::env::non_empty_var;
use crate::loader::config::RecordHookConfig;
use crate::loader::layers::{ConfigLayerEntry, ConfigLayerSource, ConfigLayerStack};

/// Values supplied at runtime (CLI flags); they take precedence over every
/// file and environment layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeOverrides {
    pub load_url: Option<String>,
    pub save_url: Option<String>,
    pub request_timeout_seconds: Option<u64>,
}

impl RuntimeOverrides {
    pub fn is_empty(&self) -> bool {
        self.load_url.is_none() && self.save_url.is_none() && self.request_timeout_seconds.is_none()
    }

    /// Render the overrides as a TOML layer. When only the request timeout is
    /// overridden, the connect timeout is lowered to fit under it.
    fn to_toml(&self, current_connect_timeout: Option<u64>) -> TomlValue {
        let mut endpoints = toml::Table::new();
        if let Some(load_url) = &self.load_url {
            endpoints.insert("load_url".into(), TomlValue::String(load_url.clone()));
        }
        if let Some(save_url) = &self.save_url {
            endpoints.insert("save_url".into(), TomlValue::String(save_url.clone()));
        }

        let mut root = toml::Table::new();
        if !endpoints.is_empty() {
            root.insert("endpoints".into(), TomlValue::Table(endpoints));
        }
        if let Some(timeout) = self.request_timeout_seconds {
            let mut http = toml::Table::new();
            http.insert(
                "request_timeout_seconds".into(),
                TomlValue::Integer(i64::try_from(timeout).unwrap_or(i64::MAX)),
            );
            if let Some(connect) = current_connect_timeout
                && connect > timeout
            {
                http.insert(
                    "connect_timeout_seconds".into(),
                    TomlValue::Integer(i64::try_from(timeout).unwrap_or(i64::MAX)),
                );
            }
            root.insert("http".into(), TomlValue::Table(http));
        }
        TomlValue::Table(root)
    }
}

/// Configuration manager for loading and validating configurations
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: RecordHookConfig,
    config_path: Option<PathBuf>,
    layer_stack: ConfigLayerStack,
}

impl ConfigManager {
    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        if let Some(config_path) = non_empty_var(env_vars::CONFIG_PATH) {
            return Self::load_from_file(&config_path).with_context(|| {
                format!(
                    "Failed to load configuration from {}={}",
                    env_vars::CONFIG_PATH,
                    config_path
                )
            });
        }

        if let Some(workspace) = non_empty_var(env_vars::WORKSPACE) {
            return Self::load_from_workspace(&workspace).with_context(|| {
                format!(
                    "Failed to load configuration from {}={}",
                    env_vars::WORKSPACE,
                    workspace
                )
            });
        }

        Self::load_from_workspace(std::env::current_dir()?)
    }

    /// Load configuration from a specific workspace, including the user's
    /// home configuration.
    pub fn load_from_workspace(workspace: impl AsRef<Path>) -> Result<Self> {
        Self::load_from_workspace_with_home(workspace, dirs::home_dir())
    }

    /// Load configuration from a workspace with an explicit home directory.
    /// `None` skips the user layer.
    pub fn load_from_workspace_with_home(
        workspace: impl AsRef<Path>,
        home: Option<PathBuf>,
    ) -> Result<Self> {
        let workspace = workspace.as_ref();
        let mut layer_stack = ConfigLayerStack::default();

        if let Some(home) = home {
            let user_config = home
                .join(constants::HOME_CONFIG_DIR)
                .join(constants::CONFIG_FILE_NAME);
            if user_config.exists() {
                let toml = Self::load_toml_from_file(&user_config)?;
                layer_stack.push(ConfigLayerEntry::new(
                    ConfigLayerSource::User { file: user_config },
                    toml,
                ));
            }
        }

        let workspace_config = workspace.join(constants::CONFIG_FILE_NAME);
        let mut config_path = None;
        if workspace_config.exists() {
            let toml = Self::load_toml_from_file(&workspace_config)?;
            layer_stack.push(ConfigLayerEntry::new(
                ConfigLayerSource::Workspace {
                    file: workspace_config.clone(),
                },
                toml,
            ));
            config_path = Some(workspace_config);
        }

        Self::from_layers(layer_stack, config_path)
    }

    /// Load configuration from one explicit file, skipping the search.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let toml = Self::load_toml_from_file(path)?;

        let mut layer_stack = ConfigLayerStack::default();
        layer_stack.push(ConfigLayerEntry::new(
            ConfigLayerSource::Explicit {
                file: path.to_path_buf(),
            },
            toml,
        ));

        Self::from_layers(layer_stack, Some(path.to_path_buf()))
    }

    fn from_layers(mut layer_stack: ConfigLayerStack, config_path: Option<PathBuf>) -> Result<Self> {
        if let Some(env_layer) = Self::environment_layer() {
            layer_stack.push(ConfigLayerEntry::new(
                ConfigLayerSource::Environment,
                env_layer,
            ));
        }

        let config = Self::build_config(&layer_stack)?;
        tracing::debug!(
            layers = layer_stack.layers().len(),
            path = ?config_path,
            "loaded recordhook configuration"
        );

        Ok(Self {
            config,
            config_path,
            layer_stack,
        })
    }

    fn environment_layer() -> Option<TomlValue> {
        let overrides = RuntimeOverrides {
            load_url: non_empty_var(env_vars::LOAD_URL),
            save_url: non_empty_var(env_vars::SAVE_URL),
            request_timeout_seconds: None,
        };
        (!overrides.is_empty()).then(|| overrides.to_toml(None))
    }

    fn build_config(layer_stack: &ConfigLayerStack) -> Result<RecordHookConfig> {
        let effective = layer_stack.effective_config();
        let config = effective
            .try_into::<RecordHookConfig>()
            .context("Failed to deserialize merged configuration")?;
        config.validate().context("Configuration failed validation")?;
        Ok(config)
    }

    fn load_toml_from_file(path: &Path) -> Result<TomlValue> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Apply CLI overrides as the highest-precedence layer and re-validate.
    pub fn apply_runtime_overrides(&mut self, overrides: &RuntimeOverrides) -> Result<()> {
        if overrides.is_empty() {
            return Ok(());
        }

        let mut layer_stack = self.layer_stack.clone();
        layer_stack.push(ConfigLayerEntry::new(
            ConfigLayerSource::Runtime,
            overrides.to_toml(Some(self.config.http.connect_timeout_seconds)),
        ));
        self.config = Self::build_config(&layer_stack)?;
        self.layer_stack = layer_stack;
        Ok(())
    }

    pub fn config(&self) -> &RecordHookConfig {
        &self.config
    }

    pub fn into_config(self) -> RecordHookConfig {
        self.config
    }

    /// The highest-precedence configuration file that was read, if any.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn layer_stack(&self) -> &ConfigLayerStack {
        &self.layer_stack
    }
}
