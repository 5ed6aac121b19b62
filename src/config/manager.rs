use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use crate::paths;
use crate::translation::{DEFAULT_ENDPOINT, DEFAULT_MODEL, resolve_target};

/// Environment variable holding the API key unless `api_key_env` says otherwise.
pub const API_KEY_ENV: &str = "GTR_API_KEY";

/// Environment variable overriding the configured model.
pub const MODEL_ENV: &str = "GTR_MODEL";

const DEFAULT_TARGET: &str = "Japanese";

/// Settings in the `[gtr]` section of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GtrConfig {
    /// Default model name.
    pub model: Option<String>,
    /// Default target language (ISO 639-1 code or language name).
    pub target: Option<String>,
    /// API base URL.
    pub endpoint: Option<String>,
    /// Request deadline in seconds; absent or `0` means no limit.
    pub timeout_secs: Option<u64>,
    /// Name of the environment variable holding the API key.
    pub api_key_env: Option<String>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/gtr/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub gtr: GtrConfig,
}

/// Resolved configuration after merging CLI arguments, environment and
/// config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The API base URL.
    pub endpoint: String,
    /// The model to use for translation.
    pub model: String,
    /// The API key.
    pub api_key: String,
    /// The target language label used in the prompt.
    pub target_language: String,
    /// Deadline for the API call.
    pub timeout: Option<Duration>,
}

/// CLI overrides that take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Target language override.
    pub target: Option<String>,
    /// Model name override.
    pub model: Option<String>,
    /// Endpoint override.
    pub endpoint: Option<String>,
    /// Timeout override in seconds.
    pub timeout_secs: Option<u64>,
}

/// Resolves configuration from the CLI options, the process environment and
/// the config file.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    resolve_config_with(options, config_file, |name| std::env::var(name).ok())
}

/// Like [`resolve_config`], reading environment variables through `env`.
///
/// Priority: CLI option, then environment, then config file, then built-in
/// default. Empty environment values count as unset.
///
/// # Errors
///
/// Returns an error if no API key is available or the target is empty.
pub fn resolve_config_with<F>(
    options: &ResolveOptions,
    config_file: &ConfigFile,
    env: F,
) -> Result<ResolvedConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |name: &str| env(name).filter(|value| !value.trim().is_empty());
    let file = &config_file.gtr;

    let key_var = file.api_key_env.as_deref().unwrap_or(API_KEY_ENV);
    let Some(api_key) = lookup(key_var) else {
        bail!(
            "{key_var} environment variable is not set\n\
             Please run: export {key_var}='your-api-key'"
        );
    };

    let model = options
        .model
        .clone()
        .or_else(|| lookup(MODEL_ENV))
        .or_else(|| file.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let target = options
        .target
        .as_deref()
        .or(file.target.as_deref())
        .unwrap_or(DEFAULT_TARGET);
    let target_language = resolve_target(target)?;

    let endpoint = options
        .endpoint
        .clone()
        .or_else(|| file.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let timeout = options
        .timeout_secs
        .or(file.timeout_secs)
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    Ok(ResolvedConfig {
        endpoint,
        model,
        api_key: api_key.trim().to_string(),
        target_language,
        timeout,
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/gtr/config.toml`
    /// or `~/.config/gtr/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile = toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(config_file)
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// Unreadable or malformed files are still errors.
    pub fn load_if_exists(&self) -> Result<ConfigFile> {
        match fs::metadata(&self.config_path) {
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ConfigFile::default()),
            _ => self.load(),
        }
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        crate::fs::atomic_write(&self.config_path, &contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager {
            config_path: temp_dir.path().join("config.toml"),
        }
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let config = ConfigFile {
            gtr: GtrConfig {
                model: Some("gemini-2.5-flash".to_string()),
                target: Some("fr".to_string()),
                endpoint: None,
                timeout_secs: Some(60),
                api_key_env: Some("GEMINI_API_KEY".to_string()),
            },
        };

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        assert!(manager.load().is_err());
        assert_eq!(manager.load_if_exists().unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_load_if_exists_rejects_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(manager.config_path(), "[gtr\nmodel = ").unwrap();

        let err = manager.load_if_exists().unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(manager.config_path(), "[gtr]\ntarget = \"de\"\n").unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.gtr.target.as_deref(), Some("de"));
        assert!(loaded.gtr.model.is_none());
    }

    // resolve_config tests

    #[test]
    fn test_resolve_config_defaults() {
        let env = env_from(&[(API_KEY_ENV, "secret")]);

        let resolved =
            resolve_config_with(&ResolveOptions::default(), &ConfigFile::default(), env).unwrap();

        assert_eq!(resolved.api_key, "secret");
        assert_eq!(resolved.model, DEFAULT_MODEL);
        assert_eq!(resolved.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(resolved.target_language, "Japanese");
        assert!(resolved.timeout.is_none());
    }

    #[test]
    fn test_resolve_config_missing_api_key() {
        let env = env_from(&[]);

        let err = resolve_config_with(&ResolveOptions::default(), &ConfigFile::default(), env)
            .unwrap_err();

        assert!(err.to_string().contains("GTR_API_KEY environment variable is not set"));
        assert!(err.to_string().contains("export GTR_API_KEY="));
    }

    #[test]
    fn test_resolve_config_empty_api_key_counts_as_missing() {
        let env = env_from(&[(API_KEY_ENV, "  ")]);

        let result = resolve_config_with(&ResolveOptions::default(), &ConfigFile::default(), env);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_config_custom_api_key_env() {
        let env = env_from(&[("GEMINI_API_KEY", "other"), (API_KEY_ENV, "ignored")]);
        let config = ConfigFile {
            gtr: GtrConfig {
                api_key_env: Some("GEMINI_API_KEY".to_string()),
                ..GtrConfig::default()
            },
        };

        let resolved = resolve_config_with(&ResolveOptions::default(), &config, env).unwrap();
        assert_eq!(resolved.api_key, "other");
    }

    #[test]
    fn test_resolve_config_model_priority() {
        let config = ConfigFile {
            gtr: GtrConfig {
                model: Some("file-model".to_string()),
                ..GtrConfig::default()
            },
        };

        let from_file = resolve_config_with(
            &ResolveOptions::default(),
            &config,
            env_from(&[(API_KEY_ENV, "k")]),
        )
        .unwrap();
        assert_eq!(from_file.model, "file-model");

        let from_env = resolve_config_with(
            &ResolveOptions::default(),
            &config,
            env_from(&[(API_KEY_ENV, "k"), (MODEL_ENV, "env-model")]),
        )
        .unwrap();
        assert_eq!(from_env.model, "env-model");

        let options = ResolveOptions {
            model: Some("cli-model".to_string()),
            ..ResolveOptions::default()
        };
        let from_cli = resolve_config_with(
            &options,
            &config,
            env_from(&[(API_KEY_ENV, "k"), (MODEL_ENV, "env-model")]),
        )
        .unwrap();
        assert_eq!(from_cli.model, "cli-model");
    }

    #[test]
    fn test_resolve_config_target_codes_and_labels() {
        let config = ConfigFile {
            gtr: GtrConfig {
                target: Some("ko".to_string()),
                ..GtrConfig::default()
            },
        };

        let from_file = resolve_config_with(
            &ResolveOptions::default(),
            &config,
            env_from(&[(API_KEY_ENV, "k")]),
        )
        .unwrap();
        assert_eq!(from_file.target_language, "Korean");

        let options = ResolveOptions {
            target: Some("Klingon".to_string()),
            ..ResolveOptions::default()
        };
        let from_cli =
            resolve_config_with(&options, &config, env_from(&[(API_KEY_ENV, "k")])).unwrap();
        assert_eq!(from_cli.target_language, "Klingon");
    }

    #[test]
    fn test_resolve_config_timeout() {
        let config = ConfigFile {
            gtr: GtrConfig {
                timeout_secs: Some(90),
                ..GtrConfig::default()
            },
        };

        let from_file = resolve_config_with(
            &ResolveOptions::default(),
            &config,
            env_from(&[(API_KEY_ENV, "k")]),
        )
        .unwrap();
        assert_eq!(from_file.timeout, Some(Duration::from_secs(90)));

        // 0 on the command line lifts the configured limit
        let options = ResolveOptions {
            timeout_secs: Some(0),
            ..ResolveOptions::default()
        };
        let unlimited =
            resolve_config_with(&options, &config, env_from(&[(API_KEY_ENV, "k")])).unwrap();
        assert!(unlimited.timeout.is_none());
    }

    #[test]
    fn test_resolve_config_endpoint_override() {
        let options = ResolveOptions {
            endpoint: Some("http://localhost:8080".to_string()),
            ..ResolveOptions::default()
        };

        let resolved =
            resolve_config_with(&options, &ConfigFile::default(), env_from(&[(API_KEY_ENV, "k")]))
                .unwrap();
        assert_eq!(resolved.endpoint, "http://localhost:8080");
    }
}
