mod manager;

pub use manager::{
    API_KEY_ENV, ConfigFile, ConfigManager, GtrConfig, MODEL_ENV, ResolveOptions,
    ResolvedConfig, resolve_config, resolve_config_with,
};
