mod types;

pub use types::*;

use crate::Result;
use std::env;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(&config_path).await?;
    let mut config: Config = serde_yaml::from_str(&config_str)?;

    // Credentials and model selection may be supplied by the environment
    // instead of the file.
    if let Ok(api_key) = env::var("LLM_API_KEY") {
        config.llm.api_key = api_key;
    }
    if let Ok(model) = env::var("LLM_MODEL") {
        config.llm.model = model;
    }
    if let Ok(base_url) = env::var("LLM_BASE_URL") {
        config.llm.base_url = base_url;
    }

    Ok(config)
}
