use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Upload limits enforced by the relay. The CLI client applies its own
/// soft cap, but these are the authority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_min_files")]
    pub min_files: usize,
    #[serde(default = "default_max_files")]
    pub max_files: usize,
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,
}

impl UploadConfig {
    /// Whole-request body limit: the full batch is buffered in memory,
    /// so the bound is max_files x max_file_bytes plus multipart framing.
    pub fn body_limit_bytes(&self) -> usize {
        self.max_files * self.max_file_bytes + 1024 * 1024
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            min_files: default_min_files(),
            max_files: default_max_files(),
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_temperature() -> f32 {
    0.9
}

fn default_min_files() -> usize {
    2
}

fn default_max_files() -> usize {
    5
}

fn default_max_file_bytes() -> usize {
    10 * 1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let yaml = r#"
llm:
  base_url: "https://api.openai.com/v1"
  api_key: "test-key"
  model: "gpt-4o"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.logs.level, "info");
        assert_eq!(config.llm.temperature, 0.9);
        assert_eq!(config.upload.min_files, 2);
        assert_eq!(config.upload.max_files, 5);
        assert_eq!(config.upload.max_file_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let yaml = r#"
llm:
  base_url: "http://localhost:1234/v1"
  api_key: "k"
  model: "qwen-vl"
  temperature: 0.2
server:
  host: "127.0.0.1"
  port: 3000
upload:
  max_file_bytes: 1048576
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.llm.temperature, 0.2);
        assert_eq!(config.upload.max_file_bytes, 1024 * 1024);
        // Unset upload fields still default
        assert_eq!(config.upload.max_files, 5);
    }

    #[test]
    fn test_body_limit_covers_full_batch() {
        let upload = UploadConfig::default();
        assert!(upload.body_limit_bytes() > upload.max_files * upload.max_file_bytes);
    }
}
