use serde::Deserialize;

/// Environment variable holding the document store API key
pub const API_KEY_ENV: &str = "ELASTIC_API_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Connection settings of the document store, injected into `DistrictStoreClient`
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub collection: String,
    /// Usually left out of the file and supplied through [`API_KEY_ENV`]
    #[serde(default)]
    pub api_key: String,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000

[store]
base_url = "https://eda6f533d8524075abddae2a7527be04.us-central1.gcp.cloud.es.io:443"
collection = "fire_districts"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// The API key from the environment always wins over the file.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;
    apply_api_key(&mut config, std::env::var(API_KEY_ENV).ok())?;
    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
    // Try to find config.toml next to the executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    // Fall back to default config
    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config: Config = toml::from_str(contents)?;
    config.store.base_url = config.store.base_url.trim_end_matches('/').to_string();
    Ok(config)
}

fn apply_api_key(config: &mut Config, from_env: Option<String>) -> anyhow::Result<()> {
    if let Some(key) = from_env.filter(|k| !k.trim().is_empty()) {
        config.store.api_key = key;
    }
    if config.store.api_key.trim().is_empty() {
        anyhow::bail!(
            "document store API key is missing: set {} or store.api_key in config.toml",
            API_KEY_ENV
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.store.collection, "fire_districts");
        assert!(config.store.base_url.starts_with("https://"));
        assert!(config.store.api_key.is_empty());
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = parse_config(
            r#"
            [server]
            port = 8080

            [store]
            base_url = "http://localhost:9200/"
            collection = "districts"
            api_key = "from-file"
            "#,
        )
        .unwrap();
        assert_eq!(config.store.base_url, "http://localhost:9200");
        assert_eq!(config.store.api_key, "from-file");
    }

    #[test]
    fn test_env_key_overrides_file_key() {
        let mut config = parse_config(DEFAULT_CONFIG).unwrap();
        config.store.api_key = "from-file".into();
        apply_api_key(&mut config, Some("from-env".into())).unwrap();
        assert_eq!(config.store.api_key, "from-env");
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let mut config = parse_config(DEFAULT_CONFIG).unwrap();
        let err = apply_api_key(&mut config, None).unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));

        let mut config = parse_config(DEFAULT_CONFIG).unwrap();
        assert!(apply_api_key(&mut config, Some("  ".into())).is_err());
    }
}
