use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout_secs: 5,
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> anyhow::Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file {}: {}", config_path, e))?;
        let config = serde_yaml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", config_path, e))?;
        Ok(config)
    }
}

/// Secrets required at startup. The process refuses to start when any is
/// missing, so a misconfigured deployment fails loudly instead of limping.
#[derive(Debug, Clone)]
pub struct Secrets {
    pub database_url: String,
    pub jwt_secret: String,
    pub admin_name: String,
    pub admin_email: String,
    pub admin_password: String,
}

impl Secrets {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: required_env("DATABASE_URL")?,
            jwt_secret: required_env("JWT_SECRET")?,
            admin_name: required_env("ADMIN_NAME")?,
            admin_email: required_env("ADMIN_EMAIL")?,
            admin_password: required_env("ADMIN_PASSWORD")?,
        })
    }
}

fn required_env(key: &str) -> anyhow::Result<String> {
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => Ok(v),
        _ => Err(anyhow::anyhow!(
            "Required environment variable '{}' is not set",
            key
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
log_level: "debug"
log_dir: "./logs"
log_file: "test.log"
use_json: false
rotation: "never"
gateway:
  host: "127.0.0.1"
  port: 8080
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.log_level, "debug");
        // database section is optional
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn test_required_env_missing() {
        let result = required_env("CUSTODIA_TEST_DOES_NOT_EXIST");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("CUSTODIA_TEST_DOES_NOT_EXIST")
        );
    }
}
