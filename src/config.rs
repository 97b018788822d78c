use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use mealplanner_ai::ClientOptions;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    /// Admin account created on startup when missing
    pub root: Option<RootConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, any origin when empty
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_days: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_ai_base_url")]
    pub base_url: String,
    #[serde(default = "default_ai_model")]
    pub model: String,
    #[serde(default = "default_ai_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_ai_temperature")]
    pub temperature: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_ai_base_url(),
            model: default_ai_model(),
            timeout_secs: default_ai_timeout_secs(),
            temperature: default_ai_temperature(),
        }
    }
}

impl AiConfig {
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            api_key: self.api_key.to_owned(),
            base_url: self.base_url.to_owned(),
            model: self.model.to_owned(),
            timeout_secs: self.timeout_secs,
            temperature: self.temperature,
        }
    }
}

fn default_ai_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_ai_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_ai_timeout_secs() -> u64 {
    30
}

fn default_ai_temperature() -> f32 {
    0.7
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct RootConfig {
    pub email: String,
    pub password: String,
    #[serde(default = "default_root_name")]
    pub name: String,
}

fn default_root_name() -> String {
    "Administrator".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy environment variables (DATABASE_URL, JWT_SECRET, AI_API_KEY)
    /// 2. Environment variables (MEALPLANNER__DATABASE__URL, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "sqlite:mealplanner.db")?
            .set_default("database.max_connections", 5)?
            .set_default("jwt.expiration_days", 7)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALPLANNER")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.cors_origins")
                .try_parsing(true),
        );

        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }
        if let Ok(jwt_secret) = env::var("JWT_SECRET") {
            builder = builder.set_override("jwt.secret", jwt_secret)?;
        }
        if let Ok(api_key) = env::var("AI_API_KEY") {
            builder = builder.set_override("ai.api_key", api_key)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt.secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long".to_string());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.jwt.expiration_days == 0 {
            return Err("JWT expiration_days must be at least 1".to_string());
        }
        if let Some(root) = &self.root {
            if root.password.len() < 8 {
                return Err("Root password must be at least 8 characters long".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                cors_origins: vec![],
            },
            database: DatabaseConfig {
                url: "sqlite:test.db".to_string(),
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: "test_secret_key_minimum_32_characters_long".to_string(),
                expiration_days: 7,
            },
            ai: AiConfig::default(),
            observability: ObservabilityConfig::default(),
            root: None,
        }
    }

    #[test]
    fn test_validation_short_secret() {
        let mut config = config();
        config.jwt.secret = "short".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_port() {
        let mut config = config();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_connections() {
        let mut config = config();
        config.database.max_connections = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_weak_root_password() {
        let mut config = config();
        config.root = Some(RootConfig {
            email: "root@mealplanner.localhost".to_string(),
            password: "root".to_string(),
            name: default_root_name(),
        });

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.child("config.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 8080

[jwt]
secret = "file_secret_key_minimum_32_characters_long"

[ai]
model = "gemini-test"
"#,
        )
        .unwrap();

        let config = Config::load(Some(path.to_str().unwrap().to_string())).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.ai.model, "gemini-test");
        assert_eq!(config.ai.timeout_secs, 30);
        assert!(config.root.is_none());
    }
}
