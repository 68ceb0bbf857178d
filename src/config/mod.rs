use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Base URL baked in at build time; `VUELLO_API_URL` still wins at runtime.
pub const DEFAULT_API_URL: &str = match option_env!("VUELLO_API_URL") {
    Some(url) => url,
    None => "https://localhost:8000",
};

pub const DEFAULT_STATE_KEY: &str = "vuello";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_logging: bool,
    pub accept_invalid_certs: bool,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub dir: PathBuf,
    pub state_key: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // API overrides
        if let Ok(v) = env::var("VUELLO_API_URL") {
            self.api.base_url = v;
        }
        if let Ok(v) = env::var("VUELLO_REQUEST_LOGGING") {
            self.api.request_logging = v.parse().unwrap_or(self.api.request_logging);
        }
        if let Ok(v) = env::var("VUELLO_ACCEPT_INVALID_CERTS") {
            self.api.accept_invalid_certs = v.parse().unwrap_or(self.api.accept_invalid_certs);
        }
        if let Ok(v) = env::var("VUELLO_REQUEST_TIMEOUT_SECS") {
            self.api.timeout_secs = v.parse().ok();
        }

        // Storage overrides
        if let Ok(v) = env::var("VUELLO_CONFIG_DIR") {
            self.storage.dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("VUELLO_STATE_KEY") {
            self.storage.state_key = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                request_logging: true,
                // The local API server runs TLS with a self-signed certificate
                accept_invalid_certs: true,
                timeout_secs: None,
            },
            storage: StorageConfig::default(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                request_logging: true,
                accept_invalid_certs: false,
                timeout_secs: None,
            },
            storage: StorageConfig::default(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                request_logging: false,
                accept_invalid_certs: false,
                timeout_secs: None,
            },
            storage: StorageConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_config_dir(),
            state_key: DEFAULT_STATE_KEY.to_string(),
        }
    }
}

/// `$HOME/.config/vuello`, or the working directory when HOME is unset
fn default_config_dir() -> PathBuf {
    match env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".config").join("vuello"),
        Err(_) => PathBuf::from(".vuello"),
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
