use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.edenredbenefits.com";
pub const DEFAULT_ORIGIN: &str = "https://myaccount.edenredbenefits.com";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub origin: String,
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BatchConfig {
    /// Pause between two consecutive receipts, in seconds
    pub delay_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            batch: BatchConfig { delay_seconds: 2 },
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ApiConfig {
    /// Referer sent alongside the origin header
    pub fn referer(&self) -> String {
        format!("{}/", self.origin.trim_end_matches('/'))
    }
}

impl Config {
    /// Load configuration: built-in defaults, then the optional file at `path`,
    /// then `EDENRED__*` environment variables.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let defaults = Config::default();
        let config = config::Config::builder()
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.origin", defaults.api.origin)?
            .set_default("api.user_agent", defaults.api.user_agent)?
            .set_default("batch.delay_seconds", defaults.batch.delay_seconds)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("EDENRED").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load("does/not/exist").unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.batch.delay_seconds, 2);
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[batch]\ndelay_seconds = 7\n[api]\nbase_url = \"http://localhost:9000\"").unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.batch.delay_seconds, 7);
        assert_eq!(config.api.base_url, "http://localhost:9000");
        assert_eq!(config.api.origin, DEFAULT_ORIGIN);
    }

    #[test]
    fn referer_has_trailing_slash() {
        let api = ApiConfig::default();
        assert_eq!(api.referer(), "https://myaccount.edenredbenefits.com/");
    }
}
