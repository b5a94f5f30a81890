use std::{net::SocketAddr, time::Duration};

use anyhow::{anyhow, Context};
use billfold_core::constants::DEFAULT_RETENTION_YEARS;

pub struct Config {
    pub listen_addr: SocketAddr,
    /// Base URL of the hosted data API, without the `/rest/v1` suffix.
    pub data_api_url: String,
    pub data_api_key: String,
    /// Number of most recent plan years kept on save.
    pub retention_years: u32,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Config {
    /// Reads the configuration from the process environment, after loading `.env`.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let listen_addr: SocketAddr = lookup("BILLFOLD_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid BILLFOLD_LISTEN_ADDR")?;
        let data_api_url = lookup("BILLFOLD_DATA_API_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow!("BILLFOLD_DATA_API_URL is required"))?;
        let data_api_key = lookup("BILLFOLD_DATA_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow!("BILLFOLD_DATA_API_KEY is required"))?;
        let retention_years: u32 = match lookup("BILLFOLD_RETENTION_YEARS") {
            Some(v) => v.trim().parse().context("Invalid BILLFOLD_RETENTION_YEARS")?,
            None => DEFAULT_RETENTION_YEARS,
        };
        if retention_years == 0 {
            return Err(anyhow!("BILLFOLD_RETENTION_YEARS must be at least 1"));
        }
        let cors_allow = lookup("BILLFOLD_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = lookup("BILLFOLD_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30000);

        Ok(Self {
            listen_addr,
            data_api_url,
            data_api_key,
            retention_years,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("BILLFOLD_DATA_API_URL", "https://data.example.com"),
        ("BILLFOLD_DATA_API_KEY", "anon"),
    ];

    #[test]
    fn test_defaults() {
        let config = config(&REQUIRED).unwrap();
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.retention_years, 6);
        assert_eq!(config.cors_allow, vec!["*".to_string()]);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("BILLFOLD_RETENTION_YEARS", "3"));
        vars.push((
            "BILLFOLD_CORS_ALLOW_ORIGINS",
            "https://a.example.com, https://b.example.com",
        ));
        vars.push(("BILLFOLD_REQUEST_TIMEOUT_MS", "500"));
        let config = config(&vars).unwrap();
        assert_eq!(config.retention_years, 3);
        assert_eq!(config.cors_allow.len(), 2);
        assert_eq!(config.request_timeout, Duration::from_millis(500));
    }

    #[test]
    fn test_missing_or_invalid_values_are_errors() {
        assert!(config(&[("BILLFOLD_DATA_API_KEY", "anon")]).is_err());

        let mut vars = REQUIRED.to_vec();
        vars.push(("BILLFOLD_RETENTION_YEARS", "0"));
        assert!(config(&vars).is_err());

        let mut vars = REQUIRED.to_vec();
        vars.push(("BILLFOLD_LISTEN_ADDR", "not-an-addr"));
        assert!(config(&vars).is_err());
    }
}
