use std::env;
use std::path::PathBuf;

/// Settings read from the environment (and `.env`). CLI flags override them.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    pub port: u16,
    pub public_dir: PathBuf,

    pub cryptocompare_url: String,
    /// Empty or unset means anonymous access.
    pub cryptocompare_api_key: Option<String>,

    pub proxy_url: String,
    pub chart_out: PathBuf,
    pub refresh_secs: u64,
}

fn env_str(name: &str, default: &str) -> String {
    env_opt(name).unwrap_or_else(|| default.to_string())
}

fn env_opt(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|s| s.parse().ok()).unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind: env_str("BIND", "0.0.0.0"),
            port: parse_or(env_opt("PORT"), 3000),
            public_dir: PathBuf::from(env_str("PUBLIC_DIR", "public")),
            cryptocompare_url: env_str("CRYPTOCOMPARE_URL", halvings_cryptocompare::BASE_URL),
            cryptocompare_api_key: env_opt("CRYPTOCOMPARE_API_KEY"),
            proxy_url: env_str("PROXY_URL", "http://127.0.0.1:3000"),
            chart_out: PathBuf::from(env_str("CHART_OUT", "public/chart.json")),
            refresh_secs: parse_or(env_opt("REFRESH_SECS"), 300),
        }
    }
}
