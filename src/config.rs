use std::env;

pub struct AppConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let base_url =
            env::var("API_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());

        let timeout_ms = env::var("TIMEOUT_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(30_000);

        Self {
            base_url,
            timeout_ms,
        }
    }
}
