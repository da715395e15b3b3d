/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub level: Option<String>,
}

impl TracingConfig {
    pub fn new(environment: &str, json_format: bool, level: Option<String>) -> Self {
        Self {
            environment: environment.to_string(),
            json_format: json_format
                || std::env::var("LOG_FORMAT")
                    .map(|v| v.eq_ignore_ascii_case("json"))
                    .unwrap_or(false),
            level: level.filter(|l| !l.trim().is_empty()),
        }
    }

    pub fn filter_directives(&self) -> String {
        match &self.level {
            Some(level) => format!("{},chat_relay={},tower_http={}", level, level, level),
            None => DEFAULT_DIRECTIVES.to_string(),
        }
    }
}

pub const DEFAULT_DIRECTIVES: &str = "info,chat_relay=debug,tower_http=debug";

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new(
            &std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            false,
            None,
        )
    }
}
