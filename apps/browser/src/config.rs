use std::{collections::HashMap, fs, time::Duration};

use viewer_core::LoggerConfig;

#[derive(Debug, Clone)]
pub struct Settings {
    pub catalog_path: String,
    pub analytics_url: String,
    pub actor_poll_attempts: usize,
    pub actor_poll_interval_ms: u64,
    pub debounce_quiet_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        let logger = LoggerConfig::default();
        Self {
            catalog_path: "./catalog.json".into(),
            analytics_url: logger.endpoint,
            actor_poll_attempts: logger.actor_poll_attempts,
            actor_poll_interval_ms: logger.actor_poll_interval.as_millis() as u64,
            debounce_quiet_ms: logger.debounce_quiet_period.as_millis() as u64,
        }
    }
}

impl Settings {
    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            endpoint: self.analytics_url.clone(),
            actor_poll_attempts: self.actor_poll_attempts,
            actor_poll_interval: Duration::from_millis(self.actor_poll_interval_ms),
            debounce_quiet_period: Duration::from_millis(self.debounce_quiet_ms),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("browser.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("catalog_path") {
                settings.catalog_path = v.clone();
            }
            if let Some(v) = file_cfg.get("analytics_url") {
                settings.analytics_url = v.clone();
            }
            if let Some(v) = file_cfg.get("actor_poll_attempts") {
                if let Ok(parsed) = v.parse() {
                    settings.actor_poll_attempts = parsed;
                }
            }
            if let Some(v) = file_cfg.get("actor_poll_interval_ms") {
                if let Ok(parsed) = v.parse() {
                    settings.actor_poll_interval_ms = parsed;
                }
            }
            if let Some(v) = file_cfg.get("debounce_quiet_ms") {
                if let Ok(parsed) = v.parse() {
                    settings.debounce_quiet_ms = parsed;
                }
            }
        }
    }

    if let Ok(v) = std::env::var("BROWSER_CATALOG_PATH") {
        settings.catalog_path = v;
    }
    if let Ok(v) = std::env::var("APP__CATALOG_PATH") {
        settings.catalog_path = v;
    }

    if let Ok(v) = std::env::var("ANALYTICS_URL") {
        settings.analytics_url = v;
    }
    if let Ok(v) = std::env::var("APP__ANALYTICS_URL") {
        settings.analytics_url = v;
    }

    if let Ok(v) = std::env::var("APP__ACTOR_POLL_ATTEMPTS") {
        if let Ok(parsed) = v.parse() {
            settings.actor_poll_attempts = parsed;
        }
    }
    if let Ok(v) = std::env::var("APP__ACTOR_POLL_INTERVAL_MS") {
        if let Ok(parsed) = v.parse() {
            settings.actor_poll_interval_ms = parsed;
        }
    }
    if let Ok(v) = std::env::var("APP__DEBOUNCE_QUIET_MS") {
        if let Ok(parsed) = v.parse() {
            settings.debounce_quiet_ms = parsed;
        }
    }

    settings
}
