use std::env;
use std::time::Duration;

use crate::router::Route;
use crate::storage::{ConfigFile, ThemePreference};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_USER_ID: u64 = 1;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const API_URL_ENV: &str = "RESEARCH_API_URL";

#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub user_id: Option<u64>,
    pub route: Option<Route>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub user_id: u64,
    pub username: Option<String>,
    pub theme: ThemePreference,
    pub request_timeout: Duration,
    pub start_route: Route,
}

impl Settings {
    pub fn load(overrides: Overrides, file: Option<ConfigFile>) -> Self {
        let env_url = env::var(API_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty());
        Self::resolve(overrides, env_url, file.unwrap_or_default())
    }

    fn resolve(overrides: Overrides, env_url: Option<String>, file: ConfigFile) -> Self {
        let api_url = overrides
            .api_url
            .or(env_url)
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let timeout_secs = file
            .request_timeout_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_url: api_url.trim().trim_end_matches('/').to_string(),
            user_id: overrides
                .user_id
                .or(file.user_id)
                .unwrap_or(DEFAULT_USER_ID),
            username: file.username.filter(|name| !name.trim().is_empty()),
            theme: file.theme.unwrap_or_default(),
            request_timeout: Duration::from_secs(timeout_secs),
            start_route: overrides.route.unwrap_or(Route::Landing),
        }
    }
}
