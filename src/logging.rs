use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::storage;

const LOG_ENV: &str = "RESEARCH_LOG";
const DEFAULT_FILTER: &str = "info";

pub fn init(level: Option<&str>) -> Result<(), io::Error> {
    let path = storage::log_path()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Home directory not found"))?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(io::Error::other)
}

fn filter(level: Option<&str>) -> EnvFilter {
    if let Some(level) = level {
        if let Ok(filter) = EnvFilter::try_new(level) {
            return filter;
        }
    }
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_level_wins() {
        assert_eq!(filter(Some("debug")).to_string(), "debug");
    }

    #[test]
    fn invalid_level_falls_back() {
        let fallback = filter(Some("=!not a filter"));
        assert!(!fallback.to_string().is_empty());
    }
}
