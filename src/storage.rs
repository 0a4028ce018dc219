use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Terminal,
    Light,
    Dark,
}

impl ThemePreference {
    pub fn next(self) -> Self {
        match self {
            ThemePreference::Terminal => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
            ThemePreference::Light => ThemePreference::Terminal,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemePreference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn locate() -> Option<Self> {
        let mut path = dirs::home_dir()?;
        path.push(".research-assistant.json");
        Some(Self { path })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn read(&self) -> Option<ConfigFile> {
        read_config_from(&self.path)
    }

    pub fn write_theme(&self, theme: ThemePreference) -> Result<(), io::Error> {
        self.update(|config| config.theme = Some(theme))
    }

    pub fn write_username(&self, username: Option<&str>) -> Result<(), io::Error> {
        self.update(|config| config.username = username.map(str::to_string))
    }

    fn update(&self, apply: impl FnOnce(&mut ConfigFile)) -> Result<(), io::Error> {
        let mut config = self.read().unwrap_or_default();
        apply(&mut config);
        write_config_to(&self.path, &config)
    }
}

fn read_config_from(path: &Path) -> Option<ConfigFile> {
    let contents = fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

fn write_config_to(path: &Path, config: &ConfigFile) -> Result<(), io::Error> {
    let json = serde_json::to_string_pretty(config).map_err(io::Error::other)?;
    fs::write(path, json)
}

pub fn log_path() -> Option<PathBuf> {
    let mut path = dirs::home_dir()?;
    path.push(".research-assistant.log");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = ConfigFile {
            api_url: Some("http://example.test:8080".to_string()),
            user_id: Some(4),
            username: Some("ada".to_string()),
            theme: Some(ThemePreference::Dark),
            request_timeout_secs: None,
        };
        write_config_to(&path, &config).unwrap();
        assert_eq!(read_config_from(&path), Some(config));
    }

    #[test]
    fn unreadable_config_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(read_config_from(&path), None);
        fs::write(&path, "not json").unwrap();
        assert_eq!(read_config_from(&path), None);
    }

    #[test]
    fn unset_fields_are_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = ConfigFile {
            theme: Some(ThemePreference::Light),
            ..ConfigFile::default()
        };
        write_config_to(&path, &config).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"light\""));
        assert!(!contents.contains("api_url"));
    }

    #[test]
    fn store_updates_keep_other_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join("config.json"));
        store.write_username(Some("ada")).unwrap();
        store.write_theme(ThemePreference::Dark).unwrap();
        let config = store.read().unwrap();
        assert_eq!(config.username.as_deref(), Some("ada"));
        assert_eq!(config.theme, Some(ThemePreference::Dark));

        store.write_username(None).unwrap();
        let config = store.read().unwrap();
        assert_eq!(config.username, None);
        assert_eq!(config.theme, Some(ThemePreference::Dark));
    }

    #[test]
    fn theme_cycles_back_to_terminal() {
        let theme = ThemePreference::Terminal.next().next().next();
        assert_eq!(theme, ThemePreference::Terminal);
    }
}
