use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use shared::domain::Language;

pub const DEFAULT_CONFIG_PATH: &str = "companion.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub language: Language,
    pub log_filter: String,
    pub user_id: String,
    pub display_name: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::En,
            log_filter: "warn,client_core=info".into(),
            user_id: "local-user".into(),
            display_name: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    language: Option<String>,
    log_filter: Option<String>,
    user_id: Option<String>,
    display_name: Option<String>,
}

pub fn load_settings(config_path: &Path) -> anyhow::Result<Settings> {
    load_settings_with(config_path, |key| std::env::var(key).ok())
}

pub fn load_settings_with(
    config_path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if config_path.exists() {
        let raw = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config '{}'", config_path.display()))?;
        let file_cfg: FileSettings = toml::from_str(&raw)
            .with_context(|| format!("invalid config '{}'", config_path.display()))?;
        if let Some(v) = file_cfg.language {
            settings.language = v.parse()?;
        }
        if let Some(v) = file_cfg.log_filter {
            settings.log_filter = v;
        }
        if let Some(v) = file_cfg.user_id {
            settings.user_id = v;
        }
        settings.display_name = file_cfg.display_name.or(settings.display_name);
    }

    if let Some(v) = env("APP__LANGUAGE") {
        settings.language = v.parse()?;
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_language_is_parsed_and_env_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("companion.toml");
        fs::write(&path, "language = \"ar\"\ndisplay_name = \"Saleh Al-Jamil\"\n").expect("write");

        let settings = load_settings_with(&path, |_| None).expect("settings");
        assert_eq!(settings.language, Language::Ar);
        assert_eq!(settings.display_name.as_deref(), Some("Saleh Al-Jamil"));

        let settings = load_settings_with(&path, |key| {
            (key == "APP__LANGUAGE").then(|| "en".to_string())
        })
        .expect("settings");
        assert_eq!(settings.language, Language::En);
    }

    #[test]
    fn unsupported_language_is_rejected() {
        let missing = Path::new("definitely-not-here.toml");
        let result = load_settings_with(missing, |key| {
            (key == "APP__LANGUAGE").then(|| "fr".to_string())
        });
        assert!(result.is_err());
    }
}
