use crate::config::types::{Config, PathDefaults, UserSettings};
use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub const SETTINGS_FILE: &str = "settings.json";

impl Config {
    /// 讀取 settings.json，再套用環境變數覆寫
    pub fn new() -> Result<Self> {
        let settings = Self::load_settings(Path::new(SETTINGS_FILE))?;
        let mut config = Self {
            settings,
            path_defaults: PathDefaults::default(),
        };
        config.apply_env_overrides(std::env::vars());
        Ok(config)
    }

    pub fn load_settings(path: &Path) -> Result<UserSettings> {
        if !path.exists() {
            return Ok(UserSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }

    /// 套用環境變數，無法解析的數值會被忽略
    pub fn apply_env_overrides<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            let value = value.trim().to_string();
            if value.is_empty() {
                continue;
            }

            let settings = &mut self.settings;
            let paths = &mut self.path_defaults;
            match key.as_str() {
                "VIDEO_PATH" => paths.video_path = Some(value),
                "OUTPUT_FOLDER" => paths.output_folder = Some(value),
                "SOURCE_FOLDER" => paths.source_folder = Some(value),
                "SHARP_IMAGES_FOLDER" => paths.sharp_images_folder = Some(value),
                "FRAMES_FOLDER" => paths.frames_folder = Some(value),
                "COLLAGE_FOLDER" => paths.collage_folder = Some(value),
                "SHARPNESS_THRESHOLD" => set_parsed(&mut settings.triage.threshold, &key, &value),
                "SHARP_IF" => set_parsed(&mut settings.triage.sharp_if, &key, &value),
                "TOTAL_IMAGES_TO_EXTRACT" => {
                    set_parsed(&mut settings.extract.target_count, &key, &value);
                }
                "DYNAMIC_THRESHOLD" => match parse_flag(&value) {
                    Some(flag) => settings.triage.dynamic = flag,
                    None => warn!("忽略無法解析的環境變數 {key}={value}"),
                },
                _ => {}
            }
        }
    }
}

fn set_parsed<T: FromStr>(slot: &mut T, key: &str, value: &str) {
    match value.parse() {
        Ok(parsed) => *slot = parsed,
        Err(_) => warn!("忽略無法解析的環境變數 {key}={value}"),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
