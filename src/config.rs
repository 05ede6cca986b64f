// ============================================
// src/config.rs
// 設定（config.json）の構造と読み込み
// ============================================

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::ProjectDirs;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.json";
pub const MAX_TARGETS: usize = 8;
/// `max_patterns` に指定できる上限
pub const MAX_PATTERNS_LIMIT: usize = 4096;

/// お題の難易度
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// 打つ単語の種類
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// ひらがなをローマ字で打つ
    #[default]
    Hiragana,
    /// 英単語をそのまま打つ
    English,
}

/// パターン生成の規則スイッチ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// 1単語あたりの組み合わせ上限
    pub max_patterns: usize,
    /// 促音を省略した入力（gakou）を許す
    pub sokuon_omission: bool,
    /// 長音を縮めた入力（toukyou → tokyo）を許す
    pub long_vowel_contraction: bool,
    /// 拗音の別表記（sya, tya, zya）を許す
    pub yoon_variations: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_patterns: 256,
            sokuon_omission: true,
            long_vowel_contraction: true,
            yoon_variations: true,
        }
    }
}

/// アプリ全体の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub generator: GeneratorConfig,
    /// 同時に表示するお題の数
    pub targets: usize,
    /// お題の順番をシャッフルする
    pub shuffle: bool,
    pub difficulty: Difficulty,
    pub mode: GameMode,
    /// "error" / "warn" / "info" / "debug" / "trace" / "off"
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            targets: 3,
            shuffle: false,
            difficulty: Difficulty::Normal,
            mode: GameMode::Hiragana,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// ファイルから読み込む。ファイルが無ければ初期値
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PATTERNS_LIMIT).contains(&self.generator.max_patterns) {
            return Err(ConfigError::Validation(format!(
                "generator.max_patterns must be between 1 and {MAX_PATTERNS_LIMIT}, got {}",
                self.generator.max_patterns
            )));
        }
        if !(1..=MAX_TARGETS).contains(&self.targets) {
            return Err(ConfigError::Validation(format!(
                "targets must be between 1 and {MAX_TARGETS}, got {}",
                self.targets
            )));
        }
        LevelFilter::from_str(&self.log_level).map_err(|_| {
            ConfigError::Validation(format!("unknown log level {:?}", self.log_level))
        })?;
        Ok(())
    }

    /// 検証済みのログレベル（不正値なら Info）
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("jp", "romaji-drill", "romaji-drill")
}

/// OS ごとの設定ファイルの場所
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.generator.max_patterns, 256);
    }

    #[test]
    fn partial_generator_section_keeps_other_defaults() {
        let config =
            AppConfig::from_json(r#"{ "generator": { "sokuon_omission": false }, "targets": 5 }"#)
                .unwrap();
        assert!(!config.generator.sokuon_omission);
        assert!(config.generator.long_vowel_contraction);
        assert_eq!(config.targets, 5);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = AppConfig::from_json(r#"{ "colour": "red" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn validation_errors() {
        let err = AppConfig::from_json(r#"{ "targets": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = AppConfig::from_json(r#"{ "generator": { "max_patterns": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = AppConfig::from_json(r#"{ "log_level": "loud" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn max_patterns_has_a_ceiling() {
        let mut config = AppConfig::default();
        config.generator.max_patterns = MAX_PATTERNS_LIMIT;
        assert!(config.validate().is_ok());

        config.generator.max_patterns = 100_000_000;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn difficulty_and_mode_are_lowercase_names() {
        let config = AppConfig::from_json(r#"{ "difficulty": "hard", "mode": "english" }"#).unwrap();
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.mode, GameMode::English);

        let err = AppConfig::from_json(r#"{ "difficulty": "extreme" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn level_filter_parses_names() {
        let config = AppConfig {
            log_level: "debug".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.level_filter(), LevelFilter::Debug);
    }
}
