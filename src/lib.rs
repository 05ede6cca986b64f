// ============================================
// src/lib.rs
// ひらがなタイピングのローマ字判定エンジン
// ============================================

pub mod chunker;
pub mod config;
pub mod error;
pub mod focus;
pub mod logger;
pub mod patterns;
pub mod questions;
pub mod rewrite;
pub mod roman_mapping;
pub mod save_data;
pub mod score;
pub mod session;

pub use config::{AppConfig, Difficulty, GameMode, GeneratorConfig};
pub use error::{AppError, ConfigError, SaveError};
pub use focus::{BoardEvent, Target, TargetBoard, TargetId};
pub use patterns::{PatternGenerator, PatternSet, generate_patterns};
pub use roman_mapping::naive_romaji;
pub use session::{Key, KeyOutcome, SessionState, TypingSession};
