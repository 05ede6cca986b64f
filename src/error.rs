// ============================================
// src/error.rs
// エラー型
// ============================================

/// アプリケーションエラーの統合型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 端末・標準入出力のエラー
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 設定ファイルエラー
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// セーブデータエラー
    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("logger already initialized: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// OS のデータディレクトリが取得できない
    #[error("no data directory available")]
    NoDataDir,
}
