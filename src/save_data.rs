// ============================================
// src/save_data.rs
// セーブデータの構造と読み書きロジック
// ============================================

use bincode::config::standard;
use bincode::{Decode, Encode};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::project_dirs;
use crate::error::SaveError;
use crate::score::RunStats;

const SAVE_FILE_BIN: &str = "save_data.bin";
const SAVE_FILE_JSON: &str = "save_data.json"; // デバッグ用

/// 1単語ごとの記録
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRecord {
    pub timestamp: DateTime<Utc>,
    pub word: String,
    /// 実際に打ち切ったローマ字
    pub pattern: String,
    pub total_chars: u32,
    pub duration_sec: f64,
    pub misses: u32,
    pub cps: f64,
    pub score: f64,
    pub xp_gained: u32,
}

impl TypeRecord {
    pub fn new(word: &str, pattern: &str, stats: &RunStats) -> Self {
        Self {
            timestamp: Utc::now(),
            word: word.to_string(),
            pattern: pattern.to_string(),
            total_chars: stats.total_chars,
            duration_sec: stats.duration_sec,
            misses: stats.misses,
            cps: stats.cps(),
            score: stats.score(),
            xp_gained: stats.xp(),
        }
    }
}

/// bincode用の内部表現（DateTimeをi64に変換）
#[derive(Encode, Decode)]
struct TypeRecordBin {
    timestamp_secs: i64,
    word: String,
    pattern: String,
    total_chars: u32,
    duration_sec: f64,
    misses: u32,
    cps: f64,
    score: f64,
    xp_gained: u32,
}

impl From<&TypeRecord> for TypeRecordBin {
    fn from(record: &TypeRecord) -> Self {
        Self {
            timestamp_secs: record.timestamp.timestamp(),
            word: record.word.clone(),
            pattern: record.pattern.clone(),
            total_chars: record.total_chars,
            duration_sec: record.duration_sec,
            misses: record.misses,
            cps: record.cps,
            score: record.score,
            xp_gained: record.xp_gained,
        }
    }
}

impl From<TypeRecordBin> for TypeRecord {
    fn from(bin: TypeRecordBin) -> Self {
        Self {
            timestamp: Utc
                .timestamp_opt(bin.timestamp_secs, 0)
                .single()
                .unwrap_or_default(),
            word: bin.word,
            pattern: bin.pattern,
            total_chars: bin.total_chars,
            duration_sec: bin.duration_sec,
            misses: bin.misses,
            cps: bin.cps,
            score: bin.score,
            xp_gained: bin.xp_gained,
        }
    }
}

/// プレイヤーの進行状況データ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerData {
    pub level: u32,
    pub current_xp: u32,
    pub total_typed_chars: u32,
    pub total_misses: u32,
    /// 過去のタイピング記録
    pub history: Vec<TypeRecord>,
}

/// bincode用の内部表現
#[derive(Encode, Decode)]
struct PlayerDataBin {
    level: u32,
    current_xp: u32,
    total_typed_chars: u32,
    total_misses: u32,
    history: Vec<TypeRecordBin>,
}

impl From<&PlayerData> for PlayerDataBin {
    fn from(data: &PlayerData) -> Self {
        Self {
            level: data.level,
            current_xp: data.current_xp,
            total_typed_chars: data.total_typed_chars,
            total_misses: data.total_misses,
            history: data.history.iter().map(TypeRecordBin::from).collect(),
        }
    }
}

impl From<PlayerDataBin> for PlayerData {
    fn from(bin: PlayerDataBin) -> Self {
        Self {
            level: bin.level,
            current_xp: bin.current_xp,
            total_typed_chars: bin.total_typed_chars,
            total_misses: bin.total_misses,
            history: bin.history.into_iter().map(TypeRecord::from).collect(),
        }
    }
}

impl Default for PlayerData {
    /// プレイヤーデータの初期値
    fn default() -> Self {
        Self {
            level: 1,
            current_xp: 0,
            total_typed_chars: 0,
            total_misses: 0,
            history: Vec::new(),
        }
    }
}

impl PlayerData {
    /// 次のレベルまでに必要な経験値を計算する
    pub fn required_xp_for_next_level(&self) -> u32 {
        ((self.level as f64).powf(1.1) * 10.0).round() as u32
    }

    /// 経験値を加算し、レベルアップ判定を行う
    pub fn add_xp(&mut self, xp_to_add: u32, chars_typed: u32) -> bool {
        self.current_xp += xp_to_add;
        self.total_typed_chars += chars_typed;

        let mut leveled_up = false;
        // 必要経験値を超えている間、レベルを上げ続ける
        while self.current_xp >= self.required_xp_for_next_level() {
            self.current_xp -= self.required_xp_for_next_level();
            self.level += 1;
            leveled_up = true;
        }
        leveled_up
    }

    /// 1単語分の記録を反映する。レベルが上がったら true
    pub fn record(&mut self, record: TypeRecord) -> bool {
        let leveled_up = self.add_xp(record.xp_gained, record.total_chars);
        self.total_misses += record.misses;
        self.history.push(record);
        leveled_up
    }
}

/// セーブファイルの置き場所（バイナリ + JSON）
#[derive(Debug, Clone)]
pub struct SaveStore {
    bin_path: PathBuf,
    json_path: PathBuf,
}

impl SaveStore {
    /// 指定ディレクトリに置く
    pub fn at(dir: &Path) -> Self {
        Self {
            bin_path: dir.join(SAVE_FILE_BIN),
            json_path: dir.join(SAVE_FILE_JSON),
        }
    }

    /// OSごとのデータ保存用ディレクトリに置く
    pub fn default_location() -> Result<Self, SaveError> {
        let dirs = project_dirs().ok_or(SaveError::NoDataDir)?;
        Ok(Self::at(dirs.data_dir()))
    }

    pub fn bin_path(&self) -> &Path {
        &self.bin_path
    }

    /// MARK:データをファイルに保存する (バイナリ + JSON)
    pub fn save(&self, data: &PlayerData) -> Result<(), SaveError> {
        if let Some(parent) = self.bin_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // --- 1. バイナリ形式で保存 (本番用) ---
        let encoded = bincode::encode_to_vec(PlayerDataBin::from(data), standard())?;
        let mut writer = BufWriter::new(File::create(&self.bin_path)?);
        writer.write_all(&encoded)?;
        writer.flush()?;

        // --- 2. JSON形式で保存 (デバッグ用) ---
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&self.json_path, json)?;
        Ok(())
    }

    /// MARK:ファイルからデータを読み込む (バイナリ優先、JSONフォールバック)
    ///
    /// どちらも無い・壊れている場合は初期値。読み込み自体の IO エラーだけ返す。
    pub fn load(&self) -> Result<PlayerData, SaveError> {
        // 1. バイナリファイルから読み込みを試行
        if self.bin_path.exists() {
            let buffer = fs::read(&self.bin_path)?;
            match bincode::decode_from_slice::<PlayerDataBin, _>(&buffer, standard()) {
                Ok((bin_data, _)) => return Ok(PlayerData::from(bin_data)),
                Err(err) => log::warn!("{} is unreadable: {err}", self.bin_path.display()),
            }
        }

        // 2. バイナリ失敗時、JSONファイルから読み込みを試行
        if self.json_path.exists() {
            let reader = BufReader::new(File::open(&self.json_path)?);
            match serde_json::from_reader(reader) {
                Ok(data) => return Ok(data),
                Err(err) => log::warn!("{} is unreadable: {err}", self.json_path.display()),
            }
        }

        // どちらも失敗した場合はデフォルト
        Ok(PlayerData::default())
    }

    /// セーブデータを消す
    pub fn clear(&self) -> Result<(), SaveError> {
        for path in [&self.bin_path, &self.json_path] {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> TypeRecord {
        let stats = RunStats {
            total_chars: 4,
            misses: 1,
            duration_sec: 2.0,
        };
        TypeRecord::new("ねこ", "neko", &stats)
    }

    #[test]
    fn level_up_carries_over_xp() {
        let mut data = PlayerData::default();
        assert_eq!(data.required_xp_for_next_level(), 10);
        assert!(data.add_xp(25, 5));
        assert_eq!(data.level, 2);
        // Lv.2 の必要経験値は round(2^1.1 * 10) = 21
        assert_eq!(data.current_xp, 15);
        assert_eq!(data.total_typed_chars, 5);
    }

    #[test]
    fn record_updates_totals_and_history() {
        let mut data = PlayerData::default();
        data.record(sample_record());
        assert_eq!(data.total_misses, 1);
        assert_eq!(data.total_typed_chars, 4);
        assert_eq!(data.history.len(), 1);
        assert_eq!(data.history[0].pattern, "neko");
    }

    #[test]
    fn save_then_load_binary() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::at(dir.path());
        let mut data = PlayerData::default();
        data.record(sample_record());
        store.save(&data).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.history.len(), 1);
        assert_eq!(loaded.history[0].word, "ねこ");
        assert_eq!(loaded.total_misses, 1);
        // 秒未満は切り捨てて保存される
        assert_eq!(
            loaded.history[0].timestamp.timestamp(),
            data.history[0].timestamp.timestamp()
        );
    }

    #[test]
    fn corrupt_binary_falls_back_to_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::at(dir.path());
        let data = PlayerData {
            level: 7,
            ..PlayerData::default()
        };
        store.save(&data).unwrap();
        fs::write(dir.path().join(SAVE_FILE_BIN), b"\xff\xff").unwrap();

        assert_eq!(store.load().unwrap().level, 7);
    }

    #[test]
    fn corrupt_files_load_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::at(dir.path());
        fs::write(dir.path().join(SAVE_FILE_BIN), b"\xff\xff").unwrap();
        fs::write(dir.path().join(SAVE_FILE_JSON), "{ not json").unwrap();

        // 壊れたファイルはエラーにせず初期値で始める
        assert_eq!(store.load().unwrap(), PlayerData::default());
    }

    #[test]
    fn missing_files_load_defaults_and_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::at(dir.path());
        assert_eq!(store.load().unwrap(), PlayerData::default());
        store.clear().unwrap();
        store.save(&PlayerData::default()).unwrap();
        store.clear().unwrap();
        assert!(!store.bin_path().exists());
    }
}
