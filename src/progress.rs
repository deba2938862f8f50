// ============================================
// src/progress.rs
// 学習履歴 (クイズ結果) の構造と読み書きロジック
// ============================================

use bincode::config::standard;
use bincode::{Decode, Encode};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::quiz::Score;

const LOG_FILE_BIN: &str = "study_log.bin";
const LOG_FILE_JSON: &str = "study_log.json"; // デバッグ用

/// 1回ごとのクイズの記録
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyRecord {
    pub timestamp: DateTime<Utc>,
    /// 出題範囲 (カテゴリ名や場所名)
    pub label: String,
    pub correct: u32,
    pub total: u32,
}

/// bincode用の内部表現（DateTimeをi64に変換）
#[derive(Encode, Decode)]
struct StudyRecordBin {
    timestamp_secs: i64,
    label: String,
    correct: u32,
    total: u32,
}

impl From<&StudyRecord> for StudyRecordBin {
    fn from(record: &StudyRecord) -> Self {
        Self {
            timestamp_secs: record.timestamp.timestamp(),
            label: record.label.clone(),
            correct: record.correct,
            total: record.total,
        }
    }
}

impl From<StudyRecordBin> for StudyRecord {
    fn from(bin: StudyRecordBin) -> Self {
        Self {
            // 範囲外の値は起点時刻に丸める
            timestamp: Utc
                .timestamp_opt(bin.timestamp_secs, 0)
                .single()
                .unwrap_or_default(),
            label: bin.label,
            correct: bin.correct,
            total: bin.total,
        }
    }
}

/// 学習履歴
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyLog {
    /// 過去のクイズ記録 (古い順)
    pub history: Vec<StudyRecord>,
}

/// bincode用の内部表現
#[derive(Encode, Decode)]
struct StudyLogBin {
    history: Vec<StudyRecordBin>,
}

impl From<&StudyLog> for StudyLogBin {
    fn from(log: &StudyLog) -> Self {
        Self {
            history: log.history.iter().map(StudyRecordBin::from).collect(),
        }
    }
}

impl From<StudyLogBin> for StudyLog {
    fn from(bin: StudyLogBin) -> Self {
        Self {
            history: bin.history.into_iter().map(StudyRecord::from).collect(),
        }
    }
}

impl StudyLog {
    /// 終わったクイズを記録する
    pub fn record(&mut self, label: &str, score: Score) {
        self.history.push(StudyRecord {
            timestamp: Utc::now(),
            label: label.to_string(),
            correct: score.correct as u32,
            total: score.total as u32,
        });
    }

    pub fn quizzes_taken(&self) -> usize {
        self.history.len()
    }

    /// 全体の正答率 (0 〜 100)
    pub fn accuracy(&self) -> u32 {
        let (correct, total) = self
            .history
            .iter()
            .fold((0u64, 0u64), |(c, t), r| (c + r.correct as u64, t + r.total as u64));
        if total == 0 {
            return 0;
        }
        ((correct as f64 / total as f64) * 100.0).round() as u32
    }

    /// MARK:データをファイルに保存する (バイナリ + JSON)
    pub fn save_to(&self, dir: &Path) -> Result<(), StorageError> {
        // ディレクトリがまだなければ作成する
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }

        // --- 1. バイナリ形式で保存 (本番用) ---
        let file = File::create(dir.join(LOG_FILE_BIN))?;
        let mut writer = BufWriter::new(file);
        let encoded = bincode::encode_to_vec(StudyLogBin::from(self), standard())?;
        writer.write_all(&encoded)?;
        writer.flush()?;

        // --- 2. JSON形式で保存 (デバッグ用) ---
        let json = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(LOG_FILE_JSON), json)?;
        Ok(())
    }

    /// MARK:ファイルからデータを読み込む (バイナリ優先、JSONフォールバック)
    pub fn load_from(dir: &Path) -> Self {
        // 1. バイナリファイルから読み込みを試行
        let bin_path: PathBuf = dir.join(LOG_FILE_BIN);
        if bin_path.exists() {
            match fs::read(&bin_path) {
                Ok(buffer) => match bincode::decode_from_slice::<StudyLogBin, _>(&buffer, standard()) {
                    Ok((bin_data, _)) => return StudyLog::from(bin_data),
                    Err(e) => tracing::warn!("Corrupt study log {}: {e}", bin_path.display()),
                },
                Err(e) => tracing::warn!("Failed to read {}: {e}", bin_path.display()),
            }
        }

        // 2. バイナリ失敗時、JSONファイルから読み込みを試行
        let json_path = dir.join(LOG_FILE_JSON);
        if json_path.exists() {
            if let Ok(file) = File::open(&json_path) {
                let reader = BufReader::new(file);
                match serde_json::from_reader(reader) {
                    Ok(data) => return data,
                    Err(e) => tracing::warn!("Corrupt study log {}: {e}", json_path.display()),
                }
            }
        }

        // どちらも失敗した場合はデフォルト
        Self::default()
    }
}
