// ============================================
// src/config.rs
// 設定 (環境変数 + デフォルト値)
// ============================================

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

fn default_quiz_length() -> usize {
    10
}

fn default_feedback_delay_ms() -> u64 {
    1500
}

fn default_preview_size() -> usize {
    5
}

/// クイズの設定
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// 1回のクイズの最大問題数
    #[serde(default = "default_quiz_length")]
    pub length: usize,
    /// 回答後、次の問題に進むまでの待ち時間
    #[serde(default = "default_feedback_delay_ms")]
    pub feedback_delay_ms: u64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            length: default_quiz_length(),
            feedback_delay_ms: default_feedback_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 外部のコンテンツ JSON を置いたディレクトリ (None なら埋め込みデータ)
    pub data_dir: Option<PathBuf>,
    /// ブックマークや学習履歴の保存先
    pub app_dir: PathBuf,
    pub quiz: QuizConfig,
    /// 「関連項目」プレビューの件数
    #[serde(default = "default_preview_size")]
    pub preview_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            app_dir: default_app_dir(),
            quiz: QuizConfig::default(),
            preview_size: default_preview_size(),
        }
    }
}

impl Config {
    /// 環境変数から設定を作る (未設定・不正な値はデフォルト)
    pub fn new() -> Self {
        let data_dir = env::var("TABIWIZ_DATA_DIR").ok().map(PathBuf::from);

        let app_dir = env::var("TABIWIZ_APP_DIR")
            .ok()
            .map(PathBuf::from)
            .unwrap_or_else(default_app_dir);

        let length = env::var("TABIWIZ_QUIZ_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or_else(default_quiz_length);

        let feedback_delay_ms = env::var("TABIWIZ_FEEDBACK_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_feedback_delay_ms);

        let preview_size = env::var("TABIWIZ_PREVIEW_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_preview_size);

        Config {
            data_dir,
            app_dir,
            quiz: QuizConfig {
                length,
                feedback_delay_ms,
            },
            preview_size,
        }
    }

    pub fn bookmarks_dir(&self) -> PathBuf {
        self.app_dir.join("bookmarks")
    }
}

/// MARK:OS ごとのデータ保存用ディレクトリ
///
/// 取得できなければカレントディレクトリ (フォールバック)
fn default_app_dir() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("jp", "Fukumoto0141", "TABI_WIZ") {
        return proj_dirs.data_dir().to_path_buf();
    }
    tracing::warn!("Could not resolve a data directory, using the working directory");
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.data_dir.is_none());
        assert_eq!(config.quiz.length, 10);
        assert_eq!(config.quiz.feedback_delay_ms, 1500);
        assert_eq!(config.preview_size, 5);
        assert!(config.bookmarks_dir().ends_with("bookmarks"));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"quiz":{"length":5}}"#).unwrap();
        assert_eq!(config.quiz.length, 5);
        assert_eq!(config.quiz.feedback_delay_ms, 1500);
        assert_eq!(config.preview_size, 5);
    }
}
