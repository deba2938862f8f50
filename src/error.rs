// ============================================
// src/error.rs
// エラー型の定義
// ============================================

use std::path::PathBuf;

/// コンテンツ(JSON)読み込み時のエラー
///
/// ストアの外には出さず、ログに残して空のコレクションに置き換える。
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {1} data: {0}")]
    Parse(#[source] serde_json::Error, &'static str),

    #[error("{0} data has no \"{0}\" array")]
    MissingCollection(&'static str),
}

/// ブックマーク・学習履歴の保存先に関するエラー
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("binary decode error: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}
