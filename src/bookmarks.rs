// ============================================
// src/bookmarks.rs
// 保存した表現・単語・場所 (ブックマーク)
// ============================================

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::content::{ContentStore, Location, Phrase, Vocabulary};
use crate::error::StorageError;

/// ブックマークの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookmarkKind {
    Phrase,
    Word,
    Location,
}

impl BookmarkKind {
    pub const ALL: [BookmarkKind; 3] = [BookmarkKind::Phrase, BookmarkKind::Word, BookmarkKind::Location];

    /// 保存先のキー
    pub fn storage_key(&self) -> &'static str {
        match self {
            BookmarkKind::Phrase => "savedPhrases",
            BookmarkKind::Word => "savedWords",
            BookmarkKind::Location => "savedLocations",
        }
    }
}

// --------------------------------------------------
// 保存先
// --------------------------------------------------

/// キーと文字列値だけの簡単なストレージ
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// メモリ上だけのストレージ (テストや保存できない環境向け)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// キーごとに `<key>.json` を書くファイルストレージ
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // ディレクトリがまだなければ作成する
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

// --------------------------------------------------
// ブックマーク本体
// --------------------------------------------------

/// 種類ごとに保存済み ID を持つ (追加した順)
#[derive(Debug)]
pub struct BookmarkStore<S: KeyValueStore> {
    storage: S,
    saved: HashMap<BookmarkKind, Vec<String>>,
}

impl<S: KeyValueStore> BookmarkStore<S> {
    /// MARK:起動時に保存先から読み込む
    ///
    /// 読めない・壊れている値は空として扱う。
    pub fn load(storage: S) -> Self {
        let mut saved = HashMap::new();
        for kind in BookmarkKind::ALL {
            let ids = match read_ids(&storage, kind) {
                Ok(ids) => ids,
                Err(e) => {
                    tracing::warn!("Failed to read {}: {e}", kind.storage_key());
                    Vec::new()
                }
            };
            saved.insert(kind, ids);
        }
        Self { storage, saved }
    }

    /// MARK:保存状態を切り替える
    ///
    /// 切り替え後に保存されているかを返す。書き込みに失敗してもメモリ上の状態は変わる。
    pub fn toggle(&mut self, kind: BookmarkKind, id: &str) -> bool {
        let ids = self.saved.entry(kind).or_default();
        let now_saved = if let Some(pos) = ids.iter().position(|saved| saved == id) {
            ids.remove(pos);
            false
        } else {
            ids.push(id.to_string());
            true
        };

        if let Err(e) = self.persist(kind) {
            tracing::warn!("Failed to persist {}: {e}", kind.storage_key());
        }
        now_saved
    }

    pub fn list(&self, kind: BookmarkKind) -> &[String] {
        self.saved.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_saved(&self, kind: BookmarkKind, id: &str) -> bool {
        self.list(kind).iter().any(|saved| saved == id)
    }

    // 保存した ID をエンティティに解決する (存在しない ID は飛ばす)

    pub fn saved_phrases<'a>(&self, content: &'a ContentStore) -> Vec<&'a Phrase> {
        self.list(BookmarkKind::Phrase)
            .iter()
            .filter_map(|id| content.phrase_by_id(id))
            .collect()
    }

    pub fn saved_words<'a>(&self, content: &'a ContentStore) -> Vec<&'a Vocabulary> {
        self.list(BookmarkKind::Word)
            .iter()
            .filter_map(|id| content.vocabulary_by_id(id))
            .collect()
    }

    pub fn saved_locations<'a>(&self, content: &'a ContentStore) -> Vec<&'a Location> {
        self.list(BookmarkKind::Location)
            .iter()
            .filter_map(|id| content.location_by_id(id))
            .collect()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self, kind: BookmarkKind) -> Result<(), StorageError> {
        let json = serde_json::to_string(self.list(kind))?;
        self.storage.set(kind.storage_key(), &json)
    }
}

fn read_ids<S: KeyValueStore>(storage: &S, kind: BookmarkKind) -> Result<Vec<String>, StorageError> {
    match storage.get(kind.storage_key())? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}
