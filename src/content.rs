// ============================================
// src/content.rs
// コンテンツ(場所・表現・単語・文字)のデータ構造と読み込み
// ============================================

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ContentError;

// --------------------------------------------------
// データ構造
// --------------------------------------------------

/// 地元の人が紹介してくれた人
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalExpert {
    pub id: String,
    pub name: String,
}

/// おすすめスポット
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub id: String,
    /// 韓国語の表示名
    pub name: String,
    pub name_jp: String,
    pub description: String,
    pub long_description: Option<String>,
    pub image: String,
    pub image_query: Option<String>,
    pub gallery: Option<Vec<String>>,
    pub region: String,
    pub prefecture: String,
    pub address: String,
    pub address_kr: String,
    pub hours: String,
    pub phone: String,
    pub website: String,
    pub rating: f64,
    pub tags: Vec<String>,
    pub is_local_recommended: bool,
    pub local_expert: Option<LocalExpert>,
    pub related_phrase_ids: Vec<String>,
    pub related_vocabulary_ids: Vec<String>,
    pub tips: Vec<String>,
    pub nearby_location_ids: Vec<String>,
}

/// 場面ごとの会話表現
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Phrase {
    pub id: String,
    pub situation: String,
    pub situation_jp: String,
    pub jp: String,
    pub kr: String,
    pub audio: String,
    pub level: String,
    pub tags: Vec<String>,
    pub related_location_ids: Vec<String>,
    pub related_vocabulary_ids: Vec<String>,
}

/// 単語
///
/// 場所へのリンクは持たない。場所との関係は `Location::related_vocabulary_ids` 側にだけある。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vocabulary {
    pub id: String,
    pub jp: String,
    pub kr: String,
    pub romaji: String,
    pub example: String,
    pub example_kr: String,
    pub category: String,
    pub tags: Vec<String>,
    pub related_phrase_ids: Vec<String>,
}

/// かなの種類
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KanaType {
    Hiragana,
    Katakana,
    #[default]
    #[serde(other)]
    Unknown,
}

impl KanaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KanaType::Hiragana => "hiragana",
            KanaType::Katakana => "katakana",
            KanaType::Unknown => "unknown",
        }
    }
}

/// かな文字
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Character {
    pub id: String,
    pub character: String,
    pub romaji: String,
    #[serde(rename = "type")]
    pub kana: KanaType,
    pub examples: Vec<String>,
    pub related_vocabulary_ids: Vec<String>,
}

const LOCATIONS_FILE: &str = "locations.json";
const PHRASES_FILE: &str = "phrases.json";
const VOCABULARY_FILE: &str = "vocabulary.json";
const CHARACTERS_FILE: &str = "characters.json";

// --------------------------------------------------
// コンテンツストア
// --------------------------------------------------

/// 4種類のコレクションを保持する読み取り専用ストア
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    locations: Vec<Location>,
    phrases: Vec<Phrase>,
    vocabulary: Vec<Vocabulary>,
    characters: Vec<Character>,
}

impl ContentStore {
    /// 組み立て済みのコレクションからストアを作る
    pub fn from_parts(
        locations: Vec<Location>,
        phrases: Vec<Phrase>,
        vocabulary: Vec<Vocabulary>,
        characters: Vec<Character>,
    ) -> Self {
        Self {
            locations,
            phrases,
            vocabulary,
            characters,
        }
    }

    /// MARK:バイナリに埋め込んだデータを読み込む
    pub fn load_embedded() -> Self {
        tracing::info!("Loading embedded content...");
        Self::from_json(
            include_str!("../data/locations.json"),
            include_str!("../data/phrases.json"),
            include_str!("../data/vocabulary.json"),
            include_str!("../data/characters.json"),
        )
    }

    /// MARK:ディレクトリ内の4つの JSON を読み込む
    ///
    /// 読めなかったファイルは空のコレクションになる。
    pub fn load_from_dir(dir: &Path) -> Self {
        tracing::info!("Loading content from {}", dir.display());
        let read = |name: &str| -> String {
            let path = dir.join(name);
            match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(source) => {
                    let err = ContentError::Io { path, source };
                    tracing::error!("{err}");
                    // 空文字列はパースに失敗して空コレクションになる
                    String::new()
                }
            }
        };

        Self::from_json(
            &read(LOCATIONS_FILE),
            &read(PHRASES_FILE),
            &read(VOCABULARY_FILE),
            &read(CHARACTERS_FILE),
        )
    }

    /// JSON 文字列から読み込む (壊れたコレクションだけ空になる)
    pub fn from_json(locations: &str, phrases: &str, vocabulary: &str, characters: &str) -> Self {
        let store = Self {
            locations: parse_collection(locations, "locations"),
            phrases: parse_collection(phrases, "phrases"),
            vocabulary: parse_collection(vocabulary, "vocabulary"),
            characters: parse_collection(characters, "characters"),
        };
        tracing::info!(
            "Loaded {} locations, {} phrases, {} words, {} characters",
            store.locations.len(),
            store.phrases.len(),
            store.vocabulary.len(),
            store.characters.len()
        );
        store
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    pub fn vocabulary(&self) -> &[Vocabulary] {
        &self.vocabulary
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    // MARK:ID で1件取得 (見つからなければ None)

    pub fn location_by_id(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn phrase_by_id(&self, id: &str) -> Option<&Phrase> {
        self.phrases.iter().find(|p| p.id == id)
    }

    pub fn vocabulary_by_id(&self, id: &str) -> Option<&Vocabulary> {
        self.vocabulary.iter().find(|w| w.id == id)
    }

    pub fn character_by_id(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// 単語カテゴリの一覧 (重複なし、ソート済み)
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.vocabulary.iter().map(|w| w.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();
        categories.retain(|c| !c.is_empty());
        categories
    }

    /// 表現の場面の一覧 (出てきた順)
    pub fn situations(&self) -> Vec<&str> {
        distinct_in_order(self.phrases.iter().map(|p| p.situation.as_str()))
    }

    /// 表現のレベルの一覧 (出てきた順)
    pub fn levels(&self) -> Vec<&str> {
        distinct_in_order(self.phrases.iter().map(|p| p.level.as_str()))
    }
}

/// `{"<collection>": [...]}` 形式の JSON を読む
///
/// ドキュメント自体が壊れていればコレクションは空。壊れたレコードはそれだけ飛ばす。
fn parse_collection<T: DeserializeOwned>(json: &str, collection: &'static str) -> Vec<T> {
    let mut document: Value = match serde_json::from_str(json) {
        Ok(document) => document,
        Err(e) => {
            let err = ContentError::Parse(e, collection);
            tracing::error!("{err}, falling back to an empty collection");
            return Vec::new();
        }
    };

    let Some(Value::Array(records)) = document.get_mut(collection).map(Value::take) else {
        let err = ContentError::MissingCollection(collection);
        tracing::error!("{err}, falling back to an empty collection");
        return Vec::new();
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(|(i, mut record)| {
            drop_nulls(&mut record);
            match serde_json::from_value(record) {
                Ok(item) => Some(item),
                Err(e) => {
                    let err = ContentError::Parse(e, collection);
                    tracing::warn!("Skipping record #{i}: {err}");
                    None
                }
            }
        })
        .collect()
}

/// `null` のフィールドを消して、未設定 (デフォルト値) と同じ扱いにする
fn drop_nulls(value: &mut Value) {
    if let Value::Object(map) = value {
        map.retain(|_, v| !v.is_null());
        map.values_mut().for_each(drop_nulls);
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for value in values {
        if !value.is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
