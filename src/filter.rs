// ============================================
// src/filter.rs
// 一覧画面の絞り込み (地域・タグ・カテゴリ・キーワードなど)
//
// 設定された条件をすべて満たすものだけを残す (AND)。
// 条件ごとに `retain` するので、結果は常に元の並び順。空文字・未設定の条件は無効。
// ============================================

use crate::content::{Character, ContentStore, KanaType, Location, Phrase, Vocabulary};

/// 空でない条件だけを取り出す
fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// タグの完全一致 (大文字小文字を区別しない)
fn has_tag(tags: &[String], tag: &str) -> bool {
    tags.iter().any(|t| t.to_lowercase() == tag.to_lowercase())
}

/// 部分一致用: フィールドのどれかにキーワードが含まれるか
fn contains_keyword<'a>(fields: impl IntoIterator<Item = &'a str>, keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    fields.into_iter().any(|f| f.to_lowercase().contains(&keyword))
}

// --------------------------------------------------
// 場所
// --------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationFilter {
    pub region: Option<String>,
    /// 指定されていれば `region` より優先する
    pub prefecture: Option<String>,
    pub tag: Option<String>,
    pub keyword: Option<String>,
}

impl LocationFilter {
    pub fn is_active(&self) -> bool {
        [&self.region, &self.prefecture, &self.tag, &self.keyword]
            .into_iter()
            .any(|v| active(v).is_some())
    }

    pub fn apply<'a>(&self, store: &'a ContentStore) -> Vec<&'a Location> {
        self.narrow(store.locations())
    }

    pub fn narrow<'a>(&self, locations: impl IntoIterator<Item = &'a Location>) -> Vec<&'a Location> {
        let mut result: Vec<&Location> = locations.into_iter().collect();

        if let Some(prefecture) = active(&self.prefecture) {
            result.retain(|l| l.prefecture == prefecture);
        } else if let Some(region) = active(&self.region) {
            result.retain(|l| l.region == region);
        }

        if let Some(tag) = active(&self.tag) {
            result.retain(|l| has_tag(&l.tags, tag));
        }

        if let Some(keyword) = active(&self.keyword) {
            result.retain(|l| {
                let fields = [l.name.as_str(), l.name_jp.as_str(), l.description.as_str()];
                contains_keyword(fields.into_iter().chain(l.tags.iter().map(String::as_str)), keyword)
            });
        }

        result
    }
}

// --------------------------------------------------
// 会話表現
// --------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhraseFilter {
    /// この場所に紐づく表現だけ (`relatedLocationIds` を見る)
    pub location: Option<String>,
    pub situation: Option<String>,
    pub level: Option<String>,
    pub tag: Option<String>,
    pub keyword: Option<String>,
}

impl PhraseFilter {
    pub fn apply<'a>(&self, store: &'a ContentStore) -> Vec<&'a Phrase> {
        self.narrow(store.phrases())
    }

    pub fn narrow<'a>(&self, phrases: impl IntoIterator<Item = &'a Phrase>) -> Vec<&'a Phrase> {
        let mut result: Vec<&Phrase> = phrases.into_iter().collect();

        if let Some(location) = active(&self.location) {
            result.retain(|p| p.related_location_ids.iter().any(|id| id == location));
        }

        if let Some(situation) = active(&self.situation) {
            let situation = situation.to_lowercase();
            result.retain(|p| p.situation.to_lowercase() == situation);
        }

        if let Some(level) = active(&self.level) {
            let level = level.to_lowercase();
            result.retain(|p| p.level.to_lowercase() == level);
        }

        if let Some(tag) = active(&self.tag) {
            result.retain(|p| has_tag(&p.tags, tag));
        }

        if let Some(keyword) = active(&self.keyword) {
            result.retain(|p| {
                let fields = [p.jp.as_str(), p.kr.as_str(), p.situation.as_str()];
                contains_keyword(fields.into_iter().chain(p.tags.iter().map(String::as_str)), keyword)
            });
        }

        result
    }
}

// --------------------------------------------------
// 単語
// --------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VocabularyFilter {
    /// どれかに当てはまれば OK (カテゴリ同士は OR)
    pub categories: Vec<String>,
    /// この場所の `relatedVocabularyIds` にある単語だけ
    pub location: Option<String>,
    pub tag: Option<String>,
    pub keyword: Option<String>,
}

impl VocabularyFilter {
    pub fn apply<'a>(&self, store: &'a ContentStore) -> Vec<&'a Vocabulary> {
        self.narrow(store, store.vocabulary())
    }

    /// 場所の条件は場所側のリストを見るので `store` が要る
    pub fn narrow<'a>(
        &self,
        store: &ContentStore,
        words: impl IntoIterator<Item = &'a Vocabulary>,
    ) -> Vec<&'a Vocabulary> {
        let mut result: Vec<&Vocabulary> = words.into_iter().collect();

        if let Some(location_id) = active(&self.location) {
            let ids: &[String] = store
                .location_by_id(location_id)
                .map(|l| l.related_vocabulary_ids.as_slice())
                .unwrap_or_default();
            result.retain(|w| ids.contains(&w.id));
        }

        let categories: Vec<&str> = self
            .categories
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect();
        if !categories.is_empty() {
            result.retain(|w| categories.contains(&w.category.as_str()));
        }

        if let Some(tag) = active(&self.tag) {
            result.retain(|w| has_tag(&w.tags, tag));
        }

        if let Some(keyword) = active(&self.keyword) {
            result.retain(|w| {
                let fields = [w.jp.as_str(), w.kr.as_str(), w.romaji.as_str(), w.category.as_str()];
                contains_keyword(fields.into_iter().chain(w.tags.iter().map(String::as_str)), keyword)
            });
        }

        result
    }
}

// --------------------------------------------------
// かな文字
// --------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CharacterFilter {
    pub kana: Option<KanaType>,
}

impl CharacterFilter {
    pub fn apply<'a>(&self, store: &'a ContentStore) -> Vec<&'a Character> {
        self.narrow(store.characters())
    }

    pub fn narrow<'a>(&self, characters: impl IntoIterator<Item = &'a Character>) -> Vec<&'a Character> {
        characters
            .into_iter()
            .filter(|c| self.kana.is_none_or(|kana| c.kana == kana))
            .collect()
    }
}
