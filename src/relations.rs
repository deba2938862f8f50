// ============================================
// src/relations.rs
// エンティティ同士の関連づけ (場所 → 表現 → 単語)
//
// 関連リストは「ゆるい参照」: 存在しない ID は結果から黙って落とす。
// 結果の並びは常に対象コレクションの順番。逆引きは毎回コレクションを走査する。
// ============================================

use rand::Rng;

use crate::content::{ContentStore, Location, Phrase, Vocabulary};
use crate::sample::sample;

/// 単語の詳細パネルに出す関連項目
#[derive(Debug, Clone)]
pub struct WordPreview<'a> {
    pub locations: Vec<&'a Location>,
    pub phrases: Vec<&'a Phrase>,
}

/// `ids` に含まれる要素だけを、`items` の順番のまま取り出す
fn resolve<'a, T>(items: &'a [T], ids: &[String], id_of: impl Fn(&T) -> &str) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| ids.iter().any(|id| id == id_of(*item)))
        .collect()
}

impl ContentStore {
    /// その場所を `relatedLocationIds` に持つ表現
    pub fn related_phrases(&self, location_id: &str) -> Vec<&Phrase> {
        if self.location_by_id(location_id).is_none() {
            return Vec::new();
        }
        self.phrases()
            .iter()
            .filter(|p| p.related_location_ids.iter().any(|id| id == location_id))
            .collect()
    }

    /// 場所自身の `relatedPhraseIds` を解決する
    pub fn location_phrases(&self, location_id: &str) -> Vec<&Phrase> {
        match self.location_by_id(location_id) {
            Some(location) => resolve(self.phrases(), &location.related_phrase_ids, |p| p.id.as_str()),
            None => Vec::new(),
        }
    }

    /// 場所の `relatedVocabularyIds` にある単語 (順方向)
    pub fn related_vocabulary(&self, location_id: &str) -> Vec<&Vocabulary> {
        match self.location_by_id(location_id) {
            Some(location) => resolve(self.vocabulary(), &location.related_vocabulary_ids, |w| w.id.as_str()),
            None => Vec::new(),
        }
    }

    /// 表現の `relatedLocationIds` にある場所
    pub fn related_locations(&self, phrase_id: &str) -> Vec<&Location> {
        match self.phrase_by_id(phrase_id) {
            Some(phrase) => resolve(self.locations(), &phrase.related_location_ids, |l| l.id.as_str()),
            None => Vec::new(),
        }
    }

    pub fn vocabulary_for_phrase(&self, phrase_id: &str) -> Vec<&Vocabulary> {
        match self.phrase_by_id(phrase_id) {
            Some(phrase) => resolve(self.vocabulary(), &phrase.related_vocabulary_ids, |w| w.id.as_str()),
            None => Vec::new(),
        }
    }

    pub fn phrases_for_vocabulary(&self, vocabulary_id: &str) -> Vec<&Phrase> {
        match self.vocabulary_by_id(vocabulary_id) {
            Some(word) => resolve(self.phrases(), &word.related_phrase_ids, |p| p.id.as_str()),
            None => Vec::new(),
        }
    }

    /// 逆引き: その単語を `relatedVocabularyIds` に持つ場所
    ///
    /// 単語側に場所へのリンクがないので全件走査になる。
    pub fn locations_referencing_vocabulary(&self, vocabulary_id: &str) -> Vec<&Location> {
        if self.vocabulary_by_id(vocabulary_id).is_none() {
            return Vec::new();
        }
        self.locations()
            .iter()
            .filter(|l| l.related_vocabulary_ids.iter().any(|id| id == vocabulary_id))
            .collect()
    }

    /// 逆引き: その単語を `relatedVocabularyIds` に持つ表現
    pub fn phrases_referencing_vocabulary(&self, vocabulary_id: &str) -> Vec<&Phrase> {
        if self.vocabulary_by_id(vocabulary_id).is_none() {
            return Vec::new();
        }
        self.phrases()
            .iter()
            .filter(|p| p.related_vocabulary_ids.iter().any(|id| id == vocabulary_id))
            .collect()
    }

    pub fn nearby_locations(&self, location_id: &str) -> Vec<&Location> {
        match self.location_by_id(location_id) {
            Some(location) => resolve(self.locations(), &location.nearby_location_ids, |l| l.id.as_str()),
            None => Vec::new(),
        }
    }

    /// かな文字の例に出てくる単語
    pub fn vocabulary_for_character(&self, character_id: &str) -> Vec<&Vocabulary> {
        match self.character_by_id(character_id) {
            Some(c) => resolve(self.vocabulary(), &c.related_vocabulary_ids, |w| w.id.as_str()),
            None => Vec::new(),
        }
    }

    /// 単語を参照している場所と表現を、それぞれ最大 `n` 件ランダムに選ぶ
    pub fn word_preview<R: Rng + ?Sized>(&self, vocabulary_id: &str, n: usize, rng: &mut R) -> WordPreview<'_> {
        let locations = self.locations_referencing_vocabulary(vocabulary_id);
        let phrases = self.phrases_referencing_vocabulary(vocabulary_id);
        WordPreview {
            locations: sample(&locations, n, rng),
            phrases: sample(&phrases, n, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Character;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ids<T>(items: &[&T], id_of: impl Fn(&T) -> &str) -> Vec<String> {
        items.iter().map(|i| id_of(*i).to_string()).collect()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn location(id: &str, phrases: &[&str], words: &[&str], nearby: &[&str]) -> Location {
        Location {
            id: id.to_string(),
            related_phrase_ids: strings(phrases),
            related_vocabulary_ids: strings(words),
            nearby_location_ids: strings(nearby),
            ..Default::default()
        }
    }

    fn phrase(id: &str, locations: &[&str], words: &[&str]) -> Phrase {
        Phrase {
            id: id.to_string(),
            related_location_ids: strings(locations),
            related_vocabulary_ids: strings(words),
            ..Default::default()
        }
    }

    fn word(id: &str, phrases: &[&str]) -> Vocabulary {
        Vocabulary {
            id: id.to_string(),
            kr: format!("kr-{id}"),
            related_phrase_ids: strings(phrases),
            ..Default::default()
        }
    }

    fn store() -> ContentStore {
        ContentStore::from_parts(
            vec![
                location("1", &["p2"], &["v3", "v1", "gone"], &["3", "2", "missing"]),
                location("2", &["p1", "p2", "p9"], &["v1"], &[]),
                location("3", &[], &["v2"], &["1"]),
            ],
            vec![
                phrase("p1", &["2", "1"], &["v2", "v1"]),
                phrase("p2", &["2"], &["v1"]),
                phrase("p3", &["3", "404"], &[]),
            ],
            vec![word("v1", &["p2", "p1", "p77"]), word("v2", &[]), word("v3", &["p3"])],
            vec![Character {
                id: "c1".to_string(),
                related_vocabulary_ids: strings(&["v2", "nope"]),
                ..Default::default()
            }],
        )
    }

    #[test]
    fn location_phrases_drops_dangling_ids() {
        let store = store();
        let phrases = store.location_phrases("2");
        assert_eq!(ids(&phrases, |p| p.id.as_str()), vec!["p1", "p2"]);
    }

    #[test]
    fn related_phrases_scans_phrase_links() {
        let store = store();
        assert_eq!(ids(&store.related_phrases("2"), |p| p.id.as_str()), vec!["p1", "p2"]);
        assert_eq!(ids(&store.related_phrases("1"), |p| p.id.as_str()), vec!["p1"]);
        assert!(store.related_phrases("missing").is_empty());
    }

    #[test]
    fn forward_lookups_follow_collection_order() {
        let store = store();
        // リストの順番ではなく単語コレクションの順番
        assert_eq!(ids(&store.related_vocabulary("1"), |w| w.id.as_str()), vec!["v1", "v3"]);
        assert_eq!(ids(&store.related_locations("p1"), |l| l.id.as_str()), vec!["1", "2"]);
        assert_eq!(ids(&store.vocabulary_for_phrase("p1"), |w| w.id.as_str()), vec!["v1", "v2"]);
        assert_eq!(ids(&store.phrases_for_vocabulary("v1"), |p| p.id.as_str()), vec!["p1", "p2"]);
        assert_eq!(ids(&store.nearby_locations("1"), |l| l.id.as_str()), vec!["2", "3"]);
        assert_eq!(ids(&store.vocabulary_for_character("c1"), |w| w.id.as_str()), vec!["v2"]);
    }

    #[test]
    fn dangling_targets_are_skipped() {
        let store = store();
        assert_eq!(ids(&store.related_locations("p3"), |l| l.id.as_str()), vec!["3"]);
        assert_eq!(store.related_vocabulary("1").len(), 2);
    }

    #[test]
    fn reverse_lookups_scan_owners() {
        let store = store();
        assert_eq!(
            ids(&store.locations_referencing_vocabulary("v1"), |l| l.id.as_str()),
            vec!["1", "2"]
        );
        assert_eq!(
            ids(&store.phrases_referencing_vocabulary("v1"), |p| p.id.as_str()),
            vec!["p1", "p2"]
        );
        assert!(store.phrases_referencing_vocabulary("v3").is_empty());
    }

    #[test]
    fn unknown_anchor_yields_empty() {
        let store = store();
        assert!(store.related_vocabulary("nope").is_empty());
        assert!(store.related_locations("nope").is_empty());
        assert!(store.vocabulary_for_phrase("nope").is_empty());
        assert!(store.phrases_for_vocabulary("nope").is_empty());
        assert!(store.locations_referencing_vocabulary("nope").is_empty());
        assert!(store.nearby_locations("nope").is_empty());
        assert!(store.location_phrases("nope").is_empty());
        assert!(store.vocabulary_for_character("nope").is_empty());
    }

    #[test]
    fn removing_a_target_only_removes_that_id() {
        let full = store();
        let mut words = full.vocabulary().to_vec();
        words.retain(|w| w.id != "v3");
        let trimmed = ContentStore::from_parts(
            full.locations().to_vec(),
            full.phrases().to_vec(),
            words,
            full.characters().to_vec(),
        );
        assert_eq!(ids(&trimmed.related_vocabulary("1"), |w| w.id.as_str()), vec!["v1"]);
    }

    #[test]
    fn word_preview_is_bounded() {
        let store = store();
        let mut rng = StdRng::seed_from_u64(5);
        let preview = store.word_preview("v1", 1, &mut rng);
        assert_eq!(preview.locations.len(), 1);
        assert_eq!(preview.phrases.len(), 1);

        let preview = store.word_preview("v1", 5, &mut rng);
        assert_eq!(preview.locations.len(), 2);
        assert_eq!(preview.phrases.len(), 2);
    }
}
