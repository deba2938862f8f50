// ============================================
// src/cli.rs
// 一覧・詳細・ブックマークの表示 (ターミナル出力)
// ============================================

use console::style;

use tabiwiz::bookmarks::{BookmarkKind, BookmarkStore, KeyValueStore};
use tabiwiz::config::Config;
use tabiwiz::content::{Character, ContentStore, Location, Phrase, Vocabulary};
use tabiwiz::progress::StudyLog;
use tabiwiz::regions::{display_prefecture, display_region};
use tabiwiz::sample::sample_random;

fn heading(text: &str) {
    println!("{}", style(text).bold().cyan());
}

fn empty(what: &str) {
    println!("{}", style(format!("{what}이(가) 없습니다.")).dim());
}

fn not_found(kind: &str, id: &str) {
    eprintln!("{} {kind} '{id}'을(를) 찾을 수 없습니다.", style("!").red().bold());
}

// --------------------------------------------------
// 一覧
// --------------------------------------------------

pub fn print_locations(locations: &[&Location]) {
    if locations.is_empty() {
        empty("장소");
        return;
    }
    for location in locations {
        let recommended = if location.is_local_recommended {
            style(" ★현지 추천").yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "{:>3}  {} ({})  {} / {}  ★{:.1}{}",
            style(&location.id).dim(),
            style(&location.name).bold(),
            location.name_jp,
            display_region(&location.region),
            display_prefecture(&location.prefecture),
            location.rating,
            recommended,
        );
    }
}

pub fn print_phrases(phrases: &[&Phrase]) {
    if phrases.is_empty() {
        empty("표현");
        return;
    }
    for phrase in phrases {
        println!(
            "{:>4}  [{} / {}]  {}  {}",
            style(&phrase.id).dim(),
            phrase.situation,
            phrase.level,
            style(&phrase.jp).bold(),
            phrase.kr,
        );
    }
}

/// 検索結果の表現一覧。0件なら選べる場面とレベルを案内する
pub fn print_phrase_results(content: &ContentStore, phrases: &[&Phrase]) {
    print_phrases(phrases);
    if phrases.is_empty() {
        println!("{} {}", style("장면:").dim(), content.situations().join(", "));
        println!("{} {}", style("레벨:").dim(), content.levels().join(", "));
    }
}

pub fn print_words(content: &ContentStore, words: &[&Vocabulary]) {
    if words.is_empty() {
        empty("단어");
        return;
    }
    for word in words {
        println!(
            "{:>4}  [{}]  {} ({})  {}",
            style(&word.id).dim(),
            word.category,
            style(&word.jp).bold(),
            word.romaji,
            word.kr,
        );
    }
    println!();
    println!("{} {}", style("카테고리:").dim(), content.categories().join(", "));
}

pub fn print_characters(characters: &[&Character]) {
    if characters.is_empty() {
        empty("문자");
        return;
    }
    for c in characters {
        println!(
            "{:>4}  {}  {:<4} {:<9} {}",
            style(&c.id).dim(),
            style(&c.character).bold(),
            c.romaji,
            c.kana.as_str(),
            style(c.examples.join(", ")).dim(),
        );
    }
}

// --------------------------------------------------
// 詳細
// --------------------------------------------------

pub fn print_location(content: &ContentStore, id: &str) {
    let Some(location) = content.location_by_id(id) else {
        not_found("장소", id);
        return;
    };

    heading(&format!("{} ({})", location.name, location.name_jp));
    println!("{}", location.long_description.as_deref().unwrap_or(&location.description));
    println!(
        "{} / {}  ★{:.1}",
        display_region(&location.region),
        display_prefecture(&location.prefecture),
        location.rating
    );
    if !location.address_kr.is_empty() {
        println!("주소: {} ({})", location.address_kr, location.address);
    }
    if !location.hours.is_empty() {
        println!("영업시간: {}", location.hours);
    }
    if let Some(expert) = &location.local_expert {
        println!("현지 전문가: {}", expert.name);
    }
    if !location.tips.is_empty() {
        println!();
        heading("여행 팁");
        for tip in &location.tips {
            println!("  - {tip}");
        }
    }

    let phrases = content.location_phrases(id);
    if !phrases.is_empty() {
        println!();
        heading("유용한 표현");
        for phrase in phrases {
            println!("  {}  {}", style(&phrase.jp).bold(), phrase.kr);
        }
    }

    let words = content.related_vocabulary(id);
    if !words.is_empty() {
        println!();
        heading("관련 단어");
        for word in words {
            println!("  {} ({})  {}", style(&word.jp).bold(), word.romaji, word.kr);
        }
    }

    let nearby = content.nearby_locations(id);
    if !nearby.is_empty() {
        println!();
        heading("주변 장소");
        for place in nearby {
            println!("  {:>3}  {}", style(&place.id).dim(), place.name);
        }
    }
}

pub fn print_character(content: &ContentStore, id: &str, preview_size: usize) {
    let Some(c) = content.character_by_id(id) else {
        not_found("문자", id);
        return;
    };

    heading(&format!("{} ({})", c.character, c.romaji));
    println!("{}", c.kana.as_str());
    if !c.examples.is_empty() {
        println!("예: {}", c.examples.join(", "));
    }

    let words = sample_random(&content.vocabulary_for_character(id), preview_size);
    if !words.is_empty() {
        println!();
        heading("관련 단어");
        for word in words {
            println!("  {:>4}  {} ({})  {}", style(&word.id).dim(), style(&word.jp).bold(), word.romaji, word.kr);
        }
    }
}

pub fn print_phrase(content: &ContentStore, id: &str) {
    let Some(phrase) = content.phrase_by_id(id) else {
        not_found("표현", id);
        return;
    };

    heading(&phrase.jp);
    println!("{}", phrase.kr);
    println!("{} ({}) / {}", phrase.situation, phrase.situation_jp, phrase.level);

    let words = content.vocabulary_for_phrase(id);
    if !words.is_empty() {
        println!();
        heading("단어");
        for word in words {
            println!("  {} ({})  {}", style(&word.jp).bold(), word.romaji, word.kr);
        }
    }

    let locations = content.related_locations(id);
    if !locations.is_empty() {
        println!();
        heading("사용할 수 있는 장소");
        for location in locations {
            println!("  {:>3}  {}", style(&location.id).dim(), location.name);
        }
    }
}

pub fn print_word(content: &ContentStore, id: &str, preview_size: usize) {
    let Some(word) = content.vocabulary_by_id(id) else {
        not_found("단어", id);
        return;
    };

    heading(&format!("{} ({})", word.jp, word.romaji));
    println!("{}  [{}]", word.kr, word.category);
    if !word.example.is_empty() {
        println!("예문: {}", word.example);
        println!("      {}", style(&word.example_kr).dim());
    }

    let phrases = content.phrases_for_vocabulary(id);
    if !phrases.is_empty() {
        println!();
        heading("관련 표현");
        for phrase in phrases {
            println!("  {}  {}", style(&phrase.jp).bold(), phrase.kr);
        }
    }

    let preview = content.word_preview(id, preview_size, &mut rand::rng());
    if !preview.locations.is_empty() {
        println!();
        heading("이 단어를 쓰는 장소");
        for location in preview.locations {
            println!("  {:>3}  {}", style(&location.id).dim(), location.name);
        }
    }
    if !preview.phrases.is_empty() {
        println!();
        heading("이 단어가 나오는 표현");
        for phrase in preview.phrases {
            println!("  {}  {}", style(&phrase.jp).bold(), phrase.kr);
        }
    }
}

// --------------------------------------------------
// ブックマーク・履歴
// --------------------------------------------------

fn kind_label(kind: BookmarkKind) -> &'static str {
    match kind {
        BookmarkKind::Phrase => "표현",
        BookmarkKind::Word => "단어",
        BookmarkKind::Location => "장소",
    }
}

fn exists(content: &ContentStore, kind: BookmarkKind, id: &str) -> bool {
    match kind {
        BookmarkKind::Phrase => content.phrase_by_id(id).is_some(),
        BookmarkKind::Word => content.vocabulary_by_id(id).is_some(),
        BookmarkKind::Location => content.location_by_id(id).is_some(),
    }
}

pub fn toggle_bookmark<S: KeyValueStore>(
    content: &ContentStore,
    bookmarks: &mut BookmarkStore<S>,
    kind: BookmarkKind,
    id: &str,
) {
    // 保存済みのものはデータから消えていても外せるようにする
    if !bookmarks.is_saved(kind, id) && !exists(content, kind, id) {
        not_found(kind_label(kind), id);
        return;
    }

    if bookmarks.toggle(kind, id) {
        println!("{} {} '{id}'을(를) 저장했습니다.", style("✓").green().bold(), kind_label(kind));
    } else {
        println!("{} {} '{id}'을(를) 저장 목록에서 삭제했습니다.", style("-").yellow().bold(), kind_label(kind));
    }
}

pub fn print_saved<S: KeyValueStore>(content: &ContentStore, bookmarks: &BookmarkStore<S>, kind: BookmarkKind) {
    match kind {
        BookmarkKind::Phrase => print_phrases(&bookmarks.saved_phrases(content)),
        BookmarkKind::Word => {
            let words = bookmarks.saved_words(content);
            if words.is_empty() {
                empty("저장한 단어");
            } else {
                print_words(content, &words);
            }
        }
        BookmarkKind::Location => print_locations(&bookmarks.saved_locations(content)),
    }
}

pub fn print_history(config: &Config) {
    let log = StudyLog::load_from(&config.app_dir);
    if log.history.is_empty() {
        empty("퀴즈 기록");
        return;
    }

    heading("퀴즈 기록");
    for record in &log.history {
        println!(
            "  {}  {:<12} {}/{}",
            style(record.timestamp.format("%Y-%m-%d %H:%M")).dim(),
            record.label,
            record.correct,
            record.total,
        );
    }
    println!();
    println!(
        "총 {}회, 전체 정답률 {}%",
        style(log.quizzes_taken()).bold(),
        style(log.accuracy()).bold().green()
    );
}
