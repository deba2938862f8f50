//! TABI WiZ core library
//!
//! 旅行の日本語学習コンテンツ (場所・表現・単語・文字) の読み込み、
//! 関連付け、絞り込み、単語クイズ、ブックマークを提供する。

pub mod bookmarks;
pub mod config;
pub mod content;
pub mod error;
pub mod filter;
pub mod progress;
pub mod quiz;
pub mod regions;
pub mod relations;
pub mod sample;

pub use bookmarks::{BookmarkKind, BookmarkStore, FileStore, KeyValueStore, MemoryStore};
pub use config::{Config, QuizConfig};
pub use content::{Character, ContentStore, KanaType, Location, Phrase, Vocabulary};
pub use filter::{CharacterFilter, LocationFilter, PhraseFilter, VocabularyFilter};
pub use quiz::{Quiz, QuizPhase, Score};
