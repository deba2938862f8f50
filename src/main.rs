// ============================================
// src/main.rs (メインファイル)
// ============================================

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use tabiwiz::bookmarks::{BookmarkKind, BookmarkStore, FileStore};
use tabiwiz::config::Config;
use tabiwiz::content::{ContentStore, KanaType};
use tabiwiz::filter::{CharacterFilter, LocationFilter, PhraseFilter, VocabularyFilter};

mod cli;
mod tui;

// --------------------------------------------------
// コマンドライン引数
// --------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "tabiwiz")]
#[command(about = "TABI WiZ - 여행 일본어 학습")]
struct Args {
    /// Directory with locations.json, phrases.json, vocabulary.json and characters.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List locations
    Locations {
        #[arg(long)]
        region: Option<String>,
        /// Takes precedence over --region
        #[arg(long)]
        prefecture: Option<String>,
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one location with its phrases, words and nearby places
    Location { id: String },
    /// List phrases
    Phrases {
        /// Only phrases that reference this location id
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        situation: Option<String>,
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one phrase with its words and locations
    Phrase { id: String },
    /// List vocabulary
    Words {
        /// Repeatable; a word matches any of the given categories
        #[arg(long = "category")]
        categories: Vec<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one word with a preview of where it is used
    Word { id: String },
    /// List hiragana / katakana
    Characters {
        #[arg(long, value_enum)]
        kana: Option<KanaArg>,
    },
    /// Show one kana with words that use it
    Character { id: String },
    /// Toggle a bookmark
    Save {
        #[arg(value_enum)]
        kind: KindArg,
        id: String,
    },
    /// List bookmarks
    Saved {
        #[arg(value_enum)]
        kind: KindArg,
    },
    /// Start the vocabulary quiz
    Quiz {
        #[arg(long = "category")]
        categories: Vec<String>,
        #[arg(long)]
        location: Option<String>,
    },
    /// Show past quiz results
    History,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KanaArg {
    Hiragana,
    Katakana,
}

impl From<KanaArg> for KanaType {
    fn from(arg: KanaArg) -> Self {
        match arg {
            KanaArg::Hiragana => KanaType::Hiragana,
            KanaArg::Katakana => KanaType::Katakana,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Phrase,
    Word,
    Location,
}

impl From<KindArg> for BookmarkKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Phrase => BookmarkKind::Phrase,
            KindArg::Word => BookmarkKind::Word,
            KindArg::Location => BookmarkKind::Location,
        }
    }
}

// --------------------------------------------------
// メイン関数
// --------------------------------------------------

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = Config::new();
    if args.data_dir.is_some() {
        config.data_dir = args.data_dir;
    }

    let content = match &config.data_dir {
        Some(dir) => ContentStore::load_from_dir(dir),
        None => ContentStore::load_embedded(),
    };

    match args.command {
        Command::Locations {
            region,
            prefecture,
            tag,
            search,
        } => {
            let filter = LocationFilter {
                region,
                prefecture,
                tag,
                keyword: search,
            };
            let locations = filter.apply(&content);
            cli::print_locations(&locations);
            if filter.is_active() {
                println!("{} / {}", locations.len(), content.locations().len());
            }
        }
        Command::Location { id } => cli::print_location(&content, &id),
        Command::Phrases {
            location,
            situation,
            level,
            tag,
            search,
        } => {
            let filter = PhraseFilter {
                location,
                situation,
                level,
                tag,
                keyword: search,
            };
            cli::print_phrase_results(&content, &filter.apply(&content));
        }
        Command::Phrase { id } => cli::print_phrase(&content, &id),
        Command::Words {
            categories,
            location,
            tag,
            search,
        } => {
            let filter = VocabularyFilter {
                categories,
                location,
                tag,
                keyword: search,
            };
            cli::print_words(&content, &filter.apply(&content));
        }
        Command::Word { id } => cli::print_word(&content, &id, config.preview_size),
        Command::Characters { kana } => {
            let filter = CharacterFilter {
                kana: kana.map(KanaType::from),
            };
            cli::print_characters(&filter.apply(&content));
        }
        Command::Character { id } => cli::print_character(&content, &id, config.preview_size),
        Command::Save { kind, id } => {
            let mut bookmarks = BookmarkStore::load(FileStore::new(config.bookmarks_dir()));
            cli::toggle_bookmark(&content, &mut bookmarks, kind.into(), &id);
        }
        Command::Saved { kind } => {
            let bookmarks = BookmarkStore::load(FileStore::new(config.bookmarks_dir()));
            cli::print_saved(&content, &bookmarks, kind.into());
        }
        Command::Quiz { categories, location } => {
            tui::run_quiz(&content, &config, categories, location)?;
        }
        Command::History => cli::print_history(&config),
    }

    Ok(())
}
