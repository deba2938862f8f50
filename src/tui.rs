// ============================================
// src/tui.rs
// 単語クイズの画面 (TUIセットアップと実行ループ)
// ============================================

use std::io::{self, IsTerminal, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dialoguer::{MultiSelect, theme::ColorfulTheme};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use tabiwiz::config::Config;
use tabiwiz::content::{ContentStore, Vocabulary};
use tabiwiz::filter::VocabularyFilter;
use tabiwiz::progress::StudyLog;
use tabiwiz::quiz::{Quiz, QuizPhase};

// --------------------------------------------------
// データ構造
// --------------------------------------------------

/// クイズ画面の状態
struct QuizApp<'a> {
    quiz: Quiz,
    /// 絞り込み後の単語 (出題元)
    pool: Vec<&'a Vocabulary>,
    /// ダミー選択肢の補充元
    all: &'a [Vocabulary],
    /// 履歴に残す出題範囲
    label: String,

    log: StudyLog,
    app_dir: PathBuf,
    /// 今のクイズを履歴に記録したか
    recorded: bool,
}

impl<'a> QuizApp<'a> {
    fn new(content: &'a ContentStore, config: &Config, pool: Vec<&'a Vocabulary>, label: String) -> Self {
        Self {
            quiz: Quiz::new(&config.quiz),
            pool,
            all: content.vocabulary(),
            label,
            log: StudyLog::load_from(&config.app_dir),
            app_dir: config.app_dir.clone(),
            recorded: false,
        }
    }

    fn start(&mut self) -> bool {
        self.recorded = false;
        self.quiz.restart(&self.pool, self.all, &mut rand::rng())
    }

    /// 番号キー (1始まり) で選択肢を選ぶ
    fn choose(&mut self, number: usize) {
        let Some(question) = self.quiz.current_question() else {
            return;
        };
        let Some(choice) = number.checked_sub(1).and_then(|i| question.options.get(i)).cloned() else {
            return;
        };
        self.quiz.answer(&choice);
    }

    /// フィードバック表示が終わったら次へ。完了したら履歴に記録する
    fn tick(&mut self, now: Instant) {
        self.quiz.advance_if_due(now);

        if self.quiz.phase() == QuizPhase::Completed && !self.recorded {
            self.log.record(&self.label, self.quiz.score());
            if let Err(e) = self.log.save_to(&self.app_dir) {
                tracing::warn!("Failed to save study log: {e}");
            }
            self.recorded = true;
        }
    }
}

// --------------------------------------------------
// 実行
// --------------------------------------------------

/// MARK:クイズを始める
///
/// カテゴリも場所も指定がなく、ターミナルから実行されたときはカテゴリを選ばせる。
pub fn run_quiz(
    content: &ContentStore,
    config: &Config,
    mut categories: Vec<String>,
    location: Option<String>,
) -> anyhow::Result<()> {
    if categories.is_empty() && location.is_none() && io::stdin().is_terminal() {
        categories = pick_categories(content)?;
    }

    let label = if !categories.is_empty() {
        categories.join(", ")
    } else if let Some(id) = &location {
        content.location_by_id(id).map(|l| l.name.clone()).unwrap_or_else(|| id.clone())
    } else {
        "전체".to_string()
    };

    let filter = VocabularyFilter {
        categories,
        location,
        ..Default::default()
    };
    let pool = filter.apply(content);

    let mut app = QuizApp::new(content, config, pool, label);
    if !app.start() {
        println!("선택한 조건에 맞는 단어가 없습니다.");
        return Ok(());
    }

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    result?;

    if app.recorded {
        let score = app.log.history.last().map(|r| (r.correct, r.total)).unwrap_or_default();
        println!("최근 결과: {}/{} (전체 정답률 {}%)", score.0, score.1, app.log.accuracy());
    }
    Ok(())
}

fn pick_categories(content: &ContentStore) -> anyhow::Result<Vec<String>> {
    let categories = content.categories();
    if categories.is_empty() {
        return Ok(Vec::new());
    }

    let picked = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("카테고리를 선택하세요 (선택하지 않으면 전체)")
        .items(&categories)
        .interact()?;
    Ok(picked.into_iter().map(|i| categories[i].to_string()).collect())
}

fn setup_terminal() -> io::Result<Terminal<impl Backend>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?; // 代替スクリーンを使用
    stdout().execute(Hide)?; // カーソルを非表示
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

fn restore_terminal(_terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
    stdout().execute(Show)?;
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<impl Backend>, app: &mut QuizApp) -> io::Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| ui(f, &*app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => {
                        app.quiz.end();
                        break;
                    }
                    KeyCode::Char('r') if app.quiz.phase() == QuizPhase::Completed => {
                        app.start();
                    }
                    KeyCode::Char(c) => {
                        if let Some(number) = c.to_digit(10) {
                            app.choose(number as usize);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

// --------------------------------------------------
// UI描画
// --------------------------------------------------

fn ui(f: &mut Frame, app: &QuizApp) {
    let size = f.area();
    // 枠線を描画
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("TABI WiZ ! - {}", app.label));
    let inner_area = block.inner(size);
    f.render_widget(block, size);

    match app.quiz.phase() {
        QuizPhase::Completed => draw_result(f, app, inner_area),
        _ => draw_question(f, app, inner_area),
    }
}

fn draw_question(f: &mut Frame, app: &QuizApp, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // [0] 進捗ゲージ
            Constraint::Length(1), // [1] スコア
            Constraint::Length(1), // [2] 空白
            Constraint::Length(1), // [3] 日本語
            Constraint::Length(1), // [4] ローマ字
            Constraint::Length(1), // [5] 空白
            Constraint::Min(4),    // [6] 選択肢
            Constraint::Length(1), // [7] 操作説明
        ])
        .split(area);

    let Some(question) = app.quiz.current_question() else {
        return;
    };
    let number = match app.quiz.phase() {
        QuizPhase::InProgress { index } => index + 1,
        _ => 0,
    };

    // 0. 進捗ゲージ
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::NONE))
        .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
        .percent(app.quiz.progress_percent())
        .label(format!("{} / {}", number, app.quiz.len()));
    f.render_widget(gauge, chunks[0]);

    // 1. スコア
    let score = app.quiz.score();
    f.render_widget(
        Paragraph::new(format!("Score: {} / {}", score.correct, score.total)).style(Style::default().fg(Color::Yellow)),
        chunks[1],
    );

    // 2. 問題
    f.render_widget(
        Paragraph::new(question.prompt.as_str())
            .style(Style::default().fg(Color::White).bold())
            .centered(),
        chunks[3],
    );
    f.render_widget(
        Paragraph::new(question.romaji.as_str())
            .style(Style::default().fg(Color::Gray))
            .centered(),
        chunks[4],
    );

    // 3. 選択肢 (回答後は正解を緑、選んだ誤答を赤)
    let selected = app.quiz.selected();
    let lines: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let style = match selected {
                None => Style::default().fg(Color::White),
                Some(_) if *option == question.answer => Style::default().fg(Color::Black).bg(Color::Green),
                Some(choice) if choice == option => Style::default().fg(Color::White).bg(Color::Red),
                Some(_) => Style::default().fg(Color::DarkGray),
            };
            Line::from(vec![
                Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::Gray)),
                Span::styled(option.as_str(), style),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines).centered(), chunks[6]);

    let help = match selected {
        Some(choice) if choice == question.answer => Line::from("정답입니다!").style(Style::default().fg(Color::Green)),
        Some(_) => Line::from(format!("정답: {}", question.answer)).style(Style::default().fg(Color::Red)),
        None => Line::from("1-4: 선택  Esc: 종료").style(Style::default().fg(Color::DarkGray)),
    };
    f.render_widget(Paragraph::new(help).centered(), chunks[7]);
}

fn draw_result(f: &mut Frame, app: &QuizApp, area: Rect) {
    let score = app.quiz.score();
    let lines = vec![
        Line::from(""),
        Line::from("퀴즈 완료!").style(Style::default().fg(Color::Cyan).bold()),
        Line::from(""),
        Line::from(format!("{} / {}  ({}%)", score.correct, score.total, score.percent()))
            .style(Style::default().fg(Color::Yellow).bold()),
        Line::from(score.grade().message()),
        Line::from(""),
        Line::from("r: 다시 하기  Esc: 종료").style(Style::default().fg(Color::DarkGray)),
    ];
    f.render_widget(Paragraph::new(lines).centered(), area);
}
