// ============================================
// src/quiz.rs
// 単語クイズ (4択) の問題生成と進行管理
// ============================================

use std::time::{Duration, Instant};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::QuizConfig;
use crate::content::Vocabulary;
use crate::sample::{sample, shuffled};

/// 1問あたりの選択肢の数 (正解 + ダミー)
pub const OPTION_COUNT: usize = 4;
const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;

// --------------------------------------------------
// データ構造
// --------------------------------------------------

/// 1問分のデータ
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub word_id: String,
    /// 出題する日本語
    pub prompt: String,
    pub romaji: String,
    /// 正解 (韓国語訳)
    pub answer: String,
    /// 画面に出す順番の選択肢
    pub options: Vec<String>,
}

/// クイズの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    NotStarted,
    InProgress { index: usize },
    Completed,
}

/// 正解数 / 回答数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

/// 結果画面の評価
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Perfect,
    Good,
    KeepPracticing,
}

impl Grade {
    pub fn message(&self) -> &'static str {
        match self {
            Grade::Perfect => "완벽해요! 모든 문제를 맞혔습니다.",
            Grade::Good => "잘했어요! 대부분의 단어를 알고 있네요.",
            Grade::KeepPracticing => "좋은 시도였어요! 더 연습해보세요.",
        }
    }
}

impl Score {
    /// 正答率 (0 〜 100)
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.correct as f64 / self.total as f64) * 100.0).round() as u32
    }

    pub fn grade(&self) -> Grade {
        if self.correct == self.total {
            Grade::Perfect
        } else if self.correct as f64 >= self.total as f64 * 0.7 {
            Grade::Good
        } else {
            Grade::KeepPracticing
        }
    }
}

/// 回答したときの判定結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub answer: String,
    /// 最後の問題だったか
    pub is_last: bool,
}

// --------------------------------------------------
// 問題生成
// --------------------------------------------------

/// 訳語の重複を除いたリスト (`exclude` に入っているものと空文字は除く)
fn distinct_translations<'a>(words: impl IntoIterator<Item = &'a Vocabulary>, exclude: &[&str]) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    for word in words {
        let kr = word.kr.as_str();
        if kr.is_empty() || exclude.contains(&kr) || result.iter().any(|r| r == kr) {
            continue;
        }
        result.push(kr.to_string());
    }
    result
}

/// 正解 + ダミー3つを混ぜた選択肢を作る
///
/// ダミーは絞り込み後の単語が4つ以上ならそこから、足りなければ全単語から取る。
/// 全単語を使っても訳語が4種類に満たないときは、選択肢を減らして返す。
pub fn build_options<R: Rng + ?Sized>(
    word: &Vocabulary,
    pool: &[&Vocabulary],
    all: &[Vocabulary],
    rng: &mut R,
) -> Vec<String> {
    let correct = word.kr.as_str();
    let use_pool = pool.len() >= OPTION_COUNT;

    let candidates = if use_pool {
        distinct_translations(pool.iter().copied(), &[correct])
    } else {
        distinct_translations(all, &[correct])
    };
    let mut distractors = sample(&candidates, DISTRACTOR_COUNT, rng);

    // 絞り込み後の訳語がかぶっていて足りない分は全単語から補う
    if use_pool && distractors.len() < DISTRACTOR_COUNT {
        let mut exclude: Vec<&str> = distractors.iter().map(String::as_str).collect();
        exclude.push(correct);
        let extra = distinct_translations(all, &exclude);
        distractors.extend(sample(&extra, DISTRACTOR_COUNT - distractors.len(), rng));
    }

    let mut options = Vec::with_capacity(OPTION_COUNT);
    options.push(correct.to_string());
    options.extend(distractors);
    options.shuffle(rng);
    options
}

/// 絞り込み後の単語からクイズの問題列を作る (最大 `limit` 問、同じ単語は1回だけ)
pub fn build_questions<R: Rng + ?Sized>(
    pool: &[&Vocabulary],
    all: &[Vocabulary],
    limit: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut words = shuffled(pool, rng);
    words.truncate(limit.min(pool.len()));

    words
        .into_iter()
        .map(|word| Question {
            word_id: word.id.clone(),
            prompt: word.jp.clone(),
            romaji: word.romaji.clone(),
            answer: word.kr.clone(),
            options: build_options(word, pool, all, rng),
        })
        .collect()
}

// --------------------------------------------------
// 進行管理
// --------------------------------------------------

/// クイズ全体の状態
#[derive(Debug, Clone)]
pub struct Quiz {
    length: usize,
    feedback_delay: Duration,

    questions: Vec<Question>,
    phase: QuizPhase,
    score: Score,

    /// 今の問題で選んだ答え (未回答なら None)
    selected: Option<String>,
    /// 回答した時刻 (フィードバック表示の待ち時間用)
    answered_at: Option<Instant>,
}

impl Default for Quiz {
    fn default() -> Self {
        Self::new(&QuizConfig::default())
    }
}

impl Quiz {
    pub fn new(config: &QuizConfig) -> Self {
        Self {
            length: config.length,
            feedback_delay: Duration::from_millis(config.feedback_delay_ms),
            questions: Vec::new(),
            phase: QuizPhase::NotStarted,
            score: Score::default(),
            selected: None,
            answered_at: None,
        }
    }

    /// MARK:クイズ開始
    ///
    /// 問題が1問も作れない (単語が空・問題数が0) ときは何もせず false を返す。
    pub fn start<R: Rng + ?Sized>(&mut self, pool: &[&Vocabulary], all: &[Vocabulary], rng: &mut R) -> bool {
        let questions = build_questions(pool, all, self.length, rng);
        if questions.is_empty() {
            tracing::debug!("Quiz not started: no questions (pool {}, length {})", pool.len(), self.length);
            return false;
        }

        self.questions = questions;
        self.phase = QuizPhase::InProgress { index: 0 };
        self.score = Score::default();
        self.selected = None;
        self.answered_at = None;
        tracing::debug!("Quiz started with {} questions", self.questions.len());
        true
    }

    /// 同じ条件で問題を作り直す
    pub fn restart<R: Rng + ?Sized>(&mut self, pool: &[&Vocabulary], all: &[Vocabulary], rng: &mut R) -> bool {
        self.start(pool, all, rng)
    }

    /// MARK:回答する
    ///
    /// 最初の回答だけが採点される。回答済み・進行中でないときは None。
    pub fn answer(&mut self, choice: &str) -> Option<AnswerOutcome> {
        self.answer_at(choice, Instant::now())
    }

    pub fn answer_at(&mut self, choice: &str, now: Instant) -> Option<AnswerOutcome> {
        let QuizPhase::InProgress { index } = self.phase else {
            return None;
        };
        if self.selected.is_some() {
            return None;
        }
        let question = self.questions.get(index)?;

        let is_correct = choice == question.answer;
        let outcome = AnswerOutcome {
            is_correct,
            answer: question.answer.clone(),
            is_last: index + 1 >= self.questions.len(),
        };

        self.selected = Some(choice.to_string());
        self.answered_at = Some(now);
        self.score.total += 1;
        if is_correct {
            self.score.correct += 1;
        }
        tracing::debug!("Question {} answered (correct: {})", index + 1, is_correct);
        Some(outcome)
    }

    /// フィードバックの表示時間が過ぎていれば次へ進む
    pub fn advance_if_due(&mut self, now: Instant) -> bool {
        match self.answered_at {
            Some(at) if now.saturating_duration_since(at) >= self.feedback_delay => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    /// 次の問題へ (最後の問題なら完了)。未回答のときは何もしない
    pub fn advance(&mut self) {
        let QuizPhase::InProgress { index } = self.phase else {
            return;
        };
        if self.selected.is_none() {
            return;
        }

        self.selected = None;
        self.answered_at = None;
        if index + 1 < self.questions.len() {
            self.phase = QuizPhase::InProgress { index: index + 1 };
        } else {
            self.phase = QuizPhase::Completed;
            tracing::debug!("Quiz completed: {}/{}", self.score.correct, self.score.total);
        }
    }

    /// MARK:クイズ終了 (スコアも問題も捨てる)
    pub fn end(&mut self) {
        self.questions.clear();
        self.phase = QuizPhase::NotStarted;
        self.score = Score::default();
        self.selected = None;
        self.answered_at = None;
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            QuizPhase::InProgress { index } => self.questions.get(index),
            _ => None,
        }
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// 進捗率 (0 〜 100)
    pub fn progress_percent(&self) -> u16 {
        match self.phase {
            QuizPhase::NotStarted => 0,
            QuizPhase::Completed => 100,
            QuizPhase::InProgress { index } if !self.questions.is_empty() => {
                (index * 100 / self.questions.len()) as u16
            }
            QuizPhase::InProgress { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn word(id: &str, kr: &str) -> Vocabulary {
        Vocabulary {
            id: id.to_string(),
            jp: format!("jp-{id}"),
            kr: kr.to_string(),
            ..Default::default()
        }
    }

    fn words(n: usize) -> Vec<Vocabulary> {
        (0..n).map(|i| word(&format!("w{i}"), &format!("뜻{i}"))).collect()
    }

    fn assert_well_formed(question: &Question) {
        assert_eq!(question.options.len(), OPTION_COUNT);
        let unique: HashSet<_> = question.options.iter().collect();
        assert_eq!(unique.len(), OPTION_COUNT);
        assert_eq!(question.options.iter().filter(|o| **o == question.answer).count(), 1);
    }

    #[test]
    fn quiz_length_is_capped_at_ten() {
        let all = words(25);
        let pool: Vec<&Vocabulary> = all.iter().collect();
        let mut rng = StdRng::seed_from_u64(1);
        let mut quiz = Quiz::default();

        assert!(quiz.start(&pool, &all, &mut rng));
        assert_eq!(quiz.len(), 10);
        let ids: HashSet<_> = quiz.questions().iter().map(|q| q.word_id.clone()).collect();
        assert_eq!(ids.len(), 10);
        quiz.questions().iter().for_each(assert_well_formed);
    }

    #[test]
    fn small_pool_uses_full_collection_for_distractors() {
        let all = words(12);
        let pool: Vec<&Vocabulary> = all.iter().take(3).collect();
        let pool_translations: HashSet<&str> = pool.iter().map(|w| w.kr.as_str()).collect();

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let questions = build_questions(&pool, &all, 10, &mut rng);
            assert_eq!(questions.len(), 3);
            for question in &questions {
                assert_well_formed(question);
                // プール内の訳語は自分以外に2つしかないので、外から最低1つは来る
                assert!(question.options.iter().any(|o| !pool_translations.contains(o.as_str())));
            }
        }
    }

    #[test]
    fn duplicate_translations_are_topped_up_from_full_collection() {
        let all = vec![
            word("a", "같음"),
            word("b", "같음"),
            word("c", "같음"),
            word("d", "다름"),
            word("e", "하나"),
            word("f", "둘"),
        ];
        let pool: Vec<&Vocabulary> = all.iter().take(4).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let options = build_options(&all[3], &pool, &all, &mut rng);
        assert_eq!(options.len(), OPTION_COUNT);
        let unique: HashSet<_> = options.iter().collect();
        assert_eq!(unique.len(), OPTION_COUNT);
    }

    #[test]
    fn degenerate_vocabulary_gives_fewer_options() {
        let all = vec![word("a", "하나"), word("b", "둘"), word("c", "하나")];
        let pool: Vec<&Vocabulary> = all.iter().collect();
        let mut rng = StdRng::seed_from_u64(3);
        let options = build_options(&all[0], &pool, &all, &mut rng);
        let mut sorted = options.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["둘", "하나"]);
    }

    #[test]
    fn empty_pool_does_not_start() {
        let all = words(5);
        let mut rng = StdRng::seed_from_u64(0);
        let mut quiz = Quiz::default();
        assert!(!quiz.start(&[], &all, &mut rng));
        assert_eq!(quiz.phase(), QuizPhase::NotStarted);
    }

    #[test]
    fn zero_length_does_not_start() {
        let all = words(5);
        let pool: Vec<&Vocabulary> = all.iter().collect();
        let mut rng = StdRng::seed_from_u64(0);
        let config: QuizConfig = serde_json::from_str(r#"{"length":0}"#).unwrap();
        let mut quiz = Quiz::new(&config);

        assert!(!quiz.start(&pool, &all, &mut rng));
        assert_eq!(quiz.phase(), QuizPhase::NotStarted);
        assert!(quiz.is_empty());
        assert!(quiz.answer("x").is_none());
    }

    #[test]
    fn first_answer_is_final() {
        let all = words(6);
        let pool: Vec<&Vocabulary> = all.iter().collect();
        let mut rng = StdRng::seed_from_u64(11);
        let mut quiz = Quiz::default();
        quiz.start(&pool, &all, &mut rng);

        let answer = quiz.current_question().unwrap().answer.clone();
        let outcome = quiz.answer("틀린 답").unwrap();
        assert!(!outcome.is_correct);
        assert_eq!(outcome.answer, answer);

        // 2回目は無視される
        assert!(quiz.answer(&answer).is_none());
        assert_eq!(quiz.score(), Score { correct: 0, total: 1 });
        assert_eq!(quiz.selected(), Some("틀린 답"));
    }

    #[test]
    fn runs_to_completion_with_score_invariants() {
        let all = words(8);
        let pool: Vec<&Vocabulary> = all.iter().collect();
        let mut rng = StdRng::seed_from_u64(21);
        let mut quiz = Quiz::default();
        quiz.start(&pool, &all, &mut rng);
        let length = quiz.len();
        assert_eq!(length, 8);

        let mut step = 0;
        while let QuizPhase::InProgress { index } = quiz.phase() {
            assert_eq!(index, step);
            let question = quiz.current_question().unwrap().clone();
            let choice = if step % 2 == 0 { question.answer.clone() } else { "x".to_string() };
            let outcome = quiz.answer(&choice).unwrap();
            assert_eq!(outcome.is_last, step + 1 == length);

            let score = quiz.score();
            assert!(score.correct <= score.total && score.total <= length);
            quiz.advance();
            step += 1;
        }

        assert_eq!(quiz.phase(), QuizPhase::Completed);
        assert_eq!(quiz.score(), Score { correct: 4, total: 8 });
        assert_eq!(quiz.progress_percent(), 100);
        assert!(quiz.answer("anything").is_none());
    }

    #[test]
    fn advance_waits_for_feedback_delay() {
        let all = words(5);
        let pool: Vec<&Vocabulary> = all.iter().collect();
        let mut rng = StdRng::seed_from_u64(4);
        let mut quiz = Quiz::new(&QuizConfig {
            length: 10,
            feedback_delay_ms: 1500,
        });
        quiz.start(&pool, &all, &mut rng);

        let t0 = Instant::now();
        // 未回答なら進まない
        assert!(!quiz.advance_if_due(t0 + Duration::from_secs(10)));

        quiz.answer_at("x", t0);
        assert!(!quiz.advance_if_due(t0 + Duration::from_millis(500)));
        assert_eq!(quiz.phase(), QuizPhase::InProgress { index: 0 });
        assert!(quiz.advance_if_due(t0 + Duration::from_millis(1500)));
        assert_eq!(quiz.phase(), QuizPhase::InProgress { index: 1 });
        assert_eq!(quiz.progress_percent(), 20);
    }

    #[test]
    fn end_discards_everything() {
        let all = words(5);
        let pool: Vec<&Vocabulary> = all.iter().collect();
        let mut rng = StdRng::seed_from_u64(8);
        let mut quiz = Quiz::default();
        quiz.start(&pool, &all, &mut rng);
        quiz.answer("x");
        quiz.end();

        assert_eq!(quiz.phase(), QuizPhase::NotStarted);
        assert!(quiz.is_empty());
        assert_eq!(quiz.score(), Score::default());
        assert!(quiz.answer("x").is_none());
    }

    #[test]
    fn restart_resets_score() {
        let all = words(5);
        let pool: Vec<&Vocabulary> = all.iter().collect();
        let mut rng = StdRng::seed_from_u64(8);
        let mut quiz = Quiz::default();
        quiz.start(&pool, &all, &mut rng);
        quiz.answer("x");
        assert!(quiz.restart(&pool, &all, &mut rng));
        assert_eq!(quiz.score(), Score::default());
        assert_eq!(quiz.phase(), QuizPhase::InProgress { index: 0 });
    }

    #[test]
    fn grades() {
        assert_eq!(Score { correct: 5, total: 5 }.grade(), Grade::Perfect);
        assert_eq!(Score { correct: 7, total: 10 }.grade(), Grade::Good);
        assert_eq!(Score { correct: 6, total: 10 }.grade(), Grade::KeepPracticing);
        assert_eq!(Score { correct: 2, total: 3 }.percent(), 67);
    }
}
