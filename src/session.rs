// ============================================
// src/session.rs
// 1単語分のタイピング状態（キー入力ごとの判定）
// ============================================

use crate::patterns::{PatternSet, generate_patterns};
use crate::roman_mapping::naive_romaji;

/// ホストから渡されるキー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
}

impl Key {
    /// 文字キー。Shift や Caps Lock の大文字は小文字として扱う
    pub fn from_char(c: char) -> Self {
        Key::Char(c.to_ascii_lowercase())
    }

    /// ホストのキー値（1文字 or "Backspace"）から変換する
    pub fn from_host(value: &str) -> Option<Self> {
        if value == "Backspace" {
            return Some(Key::Backspace);
        }
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Key::from_char(c)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// まだ何も打っていない
    Empty,
    InProgress,
    /// 打ち終わり（以降の入力は受け付けない）
    Completed,
}

/// 1回のキー入力の結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyOutcome {
    pub accepted: bool,
    pub completed: bool,
    /// 表示用の進捗 (0.0 ..= 1.0)
    pub progress: f64,
}

/// タイピング対象1つ分の状態
///
/// `typed` は常に `candidates` のすべてのパターンの接頭辞になっている。
#[derive(Debug, Clone)]
pub struct TypingSession {
    word: String,
    /// 単語の全パターン（生成順）
    patterns: Vec<String>,
    /// `typed` と前方一致するパターンの添字
    candidates: Vec<usize>,
    /// 表示に使う代表パターンの添字
    primary: usize,
    typed: String,
    state: SessionState,
}

impl TypingSession {
    /// 既定の設定でパターンを生成してセッションを作る
    pub fn new(word: &str) -> Self {
        Self::with_patterns(word, generate_patterns(word))
    }

    /// 生成済みのパターン集合からセッションを作る
    ///
    /// 集合が空なら素朴な変換1つとの完全一致判定に切り替える。
    pub fn with_patterns(word: &str, patterns: PatternSet) -> Self {
        let mut patterns = patterns.into_vec();
        if patterns.is_empty() {
            log::warn!("no patterns for {word:?}, falling back to literal matching");
            patterns.push(naive_romaji(word));
        }
        let candidates = (0..patterns.len()).collect();
        Self {
            word: word.to_string(),
            patterns,
            candidates,
            primary: 0,
            typed: String::new(),
            state: SessionState::Empty,
        }
    }

    /// ホストのキー値をそのまま受け取る
    pub fn submit_key(&mut self, value: &str) -> KeyOutcome {
        match Key::from_host(value) {
            Some(key) => self.submit(key),
            None => self.outcome(false),
        }
    }

    pub fn submit(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Char(c) => self.type_char(c),
            Key::Backspace => self.backspace(),
        }
    }

    pub fn type_char(&mut self, c: char) -> KeyOutcome {
        if self.state == SessionState::Completed {
            return self.outcome(false);
        }

        let mut next = self.typed.clone();
        next.push(c);
        let narrowed: Vec<usize> = self
            .candidates
            .iter()
            .copied()
            .filter(|&i| self.patterns[i].starts_with(&next))
            .collect();

        // どのパターンにも合わない: 状態はそのまま
        if narrowed.is_empty() {
            log::debug!("rejected {c:?} after {:?} for {:?}", self.typed, self.word);
            return self.outcome(false);
        }

        self.typed = next;
        self.candidates = narrowed;

        if let Some(exact) = self
            .candidates
            .iter()
            .copied()
            .find(|&i| self.patterns[i] == self.typed)
        {
            self.primary = exact;
            self.state = SessionState::Completed;
        } else {
            self.promote_primary();
            self.state = SessionState::InProgress;
        }
        self.outcome(true)
    }

    /// 1文字戻す。候補は全パターンから選び直す
    pub fn backspace(&mut self) -> KeyOutcome {
        if self.state == SessionState::Completed || self.typed.pop().is_none() {
            return self.outcome(false);
        }

        self.candidates = self.matching(&self.typed);
        self.promote_primary();
        self.state = if self.typed.is_empty() {
            SessionState::Empty
        } else {
            SessionState::InProgress
        };
        self.outcome(true)
    }

    /// 入力を捨てて最初からにする
    pub fn reset(&mut self) {
        self.typed.clear();
        self.candidates = (0..self.patterns.len()).collect();
        self.state = SessionState::Empty;
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    /// 代表パターン（完了時は実際に打ち切ったパターン）
    pub fn primary_pattern(&self) -> &str {
        &self.patterns[self.primary]
    }

    /// 代表パターンのうち、まだ打っていない部分
    pub fn remaining(&self) -> &str {
        &self.primary_pattern()[self.typed.len()..]
    }

    /// 現在の候補（生成順）
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(|&i| self.patterns[i].as_str())
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// 代表以外の候補を最大 `limit` 件
    pub fn alternatives(&self, limit: usize) -> Vec<&str> {
        self.candidates
            .iter()
            .filter(|&&i| i != self.primary)
            .take(limit)
            .map(|&i| self.patterns[i].as_str())
            .collect()
    }

    /// 単語の全パターン
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn progress(&self) -> f64 {
        if self.state == SessionState::Completed {
            return 1.0;
        }
        let total = self.primary_pattern().len();
        if total == 0 {
            0.0
        } else {
            self.typed.len() as f64 / total as f64
        }
    }

    fn matching(&self, prefix: &str) -> Vec<usize> {
        (0..self.patterns.len())
            .filter(|&i| self.patterns[i].starts_with(prefix))
            .collect()
    }

    /// 代表パターンがまだ候補に残っていればそのまま、外れたら先頭の候補に切り替える
    fn promote_primary(&mut self) {
        if !self.candidates.contains(&self.primary) {
            if let Some(&first) = self.candidates.first() {
                self.primary = first;
            }
        }
    }

    fn outcome(&self, accepted: bool) -> KeyOutcome {
        KeyOutcome {
            accepted,
            completed: self.is_completed(),
            progress: self.progress(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(word: &str, patterns: &[&str]) -> TypingSession {
        TypingSession::with_patterns(word, patterns.iter().map(|p| p.to_string()).collect())
    }

    #[test]
    fn key_from_host_values() {
        assert_eq!(Key::from_host("a"), Some(Key::Char('a')));
        assert_eq!(Key::from_host("Backspace"), Some(Key::Backspace));
        assert_eq!(Key::from_host("N"), Some(Key::Char('n')));
        assert_eq!(Key::from_host("ね"), Some(Key::Char('ね')));
        assert_eq!(Key::from_host("Shift"), None);
        assert_eq!(Key::from_host(""), None);
    }

    #[test]
    fn primary_switches_when_it_stops_matching() {
        let mut s = session("し", &["shi", "si", "ci"]);
        assert_eq!(s.primary_pattern(), "shi");
        s.type_char('s');
        assert_eq!(s.primary_pattern(), "shi");
        s.type_char('i');
        assert_eq!(s.primary_pattern(), "si");
        assert!(s.is_completed());
    }

    #[test]
    fn primary_sticks_after_backspace() {
        let mut s = session("し", &["shi", "si", "ci"]);
        s.type_char('c');
        assert_eq!(s.primary_pattern(), "ci");
        s.backspace();
        assert_eq!(s.state(), SessionState::Empty);
        assert_eq!(s.primary_pattern(), "ci");
        assert_eq!(s.candidate_count(), 3);
    }

    #[test]
    fn completion_promotes_exact_pattern() {
        let mut s = session("とう", &["tou", "to"]);
        s.type_char('t');
        let outcome = s.type_char('o');
        assert!(outcome.completed);
        assert_eq!(s.primary_pattern(), "to");
        assert_eq!(outcome.progress, 1.0);
    }

    #[test]
    fn completed_session_rejects_more_input() {
        let mut s = session("あ", &["a"]);
        assert!(s.type_char('a').completed);
        let outcome = s.type_char('a');
        assert!(!outcome.accepted);
        assert!(outcome.completed);
        assert!(!s.backspace().accepted);
        assert_eq!(s.typed(), "a");
    }

    #[test]
    fn empty_pattern_set_falls_back_to_literal() {
        let mut s = TypingSession::with_patterns("ねこ", PatternSet::new());
        assert_eq!(s.patterns(), ["neko"]);
        for c in "neko".chars() {
            assert!(s.type_char(c).accepted);
        }
        assert!(s.is_completed());
    }

    #[test]
    fn progress_tracks_primary_length() {
        let mut s = session("ねこ", &["neko"]);
        s.type_char('n');
        assert_eq!(s.progress(), 0.25);
        assert_eq!(s.remaining(), "eko");
    }

    #[test]
    fn alternatives_skip_primary() {
        let s = session("ちゃ", &["cha", "tya", "cya", "chixya"]);
        assert_eq!(s.alternatives(2), ["tya", "cya"]);
    }

    #[test]
    fn reset_restores_everything() {
        let mut s = session("つ", &["tsu", "tu"]);
        s.type_char('t');
        s.type_char('s');
        s.reset();
        assert_eq!(s.typed(), "");
        assert_eq!(s.state(), SessionState::Empty);
        assert_eq!(s.candidate_count(), 2);
    }

    #[test]
    fn submit_key_ignores_unknown_host_keys() {
        let mut s = session("あ", &["a"]);
        let outcome = s.submit_key("Shift");
        assert!(!outcome.accepted);
        assert_eq!(s.state(), SessionState::Empty);
        assert!(s.submit_key("a").completed);
    }
}
