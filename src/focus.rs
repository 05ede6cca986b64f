// ============================================
// src/focus.rs
// 画面上の複数のお題と、どれに入力しているか（フォーカス）の管理
// ============================================

use crate::patterns::PatternGenerator;
use crate::session::{Key, KeyOutcome, TypingSession};

pub type TargetId = u64;

/// 画面上のお題1つ
#[derive(Debug, Clone)]
pub struct Target {
    id: TargetId,
    word: String,
    /// フォーカス中のお題だけがセッションを持つ
    session: Option<TypingSession>,
}

impl Target {
    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn session(&self) -> Option<&TypingSession> {
        self.session.as_ref()
    }
}

/// キー入力の処理結果
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    /// 何もしなかった（フォーカスなしの Backspace など）
    Ignored,
    /// フォーカスがなく、どのお題もそのキーで始まらない
    Unclaimed(char),
    /// フォーカス中のお題への入力（受理・拒否どちらも）
    Key {
        target: TargetId,
        outcome: KeyOutcome,
    },
    /// お題を打ち終えた（ボードからは取り除かれている）
    Completed {
        target: TargetId,
        word: String,
        pattern: String,
    },
}

/// お題の集合とフォーカス
#[derive(Debug, Clone, Default)]
pub struct TargetBoard {
    generator: PatternGenerator,
    targets: Vec<Target>,
    focused: Option<TargetId>,
    next_id: TargetId,
}

impl TargetBoard {
    pub fn new(generator: PatternGenerator) -> Self {
        Self {
            generator,
            ..Self::default()
        }
    }

    pub fn add(&mut self, word: &str) -> TargetId {
        let id = self.next_id;
        self.next_id += 1;
        self.targets.push(Target {
            id,
            word: word.to_string(),
            session: None,
        });
        log::debug!("target {id} added: {word:?}");
        id
    }

    /// お題を取り除く。フォーカス中ならフォーカスも外れる
    pub fn remove(&mut self, id: TargetId) -> Option<Target> {
        let pos = self.position(id)?;
        if self.focused == Some(id) {
            self.focused = None;
        }
        Some(self.targets.remove(pos))
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn focused(&self) -> Option<&Target> {
        self.focused.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    /// 指定したお題にフォーカスする（新しいセッションで始める）
    pub fn focus(&mut self, id: TargetId) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        let session = self.fresh_session(&self.targets[pos].word);
        self.set_focus(pos, session);
        true
    }

    /// 次のお題へフォーカスを移す（末尾の次は先頭）
    pub fn cycle_focus(&mut self) -> Option<TargetId> {
        if self.targets.is_empty() {
            return None;
        }
        let pos = match self.focused.and_then(|id| self.position(id)) {
            Some(current) => (current + 1) % self.targets.len(),
            None => 0,
        };
        let id = self.targets[pos].id;
        self.focus(id);
        Some(id)
    }

    /// フォーカスを外す（入力途中の内容は捨てる）
    pub fn clear_focus(&mut self) {
        if let Some(pos) = self.focused.and_then(|id| self.position(id)) {
            self.targets[pos].session = None;
        }
        self.focused = None;
    }

    pub fn handle_key(&mut self, key: Key) -> BoardEvent {
        let Some(id) = self.focused else {
            return match key {
                Key::Char(c) => self.smart_focus(c),
                Key::Backspace => BoardEvent::Ignored,
            };
        };
        let Some(pos) = self.position(id) else {
            self.focused = None;
            return BoardEvent::Ignored;
        };
        let Some(session) = self.targets[pos].session.as_mut() else {
            self.focused = None;
            return BoardEvent::Ignored;
        };

        let outcome = session.submit(key);
        self.after_key(pos, outcome)
    }

    /// フォーカスがないときの最初の1キー: そのキーを受け付ける最初のお題を選ぶ
    fn smart_focus(&mut self, c: char) -> BoardEvent {
        for pos in 0..self.targets.len() {
            let mut session = self.fresh_session(&self.targets[pos].word);
            let outcome = session.type_char(c);
            if outcome.accepted {
                log::info!("smart focus on {:?} by {c:?}", self.targets[pos].word);
                self.set_focus(pos, session);
                return self.after_key(pos, outcome);
            }
        }
        BoardEvent::Unclaimed(c)
    }

    fn after_key(&mut self, pos: usize, outcome: KeyOutcome) -> BoardEvent {
        let id = self.targets[pos].id;
        if !outcome.completed {
            return BoardEvent::Key { target: id, outcome };
        }

        let target = self.targets.remove(pos);
        self.focused = None;
        let pattern = target
            .session
            .as_ref()
            .map(|s| s.primary_pattern().to_string())
            .unwrap_or_default();
        log::info!("completed {:?} as {pattern:?}", target.word);
        BoardEvent::Completed {
            target: id,
            word: target.word,
            pattern,
        }
    }

    fn set_focus(&mut self, pos: usize, session: TypingSession) {
        if let Some(old) = self.focused.and_then(|id| self.position(id)) {
            self.targets[old].session = None;
        }
        self.targets[pos].session = Some(session);
        self.focused = Some(self.targets[pos].id);
    }

    fn fresh_session(&self, word: &str) -> TypingSession {
        TypingSession::with_patterns(word, self.generator.generate(word))
    }

    fn position(&self, id: TargetId) -> Option<usize> {
        self.targets.iter().position(|t| t.id == id)
    }
}
