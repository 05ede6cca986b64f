// ============================================
// src/chunker.rs
// ひらがな単語を「タイピング単位」（チャンク）に分解する
// ============================================

use crate::roman_mapping::{
    HATSUON, SOKUON, is_base_kana, is_small_kana, is_vowel_kana,
};

/// チャンクの種類（どの規則で切り出されたか）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    /// 促音 + 拗音（っちゃ）
    SokuonDigraph,
    /// 拗音 + う（ちゅう、きょう）
    LongDigraph,
    /// 拗音（きゃ）
    Digraph,
    /// 促音 + かな（っか）
    Sokuon,
    /// かな + う（とう、すう）
    LongVowel,
    /// 母音の連続（あい、おう）
    VowelPair,
    /// 単独の文字
    Single,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub kind: ChunkKind,
}

impl Chunk {
    fn new(chars: &[char], kind: ChunkKind) -> Self {
        Self {
            text: chars.iter().collect(),
            kind,
        }
    }

    /// チャンク内の文字列を char 単位で返す
    pub fn chars(&self) -> Vec<char> {
        self.text.chars().collect()
    }
}

/// 先頭から最長一致の規則順でチャンクに分解する
pub fn split_into_chunks(word: &str) -> Vec<Chunk> {
    let chars: Vec<char> = word.chars().collect();
    let mut chunks = Vec::new();
    let mut idx = 0;

    while idx < chars.len() {
        let c = chars[idx];
        let next = chars.get(idx + 1).copied();
        let after = chars.get(idx + 2).copied();

        let (len, kind) = if c == SOKUON
            && next.is_some_and(is_base_kana)
            && after.is_some_and(is_small_kana)
        {
            (3, ChunkKind::SokuonDigraph)
        } else if is_base_kana(c)
            && matches!(next, Some('ゅ' | 'ょ'))
            && after == Some('う')
        {
            (3, ChunkKind::LongDigraph)
        } else if is_base_kana(c) && next.is_some_and(is_small_kana) {
            (2, ChunkKind::Digraph)
        } else if c == SOKUON && next.is_some_and(is_base_kana) {
            (2, ChunkKind::Sokuon)
        } else if next == Some('う') && is_base_kana(c) && !is_vowel_kana(c) {
            (2, ChunkKind::LongVowel)
        } else if is_vowel_kana(c) && next.is_some_and(is_vowel_kana) {
            (2, ChunkKind::VowelPair)
        } else {
            (1, ChunkKind::Single)
        };

        chunks.push(Chunk::new(&chars[idx..idx + len], kind));
        idx += len;
    }

    log::debug!("chunks for {word:?}: {:?}", chunks.iter().map(|c| c.text.as_str()).collect::<Vec<_>>());
    chunks
}

/// 「ん」の直後かどうかの判定用
pub fn is_hatsuon(chunk: &Chunk) -> bool {
    chunk.kind == ChunkKind::Single && chunk.text.starts_with(HATSUON)
}
