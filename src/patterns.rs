// ============================================
// src/patterns.rs
// ひらがな単語 → 入力可能なローマ字パターン集合
// ============================================

use std::collections::HashSet;

use crate::chunker::{Chunk, ChunkKind, is_hatsuon, split_into_chunks};
use crate::config::GeneratorConfig;
use crate::rewrite::{RULES, RewriteRule};
use crate::roman_mapping::{digraph_romaji, is_long_vowel_pair, kana_romaji, naive_romaji};

/// 重複なし・順序つきのパターン集合。先頭が代表パターン
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<String>,
    seen: HashSet<String>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加できたら true（既にあれば false）
    pub fn insert(&mut self, pattern: String) -> bool {
        if self.seen.contains(&pattern) {
            return false;
        }
        self.seen.insert(pattern.clone());
        self.patterns.push(pattern);
        true
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.seen.contains(pattern)
    }

    pub fn primary(&self) -> Option<&str> {
        self.patterns.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.patterns
    }

    pub fn into_vec(self) -> Vec<String> {
        self.patterns
    }

    fn truncate(&mut self, len: usize) {
        for dropped in self.patterns.drain(len.min(self.patterns.len())..) {
            self.seen.remove(&dropped);
        }
    }
}

impl FromIterator<String> for PatternSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = Self::new();
        for pattern in iter {
            set.insert(pattern);
        }
        set
    }
}

/// パターン生成器
#[derive(Debug, Clone, Default)]
pub struct PatternGenerator {
    config: GeneratorConfig,
}

impl PatternGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// 単語の全入力パターンを生成する
    ///
    /// 1. チャンクに分解
    /// 2. チャンクごとの候補を組み合わせ（上限つき）
    /// 3. 組み合わせ1つごとに、書き換え規則の派生パターンをすぐ後ろに追加
    ///    （上限に達したらそこで打ち切る）
    /// 4. 素朴な1文字ずつの変換を必ず含める
    ///
    /// かなを含まない単語（英単語など）には書き換え規則を適用しない。
    pub fn generate(&self, word: &str) -> PatternSet {
        let cap = self.config.max_patterns;
        let chunks = split_into_chunks(word);
        let per_chunk: Vec<Vec<String>> = chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| self.chunk_patterns(chunk, chunks.get(i + 1)))
            .collect();

        let has_kana = word.chars().any(|c| kana_romaji(c).is_some());
        let rules: Vec<&RewriteRule> = RULES
            .iter()
            .filter(|rule| has_kana && rule.applies_to(word, &self.config))
            .collect();

        let mut set = PatternSet::new();
        for base in combine(&per_chunk, cap) {
            if set.len() >= cap {
                break;
            }
            let variants: Vec<String> = rules.iter().filter_map(|rule| rule.apply(&base)).collect();
            set.insert(base);
            for variant in variants {
                set.insert(variant);
            }
        }

        set.truncate(cap);
        set.insert(naive_romaji(word));

        log::debug!(
            "generated {} patterns for {word:?} (primary {:?})",
            set.len(),
            set.primary()
        );
        set
    }

    /// 1チャンク分の候補（先頭が代表）
    pub fn chunk_patterns(&self, chunk: &Chunk, next: Option<&Chunk>) -> Vec<String> {
        let chars = chunk.chars();
        let mut patterns = Vec::new();

        match chunk.kind {
            ChunkKind::Single if is_hatsuon(chunk) => {
                patterns.extend(self.hatsuon_patterns(next));
            }
            ChunkKind::Single => {
                patterns.extend(single_patterns(chars[0]));
            }
            ChunkKind::Digraph => {
                patterns.extend(self.digraph_patterns(&chars));
            }
            ChunkKind::LongDigraph => {
                let digraphs = self.digraph_patterns(&chars[..2]);
                patterns.extend(digraphs.iter().map(|d| format!("{d}u")));
                if self.config.long_vowel_contraction {
                    patterns.extend(digraphs);
                }
            }
            ChunkKind::Sokuon => {
                patterns.extend(self.sokuon_patterns(&single_patterns(chars[1])));
            }
            ChunkKind::SokuonDigraph => {
                patterns.extend(self.sokuon_patterns(&self.digraph_patterns(&chars[1..])));
            }
            ChunkKind::LongVowel => {
                let bases = single_patterns(chars[0]);
                patterns.extend(bases.iter().map(|b| format!("{b}u")));
                if self.config.long_vowel_contraction {
                    patterns.extend(
                        bases
                            .into_iter()
                            .filter(|b| b.ends_with('u') || b.ends_with('o')),
                    );
                }
            }
            ChunkKind::VowelPair => {
                let firsts = single_patterns(chars[0]);
                let seconds = single_patterns(chars[1]);
                for f in &firsts {
                    for s in &seconds {
                        patterns.push(format!("{f}{s}"));
                    }
                }
                if self.config.long_vowel_contraction && is_long_vowel_pair(chars[0], chars[1]) {
                    patterns.extend(firsts);
                }
            }
        }

        dedup(patterns)
    }

    /// 「ん」: 次が母音・y・n で始まりうるなら nn / xn のみ
    fn hatsuon_patterns(&self, next: Option<&Chunk>) -> Vec<String> {
        let ambiguous = next.is_some_and(|chunk| {
            self.chunk_patterns(chunk, None).iter().any(|p| {
                p.starts_with(|c: char| matches!(c, 'a' | 'i' | 'u' | 'e' | 'o' | 'y' | 'n'))
            })
        });
        if ambiguous {
            vec!["nn".to_string(), "xn".to_string()]
        } else {
            vec!["n".to_string(), "nn".to_string(), "xn".to_string()]
        }
    }

    fn digraph_patterns(&self, pair: &[char]) -> Vec<String> {
        let text: String = pair.iter().collect();
        match digraph_romaji(&text) {
            Some(list) if self.config.yoon_variations => {
                list.iter().map(|s| s.to_string()).collect()
            }
            Some(list) => vec![list[0].to_string()],
            // 表にない組み合わせは1文字ずつの組み合わせで打たせる
            None => {
                let mut result = vec![String::new()];
                for &c in pair {
                    let options = single_patterns(c);
                    result = result
                        .iter()
                        .flat_map(|prefix| options.iter().map(move |o| format!("{prefix}{o}")))
                        .collect();
                }
                result
            }
        }
    }

    /// 促音 + 後続の候補から、子音を重ねた表記・省略表記・xtu/ltu 表記を作る
    fn sokuon_patterns(&self, following: &[String]) -> Vec<String> {
        let mut patterns = Vec::new();
        for f in following {
            if let Some(head) = geminate_head(f) {
                patterns.push(format!("{head}{f}"));
            }
            if f.starts_with("ch") {
                patterns.push(format!("t{f}"));
            }
        }
        if self.config.sokuon_omission {
            patterns.extend(following.iter().cloned());
        }
        if let Some(first) = following.first() {
            patterns.push(format!("xtu{first}"));
            patterns.push(format!("ltu{first}"));
        }
        patterns
    }
}

/// 既定の設定でパターンを生成する
pub fn generate_patterns(word: &str) -> PatternSet {
    PatternGenerator::default().generate(word)
}

fn single_patterns(c: char) -> Vec<String> {
    match kana_romaji(c) {
        Some(list) => list.iter().map(|s| s.to_string()).collect(),
        None => vec![c.to_string()],
    }
}

/// 促音で重ねられる先頭子音（n と母音は重ねない）
fn geminate_head(romaji: &str) -> Option<char> {
    romaji
        .chars()
        .next()
        .filter(|c| c.is_ascii_lowercase() && !matches!(c, 'a' | 'i' | 'u' | 'e' | 'o' | 'n'))
}

fn dedup(patterns: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    patterns
        .into_iter()
        .filter(|p| seen.insert(p.clone()))
        .collect()
}

/// チャンクごとの候補を連結する。`cap` 件で打ち切る
///
/// 代表表記から外れるチャンクの数が少ない順に列挙するので、打ち切られても
/// 各チャンクの別表記はそれぞれ単独では必ず残る（上限が足りる限り）。
/// 同じ外れ数の中では前のチャンクの別表記を優先する。
fn combine(per_chunk: &[Vec<String>], cap: usize) -> Vec<String> {
    // suffix[i] = i 以降で別表記を持つチャンクの数
    let mut suffix = vec![0usize; per_chunk.len() + 1];
    for i in (0..per_chunk.len()).rev() {
        suffix[i] = suffix[i + 1] + usize::from(per_chunk[i].len() > 1);
    }

    let mut out = Vec::new();
    let mut prefix = String::new();
    for deviations in 0..=suffix[0] {
        if out.len() >= cap {
            break;
        }
        walk(per_chunk, &suffix, 0, deviations, &mut prefix, &mut out, cap);
    }
    out
}

fn walk(
    per_chunk: &[Vec<String>],
    suffix: &[usize],
    idx: usize,
    budget: usize,
    prefix: &mut String,
    out: &mut Vec<String>,
    cap: usize,
) {
    if out.len() >= cap {
        return;
    }
    if idx == per_chunk.len() {
        out.push(prefix.clone());
        return;
    }

    let alternatives = &per_chunk[idx];
    let base_len = prefix.len();

    if budget > 0 {
        for alt in alternatives.iter().skip(1) {
            prefix.push_str(alt);
            walk(per_chunk, suffix, idx + 1, budget - 1, prefix, out, cap);
            prefix.truncate(base_len);
        }
    }
    if suffix[idx + 1] >= budget {
        if let Some(first) = alternatives.first() {
            prefix.push_str(first);
            walk(per_chunk, suffix, idx + 1, budget, prefix, out, cap);
            prefix.truncate(base_len);
        }
    }
}
