// ============================================
// tests/patterns.rs
// パターン生成の結合テスト（公開 API のみ）
// ============================================

use std::collections::HashSet;

use romaji_drill::questions::{ENGLISH_LIST, QUESTIONS_LIST};
use romaji_drill::{GeneratorConfig, PatternGenerator, generate_patterns, naive_romaji};

fn assert_contains_all(word: &str, expected: &[&str]) {
    let set = generate_patterns(word);
    for pattern in expected {
        assert!(
            set.contains(pattern),
            "'{}' is missing from the patterns of {}: {:?}",
            pattern,
            word,
            set.as_slice()
        );
    }
}

#[test]
fn every_question_has_patterns_and_the_naive_fallback() {
    for q in QUESTIONS_LIST {
        let set = generate_patterns(q.reading);
        assert!(!set.is_empty(), "no patterns for {}", q.reading);
        assert!(
            set.contains(&naive_romaji(q.reading)),
            "naive spelling missing for {}",
            q.reading
        );
        for pattern in set.iter() {
            assert!(!pattern.is_empty(), "empty pattern for {}", q.reading);
            assert!(
                pattern.chars().all(|c| c.is_ascii_lowercase() || c == '-'),
                "non-romaji pattern {} for {}",
                pattern,
                q.reading
            );
        }
    }
}

#[test]
fn patterns_are_distinct() {
    for q in QUESTIONS_LIST {
        let set = generate_patterns(q.reading);
        let unique: HashSet<&str> = set.iter().collect();
        assert_eq!(unique.len(), set.len(), "duplicates for {}", q.reading);
    }
}

#[test]
fn generation_is_deterministic() {
    for q in QUESTIONS_LIST {
        assert_eq!(generate_patterns(q.reading), generate_patterns(q.reading));
    }
}

#[test]
fn digraph_and_hatsuon_examples() {
    assert_contains_all("ちゃ", &["cha", "tya", "cya"]);
    assert_contains_all("ん", &["n", "nn"]);
    assert_contains_all("しゃしん", &["shashin", "syasinn", "shashinn"]);
    assert_contains_all("こんにちは", &["konnnichiha", "konnichiha", "konnnitiha"]);
}

#[test]
fn sokuon_and_long_vowel_examples() {
    assert_contains_all("きって", &["kitte", "kite", "kixtute", "kiltute"]);
    assert_contains_all("まっちゃ", &["maccha", "matcha", "mattya", "macha"]);
    assert_contains_all("がっこう", &["gakkou", "gakko", "gakou"]);
    assert_contains_all("とうきょう", &["toukyou", "tokyo", "toukyo", "tokyou"]);
}

#[test]
fn long_digraph_fixtures() {
    assert_contains_all(
        "ちゅうがっこう",
        &[
            "cyugakkou",
            "chugakkou",
            "tyugakkou",
            "cyugakko",
            "chugakko",
            "tyugakko",
        ],
    );
    assert_contains_all("ぎゅうにゅう", &["gyunyu", "gyuunyu", "gyunyuu", "gyuunyuu"]);
}

#[test]
fn empty_word_has_the_empty_pattern() {
    let set = generate_patterns("");
    assert_eq!(set.as_slice(), [String::new()]);
}

#[test]
fn cap_bounds_the_set_but_keeps_the_fallback() {
    let generator = PatternGenerator::new(GeneratorConfig {
        max_patterns: 1,
        ..GeneratorConfig::default()
    });
    for q in QUESTIONS_LIST {
        let set = generator.generate(q.reading);
        assert!(set.len() <= 2, "{} produced {} patterns", q.reading, set.len());
        assert!(set.contains(&naive_romaji(q.reading)));
        assert_eq!(set.primary(), generate_patterns(q.reading).primary());
    }
}

#[test]
fn default_cap_is_respected() {
    let cap = GeneratorConfig::default().max_patterns;
    let set = generate_patterns("ちゅうしゃじょう");
    assert!(set.len() <= cap + 1, "{} patterns", set.len());
}

#[test]
fn disabled_rules_remove_variants() {
    let generator = PatternGenerator::new(GeneratorConfig {
        yoon_variations: false,
        ..GeneratorConfig::default()
    });
    let set = generator.generate("ちゃ");
    assert!(set.contains("cha"));
    assert!(!set.contains("tya"));
    assert!(!set.contains("cya"));
}

#[test]
fn long_word_at_the_cap_keeps_contracted_primary() {
    let word = "ちかてつのしゅうてんのちゅうがっこう";
    let cap = GeneratorConfig::default().max_patterns;
    let set = generate_patterns(word);
    assert!(set.len() > cap / 2, "{} is not long enough to hit the cap", word);
    assert!(set.len() <= cap + 1);
    assert_contains_all(
        word,
        &[
            "chikatetsunoshuutennnochuugakkou",
            "chikatetsunoshuutennnochuugakko",
            "chikatetsunoshutennnochugakko",
        ],
    );
}

#[test]
fn english_words_have_only_their_spelling() {
    for q in ENGLISH_LIST {
        let set = generate_patterns(q.reading);
        assert_eq!(set.as_slice(), [q.reading.to_string()], "{}", q.reading);
    }
}
