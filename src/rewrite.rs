// ============================================
// src/rewrite.rs
// 生成済みパターンに適用する書き換え規則
// ============================================
//
// 規則は上から順に、組み合わせで作ったすべてのパターンに個別に適用する。
// 書き換え結果どうしを再度書き換えることはしない。

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::GeneratorConfig;
use crate::roman_mapping::{HATSUON, SOKUON};

static DOUBLED_CONSONANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("bb|cc|dd|ff|gg|hh|jj|kk|ll|mm|pp|qq|rr|ss|tt|vv|ww|yy|zz").unwrap()
});
static DOUBLED_VOWEL: LazyLock<Regex> = LazyLock::new(|| Regex::new("aa|ii|uu|ee|oo").unwrap());
static SINGLE_N: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(^|[^nx])n([^aiueoyn]|$)").unwrap());
static DOUBLE_N: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(^|[^n])nn([^aiueoyn]|$)").unwrap());
static YOON_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(c?ch|s?sh|j+)([auo])").unwrap());

/// 書き換え規則1つ分
pub struct RewriteRule {
    pub name: &'static str,
    precondition: fn(&str, &GeneratorConfig) -> bool,
    rewrite: fn(&str) -> String,
}

impl RewriteRule {
    /// 単語と設定に対してこの規則が有効か
    pub fn applies_to(&self, word: &str, config: &GeneratorConfig) -> bool {
        (self.precondition)(word, config)
    }

    /// 変化しなければ `None`
    pub fn apply(&self, pattern: &str) -> Option<String> {
        let rewritten = (self.rewrite)(pattern);
        (rewritten != pattern).then_some(rewritten)
    }
}

/// 適用順に並べた規則一覧
pub static RULES: [RewriteRule; 7] = [
    // 促音の省略: 重ねた子音を1つに (kitte → kite)。n は撥音用に残す
    RewriteRule {
        name: "sokuon-simplification",
        precondition: |word, config| config.sokuon_omission && word.contains(SOKUON),
        rewrite: |pattern| {
            DOUBLED_CONSONANT
                .replace_all(pattern, |caps: &Captures| caps[0][..1].to_string())
                .into_owned()
        },
    },
    // 長音 uu → u (kuuki → kuki, chuugaku → chugaku)
    RewriteRule {
        name: "long-vowel-uu",
        precondition: |_, config| config.long_vowel_contraction,
        rewrite: |pattern| pattern.replace("uu", "u"),
    },
    // 長音 ou → o (gakkou → gakko)
    RewriteRule {
        name: "long-vowel-ou",
        precondition: |_, config| config.long_vowel_contraction,
        rewrite: |pattern| pattern.replace("ou", "o"),
    },
    // 長音をすべて縮める (cyuugakkou → cyugakko)
    RewriteRule {
        name: "long-vowel-full",
        precondition: |_, config| config.long_vowel_contraction,
        rewrite: |pattern| {
            DOUBLED_VOWEL
                .replace_all(pattern, |caps: &Captures| caps[0][..1].to_string())
                .replace("ou", "o")
        },
    },
    // 子音・語末の前の n → nn (kanpai → kannpai)
    RewriteRule {
        name: "hatsuon-double",
        precondition: |word, _| word.contains(HATSUON),
        rewrite: |pattern| SINGLE_N.replace_all(pattern, "${1}nn${2}").into_owned(),
    },
    // 子音・語末の前の nn → n (kannpai → kanpai)
    RewriteRule {
        name: "hatsuon-single",
        precondition: |word, _| word.contains(HATSUON),
        rewrite: |pattern| DOUBLE_N.replace_all(pattern, "${1}n${2}").into_owned(),
    },
    // 拗音の別表記: sha → sya, cha → tya, ja → zya
    RewriteRule {
        name: "yoon-respelling",
        precondition: |_, config| config.yoon_variations,
        rewrite: |pattern| {
            YOON_HEAD
                .replace_all(pattern, |caps: &Captures| {
                    let head = match &caps[1] {
                        "ch" => "ty".to_string(),
                        "cch" => "tty".to_string(),
                        "sh" => "sy".to_string(),
                        "ssh" => "ssy".to_string(),
                        js => format!("{}y", "z".repeat(js.len())),
                    };
                    format!("{head}{}", &caps[2])
                })
                .into_owned()
        },
    },
];

/// 名前で規則を引く
pub fn rule(name: &str) -> Option<&'static RewriteRule> {
    RULES.iter().find(|rule| rule.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(name: &str, pattern: &str) -> Option<String> {
        rule(name).unwrap().apply(pattern)
    }

    #[test]
    fn sokuon_simplification() {
        assert_eq!(apply("sokuon-simplification", "kitte").as_deref(), Some("kite"));
        assert_eq!(apply("sokuon-simplification", "maccha").as_deref(), Some("macha"));
        assert_eq!(apply("sokuon-simplification", "konnichiha"), None);
    }

    #[test]
    fn long_vowel_rules_contract_independently() {
        assert_eq!(apply("long-vowel-uu", "cyuugakkou").as_deref(), Some("cyugakkou"));
        assert_eq!(apply("long-vowel-ou", "cyuugakkou").as_deref(), Some("cyuugakko"));
        assert_eq!(apply("long-vowel-full", "cyuugakkou").as_deref(), Some("cyugakko"));
        assert_eq!(apply("long-vowel-full", "okaasan").as_deref(), Some("okasan"));
        assert_eq!(apply("long-vowel-uu", "neko"), None);
    }

    #[test]
    fn hatsuon_rules_leave_vowel_contexts_alone() {
        assert_eq!(apply("hatsuon-double", "kanpai").as_deref(), Some("kannpai"));
        assert_eq!(apply("hatsuon-double", "mikan").as_deref(), Some("mikann"));
        assert_eq!(apply("hatsuon-double", "kinnen"), Some("kinnenn".to_string()));
        // 母音・y の前は変えない
        assert_eq!(apply("hatsuon-double", "kana"), None);
        assert_eq!(apply("hatsuon-double", "xn"), None);

        assert_eq!(apply("hatsuon-single", "kannpai").as_deref(), Some("kanpai"));
        assert_eq!(apply("hatsuon-single", "mikann").as_deref(), Some("mikan"));
        assert_eq!(apply("hatsuon-single", "konnichiha"), None);
    }

    #[test]
    fn yoon_respelling() {
        assert_eq!(apply("yoon-respelling", "cha").as_deref(), Some("tya"));
        assert_eq!(apply("yoon-respelling", "maccha").as_deref(), Some("mattya"));
        assert_eq!(apply("yoon-respelling", "shashin").as_deref(), Some("syashin"));
        assert_eq!(apply("yoon-respelling", "jjo").as_deref(), Some("zzyo"));
        assert_eq!(apply("yoon-respelling", "chi"), None);
    }

    #[test]
    fn preconditions_follow_word_and_config() {
        let config = GeneratorConfig::default();
        assert!(rule("hatsuon-double").unwrap().applies_to("みかん", &config));
        assert!(!rule("hatsuon-double").unwrap().applies_to("ねこ", &config));
        assert!(!rule("sokuon-simplification").unwrap().applies_to("ねこ", &config));

        let strict = GeneratorConfig {
            long_vowel_contraction: false,
            ..GeneratorConfig::default()
        };
        assert!(!rule("long-vowel-ou").unwrap().applies_to("とう", &strict));
    }
}
