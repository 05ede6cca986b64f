// ============================================
// src/roman_mapping.rs
// ひらがな → ローマ字の対応表
// ============================================

/// 促音「っ」
pub const SOKUON: char = 'っ';
/// 撥音「ん」
pub const HATSUON: char = 'ん';

/// 1文字のかなに対するローマ字候補を返す（先頭が代表表記）
///
/// 表にない文字は `None`。呼び出し側でそのまま素通しする。
pub fn kana_romaji(c: char) -> Option<&'static [&'static str]> {
    let patterns: &'static [&'static str] = match c {
        'あ' => &["a"],
        'い' => &["i"],
        'う' => &["u"],
        'え' => &["e"],
        'お' => &["o"],
        'か' => &["ka"],
        'き' => &["ki"],
        'く' => &["ku"],
        'け' => &["ke"],
        'こ' => &["ko"],
        'さ' => &["sa"],
        'し' => &["shi", "si", "ci"],
        'す' => &["su"],
        'せ' => &["se"],
        'そ' => &["so"],
        'た' => &["ta"],
        'ち' => &["chi", "ti"],
        'つ' => &["tsu", "tu"],
        'て' => &["te"],
        'と' => &["to"],
        'な' => &["na"],
        'に' => &["ni"],
        'ぬ' => &["nu"],
        'ね' => &["ne"],
        'の' => &["no"],
        'は' => &["ha"],
        'ひ' => &["hi"],
        'ふ' => &["fu", "hu"],
        'へ' => &["he"],
        'ほ' => &["ho"],
        'ま' => &["ma"],
        'み' => &["mi"],
        'む' => &["mu"],
        'め' => &["me"],
        'も' => &["mo"],
        'や' => &["ya"],
        'ゆ' => &["yu"],
        'よ' => &["yo"],
        'ら' => &["ra"],
        'り' => &["ri"],
        'る' => &["ru"],
        'れ' => &["re"],
        'ろ' => &["ro"],
        'わ' => &["wa"],
        'ゐ' => &["wi"],
        'ゑ' => &["we"],
        'を' => &["wo", "o"],
        'ん' => &["n", "nn", "xn"],
        'が' => &["ga"],
        'ぎ' => &["gi"],
        'ぐ' => &["gu"],
        'げ' => &["ge"],
        'ご' => &["go"],
        'ざ' => &["za"],
        'じ' => &["ji", "zi"],
        'ず' => &["zu"],
        'ぜ' => &["ze"],
        'ぞ' => &["zo"],
        'だ' => &["da"],
        'ぢ' => &["ji", "di"],
        'づ' => &["zu", "du"],
        'で' => &["de"],
        'ど' => &["do"],
        'ば' => &["ba"],
        'び' => &["bi"],
        'ぶ' => &["bu"],
        'べ' => &["be"],
        'ぼ' => &["bo"],
        'ぱ' => &["pa"],
        'ぴ' => &["pi"],
        'ぷ' => &["pu"],
        'ぺ' => &["pe"],
        'ぽ' => &["po"],
        'ゔ' => &["vu"],
        // 小書き文字（単独で打つ場合）
        'ぁ' => &["xa", "la"],
        'ぃ' => &["xi", "li"],
        'ぅ' => &["xu", "lu"],
        'ぇ' => &["xe", "le"],
        'ぉ' => &["xo", "lo"],
        'ゃ' => &["xya", "lya"],
        'ゅ' => &["xyu", "lyu"],
        'ょ' => &["xyo", "lyo"],
        'ゎ' => &["xwa", "lwa"],
        'っ' => &["xtu", "ltu", "xtsu", "ltsu"],
        'ー' => &["-"],
        _ => return None,
    };
    Some(patterns)
}

/// 拗音など2文字の組み合わせに対するローマ字候補
pub fn digraph_romaji(pair: &str) -> Option<&'static [&'static str]> {
    let patterns: &'static [&'static str] = match pair {
        "きゃ" => &["kya"],
        "きゅ" => &["kyu"],
        "きょ" => &["kyo"],
        "きぇ" => &["kye"],
        "しゃ" => &["sha", "sya"],
        "しゅ" => &["shu", "syu"],
        "しょ" => &["sho", "syo"],
        "しぇ" => &["she", "sye"],
        "ちゃ" => &["cha", "tya", "cya"],
        "ちゅ" => &["chu", "tyu", "cyu"],
        "ちょ" => &["cho", "tyo", "cyo"],
        "ちぇ" => &["che", "tye", "cye"],
        "にゃ" => &["nya"],
        "にゅ" => &["nyu"],
        "にょ" => &["nyo"],
        "ひゃ" => &["hya"],
        "ひゅ" => &["hyu"],
        "ひょ" => &["hyo"],
        "みゃ" => &["mya"],
        "みゅ" => &["myu"],
        "みょ" => &["myo"],
        "りゃ" => &["rya"],
        "りゅ" => &["ryu"],
        "りょ" => &["ryo"],
        "ぎゃ" => &["gya"],
        "ぎゅ" => &["gyu"],
        "ぎょ" => &["gyo"],
        "じゃ" => &["ja", "zya", "jya"],
        "じゅ" => &["ju", "zyu", "jyu"],
        "じょ" => &["jo", "zyo", "jyo"],
        "じぇ" => &["je", "zye", "jye"],
        "ぢゃ" => &["dya"],
        "ぢゅ" => &["dyu"],
        "ぢょ" => &["dyo"],
        "びゃ" => &["bya"],
        "びゅ" => &["byu"],
        "びょ" => &["byo"],
        "ぴゃ" => &["pya"],
        "ぴゅ" => &["pyu"],
        "ぴょ" => &["pyo"],
        "てぃ" => &["thi"],
        "てゅ" => &["thu"],
        "でぃ" => &["dhi"],
        "でゅ" => &["dhu"],
        "ふぁ" => &["fa"],
        "ふぃ" => &["fi"],
        "ふぇ" => &["fe"],
        "ふぉ" => &["fo"],
        "ふゅ" => &["fyu"],
        "うぃ" => &["wi"],
        "うぇ" => &["we"],
        "うぉ" => &["who"],
        "いぇ" => &["ye"],
        "ゔぁ" => &["va"],
        "ゔぃ" => &["vi"],
        "ゔぇ" => &["ve"],
        "ゔぉ" => &["vo"],
        "つぁ" => &["tsa"],
        "つぃ" => &["tsi"],
        "つぇ" => &["tse"],
        "つぉ" => &["tso"],
        _ => return None,
    };
    Some(patterns)
}

/// 拗音を作る小書き文字か
pub fn is_small_kana(c: char) -> bool {
    matches!(c, 'ゃ' | 'ゅ' | 'ょ' | 'ぁ' | 'ぃ' | 'ぅ' | 'ぇ' | 'ぉ' | 'ゎ')
}

pub fn is_vowel_kana(c: char) -> bool {
    matches!(c, 'あ' | 'い' | 'う' | 'え' | 'お')
}

/// 拗音・促音の土台になれる通常のかな（ん・っ・小書き・長音符を除く）
pub fn is_base_kana(c: char) -> bool {
    kana_romaji(c).is_some() && !is_small_kana(c) && !matches!(c, SOKUON | HATSUON | 'ー')
}

/// 同じ母音が伸びる組み合わせか（ああ・いい・おう・えい など）
pub fn is_long_vowel_pair(first: char, second: char) -> bool {
    first == second || matches!((first, second), ('お', 'う') | ('え', 'い'))
}

/// 1文字ずつ代表表記をつなげた素朴な変換（表にない文字はそのまま）
pub fn naive_romaji(word: &str) -> String {
    let mut result = String::new();
    for c in word.chars() {
        match kana_romaji(c) {
            Some(patterns) => result.push_str(patterns[0]),
            None => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_kana_list_every_spelling() {
        assert_eq!(kana_romaji('し'), Some(&["shi", "si", "ci"][..]));
        assert_eq!(kana_romaji('つ'), Some(&["tsu", "tu"][..]));
        assert_eq!(kana_romaji('ふ'), Some(&["fu", "hu"][..]));
        assert_eq!(kana_romaji('じ'), Some(&["ji", "zi"][..]));
    }

    #[test]
    fn unknown_characters_have_no_entry() {
        assert_eq!(kana_romaji('猫'), None);
        assert_eq!(kana_romaji('a'), None);
        assert_eq!(digraph_romaji("かゃ"), None);
    }

    #[test]
    fn base_kana_excludes_markers() {
        assert!(is_base_kana('き'));
        assert!(!is_base_kana('っ'));
        assert!(!is_base_kana('ん'));
        assert!(!is_base_kana('ゃ'));
        assert!(!is_base_kana('x'));
    }

    #[test]
    fn naive_romaji_passes_unknown_through() {
        assert_eq!(naive_romaji("ねこ"), "neko");
        assert_eq!(naive_romaji("ちゃ"), "chixya");
        assert_eq!(naive_romaji("猫ねこ"), "猫neko");
    }

    #[test]
    fn long_vowel_pairs() {
        assert!(is_long_vowel_pair('お', 'う'));
        assert!(is_long_vowel_pair('え', 'い'));
        assert!(is_long_vowel_pair('あ', 'あ'));
        assert!(!is_long_vowel_pair('あ', 'い'));
    }
}
