/*
 * src/questions.rs
 * お題の単語リスト（難易度・モード別）
 */

use crate::config::Difficulty::{self, Easy, Hard, Normal};
use crate::config::GameMode;

/// 難易度で絞り込んだ結果がこれより少なければ、モード内の全単語を使う
const MIN_QUESTIONS: usize = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub japanese: &'static str, // 表示用 (漢字混じり / 英単語の意味)
    pub reading: &'static str,  // 入力判定用 (ひらがな / 英単語)
    pub difficulty: Difficulty,
}

const fn q(difficulty: Difficulty, japanese: &'static str, reading: &'static str) -> Question {
    Question {
        japanese,
        reading,
        difficulty,
    }
}

/// ひらがなモードのお題。打ち方に揺れのある表記ごとにまとめてある
pub const QUESTIONS_LIST: &[Question] = &[
    // 清音だけ
    q(Easy, "猫", "ねこ"),
    q(Easy, "犬", "いぬ"),
    q(Easy, "空", "そら"),
    q(Easy, "海", "うみ"),
    q(Easy, "山", "やま"),
    q(Easy, "車", "くるま"),
    q(Easy, "時計", "とけい"),
    // し・ち・つ・ふ (shi/si, chi/ti, tsu/tu, fu/hu)
    q(Easy, "机", "つくえ"),
    q(Easy, "船", "ふね"),
    q(Normal, "地下鉄", "ちかてつ"),
    // 撥音 (n / nn)
    q(Normal, "リンゴ", "りんご"),
    q(Normal, "ミカン", "みかん"),
    q(Normal, "電話", "でんわ"),
    q(Normal, "原因", "げんいん"),
    q(Hard, "こんにちは", "こんにちは"),
    q(Hard, "新幹線", "しんかんせん"),
    // 拗音 (cha / tya / cya)
    q(Normal, "茶", "ちゃ"),
    q(Normal, "写真", "しゃしん"),
    q(Hard, "図書館", "としょかん"),
    q(Hard, "水族館", "すいぞくかん"),
    // 促音 (kk / xtu / 省略)
    q(Normal, "切手", "きって"),
    q(Normal, "抹茶", "まっちゃ"),
    q(Normal, "学校", "がっこう"),
    // 長音 (ou / o, uu / u)
    q(Normal, "ありがとう", "ありがとう"),
    q(Normal, "飛行機", "ひこうき"),
    q(Normal, "東京", "とうきょう"),
    q(Hard, "さようなら", "さようなら"),
    q(Hard, "動物園", "どうぶつえん"),
    q(Hard, "遊園地", "ゆうえんち"),
    q(Hard, "高速道路", "こうそくどうろ"),
    q(Hard, "牛乳", "ぎゅうにゅう"),
    q(Hard, "中学校", "ちゅうがっこう"),
    q(Hard, "駐車場", "ちゅうしゃじょう"),
];

/// 英語モードのお題（綴りをそのまま打つ）
pub const ENGLISH_LIST: &[Question] = &[
    q(Easy, "猫", "cat"),
    q(Easy, "犬", "dog"),
    q(Easy, "太陽", "sun"),
    q(Easy, "本", "book"),
    q(Easy, "魚", "fish"),
    q(Easy, "木", "tree"),
    q(Normal, "りんご", "apple"),
    q(Normal, "椅子", "chair"),
    q(Normal, "学校", "school"),
    q(Normal, "電車", "train"),
    q(Normal, "音楽", "music"),
    q(Normal, "友達", "friend"),
    q(Hard, "図書館", "library"),
    q(Hard, "飛行機", "airplane"),
    q(Hard, "動物園", "zoo"),
    q(Hard, "駐車場", "parking"),
    q(Hard, "地下鉄", "subway"),
    q(Hard, "新幹線", "bullettrain"),
];

/// ひらがなだけの単語か
pub fn is_hiragana_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| ('\u{3040}'..='\u{309F}').contains(&c))
}

/// 英字だけの単語か
pub fn is_english_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
}

/// モードと難易度に合うお題を選ぶ
///
/// その難易度の単語が少なすぎるときは、同じモードの全単語から出題する。
pub fn questions_for(mode: GameMode, difficulty: Difficulty) -> Vec<Question> {
    let (source, fits): (&[Question], fn(&str) -> bool) = match mode {
        GameMode::Hiragana => (QUESTIONS_LIST, is_hiragana_word),
        GameMode::English => (ENGLISH_LIST, is_english_word),
    };

    let all: Vec<Question> = source.iter().copied().filter(|q| fits(q.reading)).collect();
    let selected: Vec<Question> = all
        .iter()
        .copied()
        .filter(|q| q.difficulty == difficulty)
        .collect();

    if selected.len() < MIN_QUESTIONS {
        log::warn!(
            "only {} {difficulty:?} words for {mode:?}, using the whole list",
            selected.len()
        );
        return all;
    }
    log::info!("{} {difficulty:?} words for {mode:?}", selected.len());
    selected
}
