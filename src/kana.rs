// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::ValueEnum;

/// A kana character and its Hepburn romanization.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Kana {
    pub kana: &'static str,
    pub romaji: &'static str,
}

const fn k(kana: &'static str, romaji: &'static str) -> Kana {
    Kana { kana, romaji }
}

/// The 46 basic hiragana.
#[rustfmt::skip]
pub const HIRAGANA: [Kana; 46] = [
    k("あ", "a"), k("い", "i"), k("う", "u"), k("え", "e"), k("お", "o"),
    k("か", "ka"), k("き", "ki"), k("く", "ku"), k("け", "ke"), k("こ", "ko"),
    k("さ", "sa"), k("し", "shi"), k("す", "su"), k("せ", "se"), k("そ", "so"),
    k("た", "ta"), k("ち", "chi"), k("つ", "tsu"), k("て", "te"), k("と", "to"),
    k("な", "na"), k("に", "ni"), k("ぬ", "nu"), k("ね", "ne"), k("の", "no"),
    k("は", "ha"), k("ひ", "hi"), k("ふ", "fu"), k("へ", "he"), k("ほ", "ho"),
    k("ま", "ma"), k("み", "mi"), k("む", "mu"), k("め", "me"), k("も", "mo"),
    k("や", "ya"), k("ゆ", "yu"), k("よ", "yo"),
    k("ら", "ra"), k("り", "ri"), k("る", "ru"), k("れ", "re"), k("ろ", "ro"),
    k("わ", "wa"), k("を", "wo"), k("ん", "n"),
];

/// The 46 basic katakana.
#[rustfmt::skip]
pub const KATAKANA: [Kana; 46] = [
    k("ア", "a"), k("イ", "i"), k("ウ", "u"), k("エ", "e"), k("オ", "o"),
    k("カ", "ka"), k("キ", "ki"), k("ク", "ku"), k("ケ", "ke"), k("コ", "ko"),
    k("サ", "sa"), k("シ", "shi"), k("ス", "su"), k("セ", "se"), k("ソ", "so"),
    k("タ", "ta"), k("チ", "chi"), k("ツ", "tsu"), k("テ", "te"), k("ト", "to"),
    k("ナ", "na"), k("ニ", "ni"), k("ヌ", "nu"), k("ネ", "ne"), k("ノ", "no"),
    k("ハ", "ha"), k("ヒ", "hi"), k("フ", "fu"), k("ヘ", "he"), k("ホ", "ho"),
    k("マ", "ma"), k("ミ", "mi"), k("ム", "mu"), k("メ", "me"), k("モ", "mo"),
    k("ヤ", "ya"), k("ユ", "yu"), k("ヨ", "yo"),
    k("ラ", "ra"), k("リ", "ri"), k("ル", "ru"), k("レ", "re"), k("ロ", "ro"),
    k("ワ", "wa"), k("ヲ", "wo"), k("ン", "n"),
];

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Script {
    #[default]
    Hiragana,
    Katakana,
    /// Hiragana and katakana together.
    Both,
}

impl Script {
    pub fn table(self) -> Vec<Kana> {
        match self {
            Script::Hiragana => HIRAGANA.to_vec(),
            Script::Katakana => KATAKANA.to_vec(),
            Script::Both => HIRAGANA.iter().chain(KATAKANA.iter()).copied().collect(),
        }
    }
}
