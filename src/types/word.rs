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

use serde::Deserialize;
use serde::Serialize;

use crate::types::level::Level;

/// A vocabulary entry, as generated by the provider.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VocabularyEntry {
    /// Unique within a session.
    pub id: String,
    /// The kanji form. Empty for words usually written in kana.
    pub kanji: String,
    /// The kana reading. Never empty.
    pub hiragana: String,
    /// The meaning in the learner's language. May list several senses.
    pub meaning: String,
    pub example_jp: String,
    pub example_kr: String,
    pub level: Level,
}

impl VocabularyEntry {
    /// The form shown on the front of a card: the kanji if there is one,
    /// otherwise the reading.
    pub fn headword(&self) -> &str {
        if self.kanji.trim().is_empty() {
            &self.hiragana
        } else {
            &self.kanji
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_word(id: &str, kanji: &str, hiragana: &str, meaning: &str) -> VocabularyEntry {
    VocabularyEntry {
        id: id.to_string(),
        kanji: kanji.to_string(),
        hiragana: hiragana.to_string(),
        meaning: meaning.to_string(),
        example_jp: format!("{hiragana}です。"),
        example_kr: format!("{meaning}입니다."),
        level: Level::N5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_headword() {
        let with_kanji = sample_word("1", "愛", "あい", "사랑, 애정");
        assert_eq!(with_kanji.headword(), "愛");
        let kana_only = sample_word("2", "", "これ", "이것");
        assert_eq!(kana_only.headword(), "これ");
    }

    #[test]
    fn test_wire_field_names() -> Fallible<()> {
        let word = sample_word("1", "愛", "あい", "사랑");
        let json = serde_json::to_value(&word)?;
        for key in [
            "id",
            "kanji",
            "hiragana",
            "meaning",
            "exampleJp",
            "exampleKr",
            "level",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        Ok(())
    }
}
