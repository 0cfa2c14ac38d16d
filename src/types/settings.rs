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

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::level::Level;

pub const MIN_WORD_COUNT: u32 = 10;

pub const MAX_WORD_COUNT: u32 = 100;

pub const DEFAULT_WORD_COUNT: u32 = 20;

/// User study preferences.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Words per daily session.
    word_count: u32,
    /// Target levels. Never empty.
    levels: BTreeSet<Level>,
}

impl Settings {
    pub fn new(word_count: u32, levels: impl IntoIterator<Item = Level>) -> Fallible<Self> {
        let settings = Self {
            word_count,
            levels: levels.into_iter().collect(),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn word_count(&self) -> u32 {
        self.word_count
    }

    pub fn levels(&self) -> &BTreeSet<Level> {
        &self.levels
    }

    pub fn validate(&self) -> Fallible<()> {
        if !(MIN_WORD_COUNT..=MAX_WORD_COUNT).contains(&self.word_count) {
            return fail(format!(
                "word count must be between {MIN_WORD_COUNT} and {MAX_WORD_COUNT}, got {}",
                self.word_count
            ));
        }
        if self.levels.is_empty() {
            return fail("at least one level must be selected");
        }
        Ok(())
    }

    pub fn with_word_count(&self, word_count: u32) -> Fallible<Self> {
        Self::new(word_count, self.levels.iter().copied())
    }

    pub fn with_levels(&self, levels: impl IntoIterator<Item = Level>) -> Fallible<Self> {
        Self::new(self.word_count, levels)
    }

    /// Add or remove a level. Removing the last selected level does nothing.
    pub fn toggle_level(&self, level: Level) -> Self {
        let mut levels = self.levels.clone();
        if levels.contains(&level) {
            if levels.len() > 1 {
                levels.remove(&level);
            }
        } else {
            levels.insert(level);
        }
        Self {
            word_count: self.word_count,
            levels,
        }
    }

    /// Levels joined for display and prompts, e.g. `N5, N4`.
    pub fn levels_label(&self) -> String {
        self.levels
            .iter()
            .map(Level::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            word_count: DEFAULT_WORD_COUNT,
            levels: Level::ALL.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let settings = Settings::default();
        assert_eq!(settings.word_count(), 20);
        assert_eq!(settings.levels_label(), "N5, N4, N3");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_word_count_bounds() {
        assert!(Settings::new(9, [Level::N5]).is_err());
        assert!(Settings::new(10, [Level::N5]).is_ok());
        assert!(Settings::new(100, [Level::N5]).is_ok());
        assert!(Settings::new(101, [Level::N5]).is_err());
    }

    #[test]
    fn test_levels_must_not_be_empty() {
        assert!(Settings::new(20, []).is_err());
    }

    #[test]
    fn test_toggle_level() {
        let settings = Settings::default().toggle_level(Level::N3);
        assert_eq!(settings.levels_label(), "N5, N4");
        let settings = settings.toggle_level(Level::N3);
        assert_eq!(settings.levels_label(), "N5, N4, N3");
    }

    #[test]
    fn test_toggle_last_level_is_noop() -> Fallible<()> {
        let settings = Settings::new(20, [Level::N4])?;
        assert_eq!(settings.toggle_level(Level::N4), settings);
        Ok(())
    }

    #[test]
    fn test_serde_field_names() -> Fallible<()> {
        let json = serde_json::to_string(&Settings::default())?;
        assert_eq!(json, r#"{"wordCount":20,"levels":["N5","N4","N3"]}"#);
        Ok(())
    }
}
