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

use crate::types::date::Date;
use crate::types::word::VocabularyEntry;

/// One day's words plus completion state.
///
/// The word list is fixed when the session is created. Only `completed` and
/// `quote` change afterwards, and only through [`StudySession::complete`].
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct StudySession {
    date: Date,
    words: Vec<VocabularyEntry>,
    completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    quote: Option<String>,
}

impl StudySession {
    pub fn new(date: Date, words: Vec<VocabularyEntry>) -> Self {
        Self {
            date,
            words,
            completed: false,
            quote: None,
        }
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn words(&self) -> &[VocabularyEntry] {
        &self.words
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn quote(&self) -> Option<&str> {
        self.quote.as_deref()
    }

    /// Return a completed copy of this session. A quote that is already set
    /// is kept.
    pub fn complete(&self, quote: Option<String>) -> Self {
        Self {
            date: self.date,
            words: self.words.clone(),
            completed: true,
            quote: self.quote.clone().or(quote),
        }
    }
}
