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
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use crate::error::ProviderError;
use crate::provider::VocabularyProvider;
use crate::types::date::Date;
use crate::types::level::Level;
use crate::types::word::VocabularyEntry;
use crate::types::word::sample_word;

/// The arguments of one `fetch_words` call.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct WordsCall {
    pub count: u32,
    pub levels: Vec<Level>,
    pub seed: Date,
}

/// A scripted provider that records its calls.
pub struct MockProvider {
    words: Option<Vec<VocabularyEntry>>,
    quote: Option<String>,
    delay: Option<Duration>,
    words_calls: Mutex<Vec<WordsCall>>,
    quote_calls: AtomicUsize,
}

impl MockProvider {
    /// Answers with three words and a quote.
    pub fn new() -> Self {
        Self {
            words: Some(vec![
                sample_word("w1", "愛", "あい", "사랑, 애정"),
                sample_word("w2", "猫", "ねこ", "고양이"),
                sample_word("w3", "", "これ", "이것"),
            ]),
            quote: Some("七転び八起き (일곱 번 넘어져도 여덟 번 일어난다)".to_string()),
            delay: None,
            words_calls: Mutex::new(Vec::new()),
            quote_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_words(mut self) -> Self {
        self.words = None;
        self
    }

    pub fn failing_quote(mut self) -> Self {
        self.quote = None;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn words_calls(&self) -> Vec<WordsCall> {
        self.words_calls.lock().unwrap().clone()
    }

    pub fn quote_calls(&self) -> usize {
        self.quote_calls.load(Ordering::SeqCst)
    }
}

impl VocabularyProvider for MockProvider {
    async fn fetch_words(
        &self,
        count: u32,
        levels: &BTreeSet<Level>,
        seed: Date,
    ) -> Result<Vec<VocabularyEntry>, ProviderError> {
        self.words_calls.lock().unwrap().push(WordsCall {
            count,
            levels: levels.iter().copied().collect(),
            seed,
        });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.words
            .clone()
            .ok_or_else(|| ProviderError::new("connection refused"))
    }

    async fn fetch_quote(&self) -> Result<String, ProviderError> {
        self.quote_calls.fetch_add(1, Ordering::SeqCst);
        self.quote
            .clone()
            .ok_or_else(|| ProviderError::new("connection refused"))
    }
}
