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

pub mod gemini;
#[cfg(test)]
pub mod mock;
pub mod parse;

use std::collections::BTreeSet;
use std::future::Future;

use crate::error::ProviderError;
use crate::types::date::Date;
use crate::types::level::Level;
use crate::types::word::VocabularyEntry;

/// Shown in place of the closing quote when it could not be fetched.
pub const FALLBACK_QUOTE: &str = "継続は力なり。 (꾸준함이 힘이다.)";

/// The generative text service that supplies vocabulary and quotes.
pub trait VocabularyProvider: Send + Sync {
    /// Generate `count` words for the given levels. The date is passed as a
    /// seed so that the content varies from day to day.
    fn fetch_words(
        &self,
        count: u32,
        levels: &BTreeSet<Level>,
        seed: Date,
    ) -> impl Future<Output = Result<Vec<VocabularyEntry>, ProviderError>> + Send;

    /// Generate a short motivational quote.
    fn fetch_quote(&self) -> impl Future<Output = Result<String, ProviderError>> + Send;
}
