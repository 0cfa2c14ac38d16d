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

use std::collections::HashSet;

use serde_json::Value;

use crate::error::ProviderError;
use crate::types::word::VocabularyEntry;

/// Remove a Markdown code fence (```` ```json ... ``` ````) wrapped around
/// the payload, if there is one.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // The info string, e.g. `json`.
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    let rest = rest.trim();
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse the provider's answer to a word request. The payload must be a
/// non-empty JSON array whose elements are exactly vocabulary entries.
pub fn parse_words(text: &str) -> Result<Vec<VocabularyEntry>, ProviderError> {
    let payload = strip_code_fence(text);
    let value: Value = serde_json::from_str(payload)?;
    let Value::Array(items) = value else {
        return Err(ProviderError::new("expected a JSON array of words"));
    };
    if items.is_empty() {
        return Err(ProviderError::new("provider returned no words"));
    }
    let mut words = Vec::with_capacity(items.len());
    let mut seen = HashSet::new();
    for (index, item) in items.into_iter().enumerate() {
        let word: VocabularyEntry = serde_json::from_value(item)
            .map_err(|e| ProviderError::new(format!("word #{index}: {e}")))?;
        if word.id.trim().is_empty() {
            return Err(ProviderError::new(format!("word #{index}: empty id")));
        }
        if word.hiragana.trim().is_empty() {
            return Err(ProviderError::new(format!("word #{index}: empty reading")));
        }
        if word.meaning.trim().is_empty() {
            return Err(ProviderError::new(format!("word #{index}: empty meaning")));
        }
        if !seen.insert(word.id.clone()) {
            return Err(ProviderError::new(format!(
                "word #{index}: duplicate id {:?}",
                word.id
            )));
        }
        words.push(word);
    }
    Ok(words)
}

/// Parse the provider's answer to a quote request.
pub fn parse_quote(text: &str) -> Result<String, ProviderError> {
    let quote = strip_code_fence(text);
    if quote.is_empty() {
        return Err(ProviderError::new("provider returned an empty quote"));
    }
    Ok(quote.to_string())
}
