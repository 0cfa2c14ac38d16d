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
use std::time::Duration;
use std::time::Instant;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::Value;
use serde_json::json;

use crate::config::CONFIG_FILE;
use crate::config::Config;
use crate::error::Fallible;
use crate::error::ProviderError;
use crate::provider::VocabularyProvider;
use crate::provider::parse::parse_quote;
use crate::provider::parse::parse_words;
use crate::types::date::Date;
use crate::types::level::Level;
use crate::types::word::VocabularyEntry;

const QUOTE_PROMPT: &str = "Recommend one warm Japanese saying, song lyric, or everyday phrase for a learner who just finished today's Japanese study. Answer in a single line containing the Japanese original (kanji with furigana) followed by its Korean meaning.";

/// A [`VocabularyProvider`] backed by the Generative Language REST API.
pub struct GeminiProvider {
    client: Client,
    endpoint: String,
    model: String,
    /// Checked on each request, so settings can be edited without a key.
    api_key: Option<String>,
}

impl GeminiProvider {
    pub fn new(config: &Config) -> Fallible<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Send a `generateContent` request and return the text of the first
    /// candidate.
    async fn generate(&self, request: &Value) -> Result<String, ProviderError> {
        let Some(api_key) = &self.api_key else {
            return Err(ProviderError::new(format!(
                "no API key: set `api_key` in {CONFIG_FILE} or the GEMINI_API_KEY environment variable"
            )));
        };
        let start = Instant::now();
        let response = self
            .client
            .post(self.url())
            .header(CONTENT_TYPE, "application/json")
            .header("x-goog-api-key", api_key)
            .body(request.to_string())
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        log::debug!(
            "generateContent answered {status} in {}ms.",
            start.elapsed().as_millis()
        );
        if !status.is_success() {
            return Err(ProviderError::new(format!(
                "service answered {status}: {}",
                body.trim()
            )));
        }
        extract_text(&body)
    }
}

impl VocabularyProvider for GeminiProvider {
    async fn fetch_words(
        &self,
        count: u32,
        levels: &BTreeSet<Level>,
        seed: Date,
    ) -> Result<Vec<VocabularyEntry>, ProviderError> {
        log::debug!("Fetching {count} words for {seed}.");
        let request = words_request(&words_prompt(count, levels, seed));
        let text = self.generate(&request).await?;
        let words = parse_words(&text)?;
        if words.len() != count as usize {
            log::warn!("Asked for {count} words, got {}.", words.len());
        }
        Ok(words)
    }

    async fn fetch_quote(&self) -> Result<String, ProviderError> {
        let request = json!({
            "contents": [{ "parts": [{ "text": QUOTE_PROMPT }] }],
        });
        let text = self.generate(&request).await?;
        parse_quote(&text)
    }
}

fn words_prompt(count: u32, levels: &BTreeSet<Level>, seed: Date) -> String {
    let levels = levels
        .iter()
        .map(Level::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Generate {count} Japanese vocabulary words for levels: {levels}.\n\
         Today's unique seed date is {seed}.\n\
         Each word must have kanji (empty if the word is written in kana), its hiragana reading, \
         its Korean meaning, and one Japanese example sentence with its Korean translation.\n\
         Ensure words are appropriate for JLPT {levels}, and tag each with its level."
    )
}

fn words_request(prompt: &str) -> Value {
    let string = json!({ "type": "STRING" });
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": string,
                        "kanji": string,
                        "hiragana": string,
                        "meaning": string,
                        "exampleJp": string,
                        "exampleKr": string,
                        "level": { "type": "STRING", "enum": ["N5", "N4", "N3"] },
                    },
                    "required": ["id", "kanji", "hiragana", "meaning", "exampleJp", "exampleKr", "level"],
                },
            },
        },
    })
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

/// Concatenate the text parts of the first candidate.
fn extract_text(body: &str) -> Result<String, ProviderError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::new("response has no candidates"))?;
    let text: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();
    if text.trim().is_empty() {
        return Err(ProviderError::new("response has no text"));
    }
    Ok(text)
}
