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

//! The daily session cache: at most one word fetch per date, replayed from
//! the history afterwards. These functions never mutate the history they
//! are given; they return new values for the caller to store.

use crate::error::ProviderError;
use crate::provider::VocabularyProvider;
use crate::types::date::Date;
use crate::types::history::History;
use crate::types::session::StudySession;
use crate::types::settings::Settings;

/// The result of [`ensure_session`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Ensured {
    pub session: StudySession,
    /// The history with the session stored under its date.
    pub history: History,
    /// Whether the provider was called.
    pub fetched: bool,
}

/// Return the session for `date`, fetching its words if the history does not
/// have it yet. A provider failure is returned as is, and nothing is stored.
pub async fn ensure_session<P: VocabularyProvider>(
    provider: &P,
    date: Date,
    history: &History,
    settings: &Settings,
) -> Result<Ensured, ProviderError> {
    if let Some(session) = history.get(date) {
        log::debug!("Session for {date} found in history.");
        return Ok(Ensured {
            session: session.clone(),
            history: history.clone(),
            fetched: false,
        });
    }
    let words = provider
        .fetch_words(settings.word_count(), settings.levels(), date)
        .await?;
    log::debug!("Fetched {} words for {date}.", words.len());
    let session = StudySession::new(date, words);
    Ok(Ensured {
        history: history.with_session(session.clone()),
        session,
        fetched: true,
    })
}

/// Return a completed copy of `session` with a closing quote attached.
///
/// An already completed session is returned unchanged. A failed quote fetch
/// still completes the session, without a quote.
pub async fn complete_session<P: VocabularyProvider>(
    provider: &P,
    session: &StudySession,
) -> StudySession {
    if session.completed() {
        return session.clone();
    }
    match provider.fetch_quote().await {
        Ok(quote) => session.complete(Some(quote)),
        Err(e) => {
            log::warn!("Completing {} without a quote: {e}", session.date());
            session.complete(None)
        }
    }
}
