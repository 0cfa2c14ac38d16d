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

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::types::date::Date;
use crate::types::session::StudySession;
use crate::types::word::VocabularyEntry;

/// Every study session, keyed by date. A date that is present has already
/// been fetched.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
#[serde(transparent)]
pub struct History {
    sessions: BTreeMap<Date, StudySession>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: Date) -> Option<&StudySession> {
        self.sessions.get(&date)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Sessions in date order.
    pub fn sessions(&self) -> impl Iterator<Item = &StudySession> {
        self.sessions.values()
    }

    /// Every word of every session, oldest session first.
    pub fn words(&self) -> impl Iterator<Item = &VocabularyEntry> {
        self.sessions.values().flat_map(|session| session.words())
    }

    /// Return a copy of this history with `session` stored under its date,
    /// replacing any previous value for that date.
    pub fn with_session(&self, session: StudySession) -> Self {
        let mut sessions = self.sessions.clone();
        sessions.insert(session.date(), session);
        Self { sessions }
    }

    /// Drop entries whose key disagrees with the session's own date. Returns
    /// the number of entries removed.
    pub fn remove_mismatched(&mut self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|date, session| *date == session.date());
        before - self.sessions.len()
    }
}
