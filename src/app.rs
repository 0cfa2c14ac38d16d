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

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::cache::complete_session;
use crate::cache::ensure_session;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::persist::load_history;
use crate::persist::load_settings;
use crate::persist::save_history;
use crate::persist::update_settings;
use crate::provider::VocabularyProvider;
use crate::store::Store;
use crate::types::date::Date;
use crate::types::history::History;
use crate::types::session::StudySession;
use crate::types::settings::Settings;

/// Owns the history and settings, and is the only thing that writes them
/// back to the store.
pub struct App<P: VocabularyProvider> {
    provider: P,
    store: Box<dyn Store>,
    mutable: Mutex<MutableState>,
    /// One lock per date with a start in progress. Concurrent starts for the
    /// same date wait on it, so the provider is asked at most once.
    in_flight: Mutex<HashMap<Date, DateLock>>,
}

type DateLock = Arc<tokio::sync::Mutex<()>>;

struct MutableState {
    history: History,
    settings: Settings,
}

impl<P: VocabularyProvider> App<P> {
    pub fn load(provider: P, store: Box<dyn Store>) -> Self {
        let history = load_history(store.as_ref());
        let settings = load_settings(store.as_ref());
        log::debug!(
            "Loaded {} sessions, {} words per day ({}).",
            history.len(),
            settings.word_count(),
            settings.levels_label()
        );
        Self {
            provider,
            store,
            mutable: Mutex::new(MutableState { history, settings }),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    fn acquire(&self) -> Fallible<MutexGuard<'_, MutableState>> {
        self.mutable
            .lock()
            .map_err(|_| ErrorReport::new("state lock poisoned"))
    }

    /// Apply `edit` to the settings and store them. Invalid settings are
    /// rejected and the current ones are kept.
    pub fn update_settings<F>(&self, edit: F) -> Fallible<Settings>
    where
        F: FnOnce(Settings) -> Fallible<Settings>,
    {
        let mut mutable = self.acquire()?;
        let settings = update_settings(self.store.as_ref(), &mutable.settings, edit)?;
        mutable.settings = settings.clone();
        Ok(settings)
    }

    fn in_flight(&self) -> Fallible<MutexGuard<'_, HashMap<Date, DateLock>>> {
        self.in_flight
            .lock()
            .map_err(|_| ErrorReport::new("in-flight lock poisoned"))
    }

    fn date_lock(&self, date: Date) -> Fallible<DateLock> {
        Ok(self.in_flight()?.entry(date).or_default().clone())
    }

    /// Drop the entry for `date` once no other task holds or waits on it.
    /// The caller's handle is dropped while the map is locked, so the last
    /// task to leave always sees the count at two.
    fn release_date(&self, date: Date, lock: DateLock) -> Fallible<()> {
        let mut in_flight = self.in_flight()?;
        if Arc::strong_count(&lock) == 2 {
            in_flight.remove(&date);
        }
        drop(lock);
        Ok(())
    }

    /// Return the session for `date`, fetching it on the first start of the
    /// day. On failure nothing is stored and the next start tries again.
    pub async fn start_daily_study(&self, date: Date) -> Fallible<StudySession> {
        let lock = self.date_lock(date)?;
        let result = {
            let _guard = lock.lock().await;
            self.start_locked(date).await
        };
        self.release_date(date, lock)?;
        result
    }

    /// Mark `session` as completed and store it.
    pub async fn complete_study(&self, session: &StudySession) -> Fallible<StudySession> {
        let lock = self.date_lock(session.date())?;
        let result = {
            let _guard = lock.lock().await;
            self.complete_locked(session).await
        };
        self.release_date(session.date(), lock)?;
        result
    }

    async fn start_locked(&self, date: Date) -> Fallible<StudySession> {
        let (history, settings) = {
            let mutable = self.acquire()?;
            (mutable.history.clone(), mutable.settings.clone())
        };
        let ensured = ensure_session(&self.provider, date, &history, &settings).await?;
        if ensured.fetched {
            let mut mutable = self.acquire()?;
            mutable.history = mutable.history.with_session(ensured.session.clone());
            save_history(self.store.as_ref(), &mutable.history);
        }
        Ok(ensured.session)
    }

    async fn complete_locked(&self, session: &StudySession) -> Fallible<StudySession> {
        let (current, stored) = {
            let mutable = self.acquire()?;
            match mutable.history.get(session.date()) {
                Some(stored) => (stored.clone(), true),
                None => (session.clone(), false),
            }
        };
        let done = complete_session(&self.provider, &current).await;
        if done != current || !stored {
            let mut mutable = self.acquire()?;
            mutable.history = mutable.history.with_session(done.clone());
            save_history(self.store.as_ref(), &mutable.history);
        }
        Ok(done)
    }
}
