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

//! Loading and saving of the history and settings. Both are stored as pretty
//! JSON. Storage failures never reach the user: loads fall back to the
//! defaults and saves are best-effort.

use crate::error::Fallible;
use crate::store::Store;
use crate::types::history::History;
use crate::types::settings::Settings;

pub const HISTORY_KEY: &str = "komorebi_history";

pub const SETTINGS_KEY: &str = "komorebi_settings";

pub fn load_history(store: &dyn Store) -> History {
    match try_load_history(store) {
        Ok(Some(history)) => history,
        Ok(None) => {
            log::debug!("No stored history, starting empty.");
            History::new()
        }
        Err(e) => {
            log::warn!("Failed to load history, starting empty: {e}");
            History::new()
        }
    }
}

fn try_load_history(store: &dyn Store) -> Fallible<Option<History>> {
    let Some(bytes) = store.get(HISTORY_KEY)? else {
        return Ok(None);
    };
    let mut history: History = serde_json::from_slice(&bytes)?;
    let dropped = history.remove_mismatched();
    if dropped > 0 {
        log::warn!("Dropped {dropped} history entries filed under the wrong date.");
    }
    Ok(Some(history))
}

pub fn load_settings(store: &dyn Store) -> Settings {
    match try_load_settings(store) {
        Ok(Some(settings)) => settings,
        Ok(None) => Settings::default(),
        Err(e) => {
            log::warn!("Failed to load settings, using defaults: {e}");
            Settings::default()
        }
    }
}

fn try_load_settings(store: &dyn Store) -> Fallible<Option<Settings>> {
    let Some(bytes) = store.get(SETTINGS_KEY)? else {
        return Ok(None);
    };
    let settings: Settings = serde_json::from_slice(&bytes)?;
    settings.validate()?;
    Ok(Some(settings))
}

pub fn save_history(store: &dyn Store, history: &History) {
    if let Err(e) = try_save(store, HISTORY_KEY, history) {
        log::warn!("Failed to save history: {e}");
    }
}

/// Apply `edit` to `current` and store the result if it changed. An invalid
/// result is rejected and nothing is written.
pub fn update_settings<F>(store: &dyn Store, current: &Settings, edit: F) -> Fallible<Settings>
where
    F: FnOnce(Settings) -> Fallible<Settings>,
{
    let updated = edit(current.clone())?;
    updated.validate()?;
    if &updated != current {
        log::debug!("Saving settings.");
        save_settings(store, &updated);
    }
    Ok(updated)
}

fn save_settings(store: &dyn Store, settings: &Settings) {
    if let Err(e) = try_save(store, SETTINGS_KEY, settings) {
        log::warn!("Failed to save settings: {e}");
    }
}

fn try_save<T: serde::Serialize>(store: &dyn Store, key: &str, value: &T) -> Fallible<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    store.set(key, &bytes)
}
