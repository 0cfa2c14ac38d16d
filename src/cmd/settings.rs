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

use crate::app::App;
use crate::error::Fallible;
use crate::provider::VocabularyProvider;
use crate::types::level::Level;
use crate::types::settings::Settings;
use crate::workspace::Workspace;

pub fn settings(
    directory: Option<String>,
    word_count: Option<u32>,
    levels: Option<Vec<Level>>,
    toggle: Vec<Level>,
) -> Fallible<()> {
    let workspace = Workspace::open(directory)?;
    let app = workspace.app()?;
    let settings = edit_settings(&app, word_count, levels, &toggle)?;
    println!("Words per day: {}", settings.word_count());
    println!("Levels: {}", settings.levels_label());
    Ok(())
}

/// Apply the command-line edits to the settings. With no edits the current
/// settings are returned as they are. Toggles apply after `levels`.
pub fn edit_settings<P: VocabularyProvider>(
    app: &App<P>,
    word_count: Option<u32>,
    levels: Option<Vec<Level>>,
    toggle: &[Level],
) -> Fallible<Settings> {
    app.update_settings(|mut settings| {
        if let Some(word_count) = word_count {
            settings = settings.with_word_count(word_count)?;
        }
        if let Some(levels) = levels {
            settings = settings.with_levels(levels)?;
        }
        for level in toggle {
            settings = settings.toggle_level(*level);
        }
        Ok(settings)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::SETTINGS_KEY;
    use crate::persist::load_settings;
    use crate::provider::mock::MockProvider;
    use crate::store::memory::MemoryStore;

    fn app(store: &MemoryStore) -> App<MockProvider> {
        App::load(MockProvider::new(), Box::new(store.clone()))
    }

    #[test]
    fn test_no_edits_keeps_defaults() -> Fallible<()> {
        let store = MemoryStore::new();
        let settings = edit_settings(&app(&store), None, None, &[])?;
        assert_eq!(settings, Settings::default());
        assert!(store.raw(SETTINGS_KEY).is_none());
        Ok(())
    }

    #[test]
    fn test_edits_are_saved() -> Fallible<()> {
        let store = MemoryStore::new();
        edit_settings(&app(&store), Some(50), Some(vec![Level::N4, Level::N5]), &[])?;
        let settings = load_settings(&store);
        assert_eq!(settings.word_count(), 50);
        assert_eq!(settings.levels_label(), "N5, N4");
        Ok(())
    }

    #[test]
    fn test_invalid_edits_are_rejected() -> Fallible<()> {
        let store = MemoryStore::new();
        let app = app(&store);
        assert!(edit_settings(&app, Some(5), None, &[]).is_err());
        assert!(edit_settings(&app, None, Some(vec![]), &[]).is_err());
        assert!(store.raw(SETTINGS_KEY).is_none());
        Ok(())
    }

    #[test]
    fn test_toggle() -> Fallible<()> {
        let store = MemoryStore::new();
        let app = app(&store);
        let settings = edit_settings(&app, None, None, &[Level::N3])?;
        assert_eq!(settings.levels_label(), "N5, N4");
        let settings = edit_settings(&app, None, Some(vec![Level::N5]), &[Level::N5])?;
        // The last level stays selected.
        assert_eq!(settings.levels_label(), "N5");
        Ok(())
    }
}
