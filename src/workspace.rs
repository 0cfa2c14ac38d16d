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

use std::env::current_dir;
use std::path::PathBuf;

use crate::app::App;
use crate::config::Config;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::provider::gemini::GeminiProvider;
use crate::store::Database;
use crate::types::date::Date;

pub const DATABASE_FILE: &str = "komorebi.db";

/// A study directory: its configuration and its database.
pub struct Workspace {
    pub config: Config,
    pub db: Database,
}

/// The canonical study directory, or the current one. Nothing is read or
/// created in it.
pub fn resolve_directory(directory: Option<String>) -> Fallible<PathBuf> {
    let directory: PathBuf = match directory {
        Some(dir) => PathBuf::from(dir),
        None => current_dir()?,
    };
    if directory.exists() {
        Ok(directory.canonicalize()?)
    } else {
        fail("directory does not exist.")
    }
}

impl Workspace {
    pub fn open(directory: Option<String>) -> Fallible<Self> {
        let directory = resolve_directory(directory)?;
        log::debug!("Opening workspace in {}.", directory.display());
        let config = Config::load(&directory)?;

        let db_path: PathBuf = directory.join(DATABASE_FILE);
        let db_path: &str = db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?;
        let db: Database = Database::new(db_path)?;

        Ok(Self { config, db })
    }

    /// Today's date in the configured offset.
    pub fn today(&self) -> Fallible<Date> {
        Ok(Date::today(self.config.utc_offset()?))
    }

    /// Build the app with the network provider. A missing API key only fails
    /// the requests.
    pub fn app(&self) -> Fallible<App<GeminiProvider>> {
        let provider = GeminiProvider::new(&self.config)?;
        Ok(App::load(provider, Box::new(self.db.clone())))
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;
    use crate::config::CONFIG_FILE;

    #[test]
    fn test_non_existent_directory() {
        let result = Workspace::open(Some("./derpherp".to_string()));
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: directory does not exist.");
    }

    #[test]
    fn test_creates_database() -> Fallible<()> {
        let dir = tempdir()?;
        let workspace = Workspace::open(Some(dir.path().display().to_string()))?;
        assert!(dir.path().join(DATABASE_FILE).exists());
        assert_eq!(workspace.config, Config::default());
        Ok(())
    }

    #[test]
    fn test_reads_config() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join(CONFIG_FILE), "utc_offset_hours = 0\n")?;
        let workspace = Workspace::open(Some(dir.path().display().to_string()))?;
        assert_eq!(workspace.config.utc_offset_hours, 0);
        Ok(())
    }

    #[test]
    fn test_bad_config_fails() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join(CONFIG_FILE), "utc_offset_hours = 99\n")?;
        assert!(Workspace::open(Some(dir.path().display().to_string())).is_err());
        Ok(())
    }

    #[test]
    fn test_app_opens_without_key() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join(CONFIG_FILE), "model = \"m\"\n")?;
        let workspace = Workspace::open(Some(dir.path().display().to_string()))?;
        assert!(workspace.app().is_ok());
        Ok(())
    }

    #[test]
    fn test_resolve_leaves_directory_alone() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join(CONFIG_FILE), "utc_offset_hours = 99\n")?;
        let resolved = resolve_directory(Some(dir.path().display().to_string()))?;
        assert_eq!(resolved, dir.path().canonicalize()?);
        assert!(!dir.path().join(DATABASE_FILE).exists());
        Ok(())
    }

    #[test]
    fn test_resolve_non_existent_directory() {
        let result = resolve_directory(Some("./derpherp".to_string()));
        assert!(result.is_err());
    }
}
