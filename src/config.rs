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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::date::UtcOffset;

pub const CONFIG_FILE: &str = "komorebi.toml";

const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Contents of `komorebi.toml`. Every key is optional.
#[derive(Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Generative Language API key. Falls back to the environment.
    pub api_key: Option<String>,
    pub model: String,
    /// Base URL of the REST API, without a trailing slash.
    pub endpoint: String,
    /// Request timeout for provider calls.
    pub timeout_secs: u64,
    /// The offset "today" and the calendar are computed in.
    pub utc_offset_hours: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-3-flash-preview".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 60,
            utc_offset_hours: 9,
        }
    }
}

impl Config {
    /// Load the configuration file from the study directory. A missing file
    /// gives the defaults.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE}, using defaults.");
            return Ok(Self::default());
        }
        let content = read_to_string(&path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(content)?;
        config.utc_offset()?;
        if config.timeout_secs == 0 {
            return fail("timeout_secs must be positive");
        }
        Ok(config)
    }

    pub fn utc_offset(&self) -> Fallible<UtcOffset> {
        UtcOffset::from_hours(self.utc_offset_hours)
    }

    /// The API key from the file, or else from the environment.
    pub fn api_key(&self) -> Option<String> {
        if let Some(key) = &self.api_key {
            if !key.trim().is_empty() {
                return Some(key.trim().to_string());
            }
        }
        for var in API_KEY_VARS {
            if let Ok(key) = std::env::var(var) {
                if !key.trim().is_empty() {
                    return Some(key.trim().to_string());
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() -> Fallible<()> {
        let dir = tempdir()?;
        assert_eq!(Config::load(dir.path())?, Config::default());
        Ok(())
    }

    #[test]
    fn test_partial_file() -> Fallible<()> {
        let dir = tempdir()?;
        write(
            dir.path().join(CONFIG_FILE),
            "api_key = \"abc\"\nutc_offset_hours = 0\n",
        )?;
        let config = Config::load(dir.path())?;
        assert_eq!(config.api_key().as_deref(), Some("abc"));
        assert_eq!(config.utc_offset_hours, 0);
        assert_eq!(config.model, Config::default().model);
        Ok(())
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(Config::parse("colour = \"blue\"").is_err());
    }

    #[test]
    fn test_offset_is_validated() {
        assert!(Config::parse("utc_offset_hours = 20").is_err());
        assert!(Config::parse("utc_offset_hours = -5").is_ok());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(Config::parse("timeout_secs = 0").is_err());
    }
}
