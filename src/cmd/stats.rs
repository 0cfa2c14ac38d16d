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

use serde::Serialize;

use crate::error::Fallible;
use crate::persist::load_history;
use crate::persist::load_settings;
use crate::types::date::Date;
use crate::types::history::History;
use crate::types::settings::Settings;
use crate::workspace::Workspace;

pub fn print_stats(directory: Option<String>) -> Fallible<()> {
    let workspace = Workspace::open(directory)?;
    let today = workspace.today()?;
    let history = load_history(&workspace.db);
    let settings = load_settings(&workspace.db);
    let stats = Stats::new(&history, &settings, today);
    let stats_json = serde_json::to_string_pretty(&stats)?;
    println!("{}", stats_json);
    Ok(())
}

#[derive(Serialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    today: Date,
    days_studied: usize,
    days_completed: usize,
    total_word_count: usize,
    today_studied: bool,
    today_completed: bool,
    word_count_setting: u32,
    levels_setting: String,
}

impl Stats {
    pub fn new(history: &History, settings: &Settings, today: Date) -> Self {
        let today_session = history.get(today);
        Self {
            today,
            days_studied: history.len(),
            days_completed: history.sessions().filter(|s| s.completed()).count(),
            total_word_count: history.words().count(),
            today_studied: today_session.is_some(),
            today_completed: today_session.is_some_and(|s| s.completed()),
            word_count_setting: settings.word_count(),
            levels_setting: settings.levels_label(),
        }
    }
}
