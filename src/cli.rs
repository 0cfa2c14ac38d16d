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

use clap::Parser;

use crate::calendar::Month;
use crate::cmd::calendar::print_calendar;
use crate::cmd::quiz::kana_quiz;
use crate::cmd::quiz::word_quiz;
use crate::cmd::settings::settings;
use crate::cmd::stats::print_stats;
use crate::cmd::study::study;
use crate::error::Fallible;
use crate::kana::Script;
use crate::types::date::Date;
use crate::types::level::Level;
use crate::types::settings::MAX_WORD_COUNT;
use crate::types::settings::MIN_WORD_COUNT;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Study today's words as flashcards.
    Study {
        /// Path to the study directory. Defaults to the current directory.
        directory: Option<String>,
    },
    /// Quiz yourself on kana romanization.
    KanaQuiz {
        /// Path to the study directory. Defaults to the current directory.
        directory: Option<String>,
        /// Which kana to ask.
        #[arg(long, default_value_t = Script::Hiragana, value_enum)]
        script: Script,
        /// Number of questions.
        #[arg(long, default_value_t = 15)]
        size: usize,
    },
    /// Quiz yourself on the meanings of studied words.
    WordQuiz {
        /// Path to the study directory. Defaults to the current directory.
        directory: Option<String>,
        /// Only ask the words of this day (YYYY-MM-DD).
        #[arg(long)]
        date: Option<Date>,
        /// Number of questions.
        #[arg(long, default_value_t = 10)]
        size: usize,
    },
    /// Show the study calendar.
    Calendar {
        /// Path to the study directory. Defaults to the current directory.
        directory: Option<String>,
        /// The month to show (YYYY-MM). Defaults to this month.
        #[arg(long)]
        month: Option<Month>,
    },
    /// Show or change the study settings.
    Settings {
        /// Path to the study directory. Defaults to the current directory.
        directory: Option<String>,
        /// Words per day.
        #[arg(long, value_parser = clap::value_parser!(u32).range(MIN_WORD_COUNT as i64..=MAX_WORD_COUNT as i64))]
        word_count: Option<u32>,
        /// Replace the selected levels, e.g. `N5,N4`.
        #[arg(long, value_enum, value_delimiter = ',')]
        levels: Option<Vec<Level>>,
        /// Add or remove a level. Can be repeated.
        #[arg(long, value_enum)]
        toggle: Vec<Level>,
    },
    /// Print study statistics as JSON.
    Stats {
        /// Path to the study directory. Defaults to the current directory.
        directory: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Study { directory } => study(directory).await,
        Command::KanaQuiz {
            directory,
            script,
            size,
        } => kana_quiz(directory, script, size),
        Command::WordQuiz {
            directory,
            date,
            size,
        } => word_quiz(directory, date, size),
        Command::Calendar { directory, month } => print_calendar(directory, month),
        Command::Settings {
            directory,
            word_count,
            levels,
            toggle,
        } => settings(directory, word_count, levels, toggle),
        Command::Stats { directory } => print_stats(directory),
    }
}
