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

use std::fmt::Write;

use crate::calendar::DayCell;
use crate::calendar::Month;
use crate::calendar::MonthGrid;
use crate::calendar::month_grid;
use crate::error::Fallible;
use crate::persist::load_history;
use crate::workspace::Workspace;

pub fn print_calendar(directory: Option<String>, month: Option<Month>) -> Fallible<()> {
    let workspace = Workspace::open(directory)?;
    let today = workspace.today()?;
    let history = load_history(&workspace.db);
    let month = month.unwrap_or_else(|| Month::of(today));
    let grid = month_grid(month, &history, today)?;
    print!("{}", render(&grid));
    Ok(())
}

/// Each cell is four columns wide: a today marker, the day, and a status
/// marker.
pub fn render(grid: &MonthGrid) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  (prev: {}, next: {})",
        grid.month,
        grid.month.previous(),
        grid.month.next()
    );
    let _ = writeln!(out, "  Su  Mo  Tu  We  Th  Fr  Sa");
    for week in &grid.weeks {
        let line: String = week.iter().map(cell).collect();
        let _ = writeln!(out, "{}", line.trim_end());
    }
    let _ = writeln!(out, "@ today  * completed  + studied");
    out
}

fn cell(day: &Option<DayCell>) -> String {
    match day {
        None => "    ".to_string(),
        Some(day) => {
            let today = if day.is_today { '@' } else { ' ' };
            let status = if day.completed {
                '*'
            } else if day.studied {
                '+'
            } else {
                ' '
            };
            format!("{today}{:>2}{status}", day.date.day())
        }
    }
}
