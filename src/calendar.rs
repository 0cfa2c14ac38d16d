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

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use chrono::Datelike;
use chrono::NaiveDate;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::date::Date;
use crate::types::history::History;

/// A calendar month.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Fallible<Self> {
        if !(1..=12).contains(&month) {
            return fail(format!("invalid month: {month}"));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(self) -> Fallible<Date> {
        Date::from_ymd(self.year, self.month, 1)
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn days(self) -> Fallible<u32> {
        let first = self.first_day()?.into_inner();
        let next = self.next().first_day()?.into_inner();
        Ok((next - first).num_days() as u32)
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = ErrorReport;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 7 {
            return fail(format!("invalid month: {s:?} (expected YYYY-MM)"));
        }
        let date = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")?;
        Month::new(date.year(), date.month())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DayCell {
    pub date: Date,
    pub studied: bool,
    pub completed: bool,
    pub is_today: bool,
}

/// A month laid out in Sunday-first weeks. `None` cells pad the first and
/// last weeks.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MonthGrid {
    pub month: Month,
    pub weeks: Vec<[Option<DayCell>; 7]>,
}

pub fn month_grid(month: Month, history: &History, today: Date) -> Fallible<MonthGrid> {
    let first = month.first_day()?;
    let lead = first.into_inner().weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<Option<DayCell>> = vec![None; lead];
    for day in 1..=month.days()? {
        let date = Date::from_ymd(month.year, month.month, day)?;
        let session = history.get(date);
        cells.push(Some(DayCell {
            date,
            studied: session.is_some(),
            completed: session.is_some_and(|s| s.completed()),
            is_today: date == today,
        }));
    }
    while cells.len() % 7 != 0 {
        cells.push(None);
    }
    let weeks = cells
        .chunks(7)
        .map(|week| {
            let mut row = [None; 7];
            row.copy_from_slice(week);
            row
        })
        .collect();
    Ok(MonthGrid { month, weeks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::session::StudySession;

    #[test]
    fn test_month_parse_and_display() -> Fallible<()> {
        let month: Month = "2024-05".parse()?;
        assert_eq!(month, Month::new(2024, 5)?);
        assert_eq!(month.to_string(), "2024-05");
        assert!("2024-5".parse::<Month>().is_err());
        assert!("2024-13".parse::<Month>().is_err());
        Ok(())
    }

    #[test]
    fn test_navigation_wraps_years() -> Fallible<()> {
        assert_eq!(Month::new(2024, 12)?.next(), Month::new(2025, 1)?);
        assert_eq!(Month::new(2024, 1)?.previous(), Month::new(2023, 12)?);
        Ok(())
    }

    #[test]
    fn test_days() -> Fallible<()> {
        assert_eq!(Month::new(2024, 2)?.days()?, 29);
        assert_eq!(Month::new(2023, 2)?.days()?, 28);
        assert_eq!(Month::new(2024, 12)?.days()?, 31);
        Ok(())
    }

    #[test]
    fn test_grid_layout() -> Fallible<()> {
        // May 2024 starts on a Wednesday.
        let today = Date::from_ymd(2024, 5, 15)?;
        let grid = month_grid(Month::new(2024, 5)?, &History::new(), today)?;
        assert_eq!(grid.weeks.len(), 5);
        assert!(grid.weeks[0][..3].iter().all(Option::is_none));
        assert_eq!(grid.weeks[0][3].map(|c| c.date.day()), Some(1));
        assert_eq!(grid.weeks[4][5].map(|c| c.date.day()), Some(31));
        assert_eq!(grid.weeks[4][6], None);
        let days: usize = grid.weeks.iter().flatten().flatten().count();
        assert_eq!(days, 31);
        Ok(())
    }

    #[test]
    fn test_grid_marks() -> Fallible<()> {
        let studied = Date::from_ymd(2024, 5, 1)?;
        let completed = Date::from_ymd(2024, 5, 2)?;
        let today = Date::from_ymd(2024, 5, 3)?;
        let history = History::new()
            .with_session(StudySession::new(studied, vec![]))
            .with_session(StudySession::new(completed, vec![]).complete(None));
        let grid = month_grid(Month::of(today), &history, today)?;
        let cells: Vec<DayCell> = grid.weeks.iter().flatten().flatten().copied().collect();
        assert!(cells[0].studied && !cells[0].completed);
        assert!(cells[1].studied && cells[1].completed);
        assert!(!cells[2].studied && cells[2].is_today);
        assert_eq!(cells.iter().filter(|c| c.is_today).count(), 1);
        Ok(())
    }
}
