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

use chrono::DateTime;
use chrono::Datelike;
use chrono::FixedOffset;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as _;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

const DATE_FORMAT: &str = "%Y-%m-%d";

const WEEKDAYS_KO: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// A calendar date. Its text form, `YYYY-MM-DD`, is the key of a study
/// session in the history.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Date(NaiveDate);

impl Date {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Fallible<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| ErrorReport::new(format!("invalid date: {year}-{month}-{day}")))
    }

    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Today's date at the given offset.
    pub fn today(offset: UtcOffset) -> Self {
        Self::at(Utc::now(), offset)
    }

    /// The date of the instant `now` as seen at `offset`.
    pub fn at(now: DateTime<Utc>, offset: UtcOffset) -> Self {
        Self(now.with_timezone(&offset.into_inner()).date_naive())
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// Long Korean form, e.g. `2024년 5월 1일 (수)`.
    pub fn format_long(self) -> String {
        let weekday = WEEKDAYS_KO[self.0.weekday().num_days_from_sunday() as usize];
        format!(
            "{}년 {}월 {}일 ({})",
            self.0.year(),
            self.0.month(),
            self.0.day(),
            weekday
        )
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for Date {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono accepts unpadded fields, the key format does not.
        if s.len() != 10 {
            return fail(format!("invalid date key: {s:?} (expected YYYY-MM-DD)"));
        }
        let date = NaiveDate::parse_from_str(s, DATE_FORMAT)?;
        Ok(Self(date))
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        string.parse().map_err(D::Error::custom)
    }
}

/// The single UTC offset every date in the application is derived with.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct UtcOffset(FixedOffset);

impl UtcOffset {
    pub fn from_hours(hours: i32) -> Fallible<Self> {
        if !(-12..=14).contains(&hours) {
            return fail(format!("UTC offset out of range: {hours} hours"));
        }
        FixedOffset::east_opt(hours * 3600)
            .map(Self)
            .ok_or_else(|| ErrorReport::new(format!("invalid UTC offset: {hours} hours")))
    }

    pub fn into_inner(self) -> FixedOffset {
        self.0
    }
}
