use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_VISIBLE_DAYS: usize = 4;

pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

pub fn parse_day_key(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DAY_KEY_FORMAT).ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleDay {
    pub day: String,
    pub label: String,
    pub is_center: bool,
}

/// Rolling strip of `count` days starting the day before `center`.
pub fn visible_days(center: NaiveDate, count: usize) -> Vec<VisibleDay> {
    let Some(first) = center.checked_sub_days(Days::new(1)) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take(count)
        .map(|d| VisibleDay {
            day: day_key(d),
            label: d.format("%-d %B, %A").to_string(),
            is_center: d == center,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowMode {
    Week,
    Month,
}

impl WindowMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }
}

/// Week (Monday-start) or calendar-month date range, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsWindow {
    pub mode: WindowMode,
    start: NaiveDate,
}

impl StatsWindow {
    pub fn containing(mode: WindowMode, anchor: NaiveDate) -> Self {
        let start = match mode {
            WindowMode::Week => {
                let back = u64::from(anchor.weekday().num_days_from_monday());
                anchor.checked_sub_days(Days::new(back)).unwrap_or(anchor)
            }
            WindowMode::Month => anchor.with_day(1).unwrap_or(anchor),
        };
        Self { mode, start }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        let end = match self.mode {
            WindowMode::Week => self.start.checked_add_days(Days::new(6)),
            WindowMode::Month => self
                .start
                .checked_add_months(Months::new(1))
                .and_then(|d| d.pred_opt()),
        };
        end.unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    /// Moves the window by `steps` weeks or months. `None` only when the
    /// result leaves the representable date range.
    pub fn shift(&self, steps: i64) -> Option<Self> {
        let start = match self.mode {
            WindowMode::Week => {
                let days = Days::new(steps.unsigned_abs().checked_mul(7)?);
                if steps >= 0 {
                    self.start.checked_add_days(days)?
                } else {
                    self.start.checked_sub_days(days)?
                }
            }
            WindowMode::Month => {
                let months = Months::new(u32::try_from(steps.unsigned_abs()).ok()?);
                if steps >= 0 {
                    self.start.checked_add_months(months)?
                } else {
                    self.start.checked_sub_months(months)?
                }
            }
        };
        Some(Self {
            mode: self.mode,
            start,
        })
    }

    pub fn label(&self) -> String {
        match self.mode {
            WindowMode::Week => format!(
                "{} – {}",
                self.start.format("%d %b"),
                self.end().format("%d %b %Y")
            ),
            WindowMode::Month => self.start.format("%B %Y").to_string(),
        }
    }
}
