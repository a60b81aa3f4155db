use serde::{Deserialize, Serialize};

pub const DAY_START_HOUR: u32 = 8;
pub const DAY_END_HOUR: u32 = 22;
/// Vertical units per hour of the day column.
pub const HOUR_UNIT: f64 = 40.0;

/// Visible part of a day and the linear scale used to place lessons in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayWindow {
    pub start_hour: u32,
    pub end_hour: u32,
    pub hour_unit: f64,
}

impl Default for DayWindow {
    fn default() -> Self {
        Self {
            start_hour: DAY_START_HOUR,
            end_hour: DAY_END_HOUR,
            hour_unit: HOUR_UNIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourMark {
    pub label: String,
    pub position: f64,
}

/// Parses a zero-padded wall-clock `"HH:MM"` string into `(hours, minutes)`.
/// Stored times must stay fixed-width so that string order is time order.
pub fn parse_hhmm(s: &str) -> Option<(u32, u32)> {
    let (h, m) = s.trim().split_once(':')?;
    if h.len() != 2 || m.len() != 2 {
        return None;
    }
    if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: u32 = h.parse().ok()?;
    let minutes: u32 = m.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some((hours, minutes))
}

pub fn to_minutes(s: &str) -> Option<i64> {
    let (h, m) = parse_hhmm(s)?;
    Some(i64::from(h) * 60 + i64::from(m))
}

fn fractional_hours(s: &str) -> Option<f64> {
    let (h, m) = parse_hhmm(s)?;
    Some(f64::from(h) + f64::from(m) / 60.0)
}

/// Offset of `time` from the top of the day window.
pub fn time_to_position(window: &DayWindow, time: &str) -> Option<f64> {
    let hours = fractional_hours(time)?;
    Some((hours - f64::from(window.start_hour)) * window.hour_unit)
}

/// Signed length between two times. Not clamped: `end < start` yields a
/// negative value.
pub fn duration_to_position(window: &DayWindow, start: &str, end: &str) -> Option<f64> {
    let s = fractional_hours(start)?;
    let e = fractional_hours(end)?;
    Some((e - s) * window.hour_unit)
}

pub fn is_start_in_window(window: &DayWindow, time: &str) -> bool {
    match parse_hhmm(time) {
        Some((h, _)) => h >= window.start_hour && h <= window.end_hour,
        None => false,
    }
}

pub fn is_end_in_window(window: &DayWindow, time: &str) -> bool {
    match parse_hhmm(time) {
        Some((h, m)) => {
            if h < window.start_hour || h > window.end_hour {
                return false;
            }
            !(h == window.end_hour && m > 0)
        }
        None => false,
    }
}

pub fn hour_marks(window: &DayWindow) -> Vec<HourMark> {
    (window.start_hour..=window.end_hour)
        .map(|h| HourMark {
            label: format!("{:02}:00", h),
            position: f64::from(h - window.start_hour) * window.hour_unit,
        })
        .collect()
}
