//! Input checks applied at the protocol boundary, before any store call.

use crate::model::StudentDraft;
use crate::time::{is_end_in_window, is_start_in_window, to_minutes, DayWindow};

pub fn validate_lesson_times(window: &DayWindow, start: &str, end: &str) -> Result<(), String> {
    let (Some(s), Some(e)) = (to_minutes(start), to_minutes(end)) else {
        return Err("times must be HH:MM".to_string());
    };
    if s >= e {
        return Err("start time must be before end time".to_string());
    }
    if !is_start_in_window(window, start) {
        return Err(format!(
            "lesson must start at {:02}:00 or later",
            window.start_hour
        ));
    }
    if !is_end_in_window(window, end) {
        return Err(format!(
            "lesson must end by {:02}:00",
            window.end_hour
        ));
    }
    Ok(())
}

pub fn validate_price(price: Option<f64>) -> Result<(), String> {
    match price {
        Some(p) if !p.is_finite() || p < 0.0 => Err("price must be a non-negative number".to_string()),
        _ => Ok(()),
    }
}

/// Trims text fields and rejects a blank name or a negative default price.
pub fn normalize_student(mut draft: StudentDraft) -> Result<StudentDraft, String> {
    draft.name = draft.name.trim().to_string();
    if draft.name.is_empty() {
        return Err("name must not be empty".to_string());
    }
    validate_price(Some(draft.default_price))
        .map_err(|_| "defaultPrice must be a non-negative number".to_string())?;
    draft.default_notes = non_blank(draft.default_notes);
    draft.phone = non_blank(draft.phone);
    draft.birthday = non_blank(draft.birthday);
    Ok(draft)
}

pub fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Trimmed, non-empty, first occurrence wins.
pub fn dedupe_links(links: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(links.len());
    for link in links {
        let link = link.trim();
        if !link.is_empty() && !out.iter().any(|l| l == link) {
            out.push(link.to_string());
        }
    }
    out
}
