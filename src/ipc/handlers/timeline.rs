use crate::breaks::calculate_breaks;
use crate::calendar::{visible_days, DEFAULT_VISIBLE_DAYS};
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{optional_date, required_day, today, workspace};
use crate::ipc::types::{AppState, Request};
use crate::model::Lesson;
use crate::time::{duration_to_position, hour_marks, time_to_position};
use serde_json::json;

const MAX_VISIBLE_DAYS: u64 = 31;

/// Lessons of one day sorted by start, with their placement in the day
/// column, plus the breaks between them.
fn handle_timeline_day(state: &mut AppState, req: &Request) -> serde_json::Value {
    let ws = match workspace(state, req) {
        Ok(w) => w,
        Err(e) => return e,
    };
    let day = match required_day(req, "day") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let window = &ws.day_window;
    let lessons = ws.lessons.lessons_for(&day);

    let mut sorted: Vec<&Lesson> = lessons.iter().collect();
    sorted.sort_by(|a, b| a.start.cmp(&b.start));
    let blocks: Vec<serde_json::Value> = sorted
        .into_iter()
        .map(|l| {
            json!({
                "lesson": l,
                "top": time_to_position(window, &l.start),
                "height": duration_to_position(window, &l.start, &l.end),
            })
        })
        .collect();
    let breaks: Vec<serde_json::Value> = calculate_breaks(lessons)
        .into_iter()
        .map(|b| {
            json!({
                "top": time_to_position(window, &b.start),
                "height": duration_to_position(window, &b.start, &b.end),
                "break": b,
            })
        })
        .collect();

    ok(
        &req.id,
        json!({
            "day": day,
            "dayWindow": window,
            "hours": hour_marks(window),
            "lessons": blocks,
            "breaks": breaks,
        }),
    )
}

fn handle_timeline_visible_days(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let center = match optional_date(req, "center") {
        Ok(v) => v.unwrap_or_else(today),
        Err(e) => return e,
    };
    let count = match req.params.get("count").and_then(|v| v.as_u64()) {
        None => DEFAULT_VISIBLE_DAYS,
        Some(n) if (1..=MAX_VISIBLE_DAYS).contains(&n) => n as usize,
        Some(_) => {
            return err(
                &req.id,
                "bad_params",
                format!("count must be between 1 and {}", MAX_VISIBLE_DAYS),
                None,
            )
        }
    };
    ok(&req.id, json!({ "days": visible_days(center, count) }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "timeline.day" => Some(handle_timeline_day(state, req)),
        "timeline.visibleDays" => Some(handle_timeline_visible_days(state, req)),
        _ => None,
    }
}
