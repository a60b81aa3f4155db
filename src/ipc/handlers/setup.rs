use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{workspace, workspace_mut};
use crate::ipc::types::{AppState, Request};
use crate::time::DayWindow;
use crate::workspace::DAY_WINDOW_KEY;
use serde_json::{json, Map, Value};

fn parse_hour(v: &Value, key: &str) -> Result<u32, String> {
    let n = v
        .as_u64()
        .ok_or_else(|| format!("{} must be an integer", key))?;
    if n > 23 {
        return Err(format!("{} must be between 0 and 23", key));
    }
    Ok(n as u32)
}

fn merge_day_window_patch(current: &mut DayWindow, patch: &Map<String, Value>) -> Result<(), String> {
    let mut next = *current;
    for (k, v) in patch {
        match k.as_str() {
            "startHour" => next.start_hour = parse_hour(v, k)?,
            "endHour" => next.end_hour = parse_hour(v, k)?,
            "hourUnit" => {
                next.hour_unit = v
                    .as_f64()
                    .filter(|u| u.is_finite() && *u > 0.0)
                    .ok_or("hourUnit must be a positive number")?;
            }
            _ => return Err(format!("unknown dayWindow field: {}", k)),
        }
    }
    if next.start_hour >= next.end_hour {
        return Err("startHour must be before endHour".to_string());
    }
    *current = next;
    Ok(())
}

fn handle_setup_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let ws = match workspace(state, req) {
        Ok(w) => w,
        Err(e) => return e,
    };
    ok(&req.id, json!({ "dayWindow": ws.day_window }))
}

fn handle_setup_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let ws = match workspace_mut(state, req) {
        Ok(w) => w,
        Err(e) => return e,
    };
    let Some(section) = req.params.get("section").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing section", None);
    };
    if section != "dayWindow" {
        return err(&req.id, "bad_params", "unknown section", None);
    }
    let Some(patch_obj) = req.params.get("patch").and_then(|v| v.as_object()) else {
        return err(&req.id, "bad_params", "patch must be an object", None);
    };

    let mut window = ws.day_window;
    if let Err(msg) = merge_day_window_patch(&mut window, patch_obj) {
        return err(&req.id, "bad_params", msg, None);
    }
    let value = json!(window);
    if let Err(e) = db::settings_set_json(&ws.conn, DAY_WINDOW_KEY, &value) {
        return err(&req.id, "db_update_failed", format!("{e:#}"), None);
    }
    ws.day_window = window;
    ok(&req.id, json!({ "dayWindow": value }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "setup.get" => Some(handle_setup_get(state, req)),
        "setup.update" => Some(handle_setup_update(state, req)),
        _ => None,
    }
}
