use crate::calendar::{day_key, parse_day_key, StatsWindow, WindowMode};
use crate::ipc::error::err;
use crate::ipc::types::{AppState, Request};
use crate::store::Mutation;
use crate::workspace::Workspace;
use chrono::{Local, NaiveDate};
use serde_json::{json, Value as JsonValue};

pub fn workspace<'a>(state: &'a AppState, req: &Request) -> Result<&'a Workspace, JsonValue> {
    state
        .workspace
        .as_ref()
        .ok_or_else(|| err(&req.id, "no_workspace", "select a workspace first", None))
}

pub fn workspace_mut<'a>(
    state: &'a mut AppState,
    req: &Request,
) -> Result<&'a mut Workspace, JsonValue> {
    state
        .workspace
        .as_mut()
        .ok_or_else(|| err(&req.id, "no_workspace", "select a workspace first", None))
}

pub fn required_str(req: &Request, key: &str) -> Result<String, JsonValue> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

pub fn required_i64(req: &Request, key: &str) -> Result<i64, JsonValue> {
    req.params
        .get(key)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

pub fn required_object<'a>(
    req: &'a Request,
    key: &str,
) -> Result<&'a serde_json::Map<String, JsonValue>, JsonValue> {
    req.params
        .get(key)
        .and_then(|v| v.as_object())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

/// Day key in canonical `yyyy-MM-dd` form.
pub fn required_day(req: &Request, key: &str) -> Result<String, JsonValue> {
    let raw = required_str(req, key)?;
    parse_day_key(&raw).map(day_key).ok_or_else(|| {
        err(
            &req.id,
            "bad_params",
            format!("{} must be yyyy-MM-dd", key),
            None,
        )
    })
}

pub fn optional_date(req: &Request, key: &str) -> Result<Option<NaiveDate>, JsonValue> {
    match req.params.get(key) {
        None => Ok(None),
        Some(v) if v.is_null() => Ok(None),
        Some(v) => v
            .as_str()
            .and_then(parse_day_key)
            .map(Some)
            .ok_or_else(|| {
                err(
                    &req.id,
                    "bad_params",
                    format!("{} must be yyyy-MM-dd", key),
                    None,
                )
            }),
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `{mode, anchor?, shift?}`; anchor defaults to today.
pub fn stats_window(req: &Request) -> Result<StatsWindow, JsonValue> {
    let mode_raw = required_str(req, "mode")?;
    let Some(mode) = WindowMode::parse(&mode_raw) else {
        return Err(err(
            &req.id,
            "bad_params",
            "mode must be week or month",
            None,
        ));
    };
    let anchor = optional_date(req, "anchor")?.unwrap_or_else(today);
    let shift = match req.params.get("shift") {
        None => 0,
        Some(v) if v.is_null() => 0,
        Some(v) => v
            .as_i64()
            .ok_or_else(|| err(&req.id, "bad_params", "shift must be integer", None))?,
    };
    StatsWindow::containing(mode, anchor)
        .shift(shift)
        .ok_or_else(|| err(&req.id, "bad_params", "shift leaves the supported date range", None))
}

pub fn window_json(window: &StatsWindow) -> JsonValue {
    json!({
        "mode": window.mode,
        "start": day_key(window.start()),
        "end": day_key(window.end()),
        "label": window.label(),
    })
}

pub fn mutation_json(m: Mutation) -> JsonValue {
    json!({ "changed": m.changed() })
}

pub fn parse_opt_string(v: &JsonValue) -> Result<Option<String>, &'static str> {
    if v.is_null() {
        return Ok(None);
    }
    let s = v.as_str().ok_or("must be string or null")?.trim().to_string();
    if s.is_empty() {
        Ok(None)
    } else {
        Ok(Some(s))
    }
}

pub fn parse_opt_price(v: &JsonValue) -> Result<Option<f64>, &'static str> {
    if v.is_null() {
        return Ok(None);
    }
    match v.as_f64() {
        Some(p) if p.is_finite() && p >= 0.0 => Ok(Some(p)),
        _ => Err("must be a non-negative number or null"),
    }
}

pub fn parse_string_array(v: &JsonValue) -> Result<Vec<String>, &'static str> {
    if v.is_null() {
        return Ok(Vec::new());
    }
    let arr = v.as_array().ok_or("must be array of strings")?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        out.push(item.as_str().ok_or("must be array of strings")?.to_string());
    }
    Ok(out)
}
