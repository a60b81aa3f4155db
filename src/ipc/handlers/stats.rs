use crate::ipc::error::ok;
use crate::ipc::helpers::{stats_window, window_json, workspace};
use crate::ipc::types::{AppState, Request};
use crate::stats::{general, per_student};
use serde_json::json;

fn handle_stats_window(_state: &mut AppState, req: &Request) -> serde_json::Value {
    match stats_window(req) {
        Ok(w) => ok(&req.id, json!({ "window": window_json(&w) })),
        Err(e) => e,
    }
}

fn handle_stats_students(state: &mut AppState, req: &Request) -> serde_json::Value {
    let ws = match workspace(state, req) {
        Ok(w) => w,
        Err(e) => return e,
    };
    let window = match stats_window(req) {
        Ok(w) => w,
        Err(e) => return e,
    };
    let rows = per_student(ws.students.list(), ws.lessons.snapshot_all(), &window);
    ok(
        &req.id,
        json!({ "window": window_json(&window), "students": rows }),
    )
}

fn handle_stats_general(state: &mut AppState, req: &Request) -> serde_json::Value {
    let ws = match workspace(state, req) {
        Ok(w) => w,
        Err(e) => return e,
    };
    let window = match stats_window(req) {
        Ok(w) => w,
        Err(e) => return e,
    };
    let stats = general(ws.lessons.snapshot_all(), &window);
    ok(
        &req.id,
        json!({ "window": window_json(&window), "stats": stats }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "stats.window" => Some(handle_stats_window(state, req)),
        "stats.students" => Some(handle_stats_students(state, req)),
        "stats.general" => Some(handle_stats_general(state, req)),
        _ => None,
    }
}
