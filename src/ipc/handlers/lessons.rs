use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{
    mutation_json, parse_opt_price, parse_opt_string, parse_string_array, required_day,
    required_i64, required_object, required_str, workspace, workspace_mut,
};
use crate::ipc::types::{AppState, Request};
use crate::model::{Lesson, LessonDraft, LinkKind};
use crate::store::Mutation;
use crate::time::parse_hhmm;
use crate::validation::{dedupe_links, validate_lesson_times};
use serde_json::{json, Map, Value as JsonValue};

const DEFAULT_DRAFT_START: &str = "08:00";
const DEFAULT_DRAFT_END: &str = "09:00";

fn handle_lessons_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let ws = match workspace(state, req) {
        Ok(w) => w,
        Err(e) => return e,
    };
    let day = match required_day(req, "day") {
        Ok(v) => v,
        Err(e) => return e,
    };
    ok(
        &req.id,
        json!({ "day": day, "lessons": ws.lessons.lessons_for(&day) }),
    )
}

fn handle_lessons_all(state: &mut AppState, req: &Request) -> serde_json::Value {
    let ws = match workspace(state, req) {
        Ok(w) => w,
        Err(e) => return e,
    };
    ok(
        &req.id,
        json!({ "lessonsByDate": ws.lessons.snapshot_all() }),
    )
}

/// Absent or null falls back to `default`; anything else must be `HH:MM`.
fn optional_time(req: &Request, key: &str, default: &str) -> Result<String, serde_json::Value> {
    match req.params.get(key) {
        None => Ok(default.to_string()),
        Some(v) if v.is_null() => Ok(default.to_string()),
        Some(v) => v
            .as_str()
            .map(str::trim)
            .filter(|s| parse_hhmm(s).is_some())
            .map(str::to_string)
            .ok_or_else(|| err(&req.id, "bad_params", format!("{} must be HH:MM", key), None)),
    }
}

fn handle_lessons_draft(state: &mut AppState, req: &Request) -> serde_json::Value {
    let ws = match workspace(state, req) {
        Ok(w) => w,
        Err(e) => return e,
    };
    let student_id = match required_i64(req, "studentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let Some(student) = ws.students.get(student_id) else {
        return err(&req.id, "not_found", "unknown student", None);
    };
    let start = match optional_time(req, "start", DEFAULT_DRAFT_START) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let end = match optional_time(req, "end", DEFAULT_DRAFT_END) {
        Ok(v) => v,
        Err(e) => return e,
    };
    ok(
        &req.id,
        json!({ "draft": LessonDraft::for_student(student, &start, &end) }),
    )
}

fn str_field(input: &Map<String, JsonValue>, key: &str) -> Result<Option<String>, String> {
    match input.get(key) {
        None => Ok(None),
        Some(v) => parse_opt_string(v).map_err(|m| format!("{} {}", key, m)),
    }
}

fn bool_field(input: &Map<String, JsonValue>, key: &str) -> Result<bool, String> {
    match input.get(key) {
        None => Ok(false),
        Some(v) if v.is_null() => Ok(false),
        Some(v) => v.as_bool().ok_or_else(|| format!("{} must be boolean", key)),
    }
}

fn links_field(input: &Map<String, JsonValue>, key: &str) -> Result<Vec<String>, String> {
    match input.get(key) {
        None => Ok(Vec::new()),
        Some(v) => parse_string_array(v)
            .map(dedupe_links)
            .map_err(|m| format!("{} {}", key, m)),
    }
}

fn handle_lessons_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let ws = match workspace_mut(state, req) {
        Ok(w) => w,
        Err(e) => return e,
    };
    let day = match required_day(req, "day") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let input = match required_object(req, "input") {
        Ok(v) => v,
        Err(e) => return e,
    };

    let Some(student_id) = input.get("studentId").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "select a student", None);
    };
    let Some(student) = ws.students.get(student_id) else {
        return err(&req.id, "bad_params", "unknown student", None);
    };
    let start = input.get("start").and_then(|v| v.as_str()).unwrap_or("").trim();
    let end = input.get("end").and_then(|v| v.as_str()).unwrap_or("").trim();
    if let Err(msg) = validate_lesson_times(&ws.day_window, start, end) {
        return err(&req.id, "bad_params", msg, None);
    }

    let mut draft = LessonDraft::for_student(student, start, end);
    let parsed = (|| -> Result<(), String> {
        if let Some(v) = input.get("price") {
            draft.price = parse_opt_price(v).map_err(|m| format!("price {}", m))?;
        }
        if input.contains_key("notes") {
            draft.notes = str_field(input, "notes")?;
        }
        draft.title = str_field(input, "title")?;
        draft.topic = str_field(input, "topic")?;
        draft.work_notes = str_field(input, "workNotes")?;
        draft.homework = str_field(input, "homework")?;
        draft.is_paid = bool_field(input, "isPaid")?;
        draft.is_cancelled = bool_field(input, "isCancelled")?;
        draft.links = links_field(input, "links")?;
        draft.links_home = links_field(input, "linksHome")?;
        Ok(())
    })();
    if let Err(msg) = parsed {
        return err(&req.id, "bad_params", msg, None);
    }

    match ws.lessons.add(&ws.conn, &day, draft) {
        Ok(lesson) => ok(&req.id, json!({ "day": day, "lesson": lesson })),
        Err(e) => err(&req.id, "db_update_failed", format!("{e:#}"), None),
    }
}

fn apply_patch(
    lesson: &mut Lesson,
    patch: &Map<String, JsonValue>,
    student_name: impl Fn(i64) -> Option<String>,
) -> Result<(), String> {
    for (k, v) in patch {
        match k.as_str() {
            "start" | "end" => {
                let s = v
                    .as_str()
                    .ok_or_else(|| format!("patch.{} must be string", k))?
                    .trim()
                    .to_string();
                if k == "start" {
                    lesson.start = s;
                } else {
                    lesson.end = s;
                }
            }
            "studentId" => {
                let id = v
                    .as_i64()
                    .ok_or("patch.studentId must be integer")?;
                if lesson.student_id != Some(id) {
                    lesson.student_name = student_name(id).ok_or("unknown student")?;
                    lesson.student_id = Some(id);
                }
            }
            "price" => {
                lesson.price = parse_opt_price(v).map_err(|m| format!("patch.price {}", m))?;
            }
            "isPaid" | "isCancelled" => {
                let b = v
                    .as_bool()
                    .ok_or_else(|| format!("patch.{} must be boolean", k))?;
                if k == "isPaid" {
                    lesson.is_paid = b;
                } else {
                    lesson.is_cancelled = b;
                }
            }
            "title" | "notes" | "topic" | "workNotes" | "homework" => {
                let s = parse_opt_string(v).map_err(|m| format!("patch.{} {}", k, m))?;
                match k.as_str() {
                    "title" => lesson.title = s,
                    "notes" => lesson.notes = s,
                    "topic" => lesson.topic = s,
                    "workNotes" => lesson.work_notes = s,
                    _ => lesson.homework = s,
                }
            }
            "links" | "linksHome" => {
                let links = parse_string_array(v)
                    .map(dedupe_links)
                    .map_err(|m| format!("patch.{} {}", k, m))?;
                if k == "links" {
                    lesson.links = links;
                } else {
                    lesson.links_home = links;
                }
            }
            _ => return Err(format!("unknown patch field: {}", k)),
        }
    }
    Ok(())
}

fn handle_lessons_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let ws = match workspace_mut(state, req) {
        Ok(w) => w,
        Err(e) => return e,
    };
    let day = match required_day(req, "day") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let lesson_id = match required_i64(req, "lessonId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let patch = match required_object(req, "patch") {
        Ok(v) => v,
        Err(e) => return e,
    };

    let Some(existing) = ws.lessons.get(&day, lesson_id) else {
        return ok(&req.id, mutation_json(Mutation::NotFound));
    };
    let mut lesson = existing.clone();
    let students = &ws.students;
    if let Err(msg) = apply_patch(&mut lesson, patch, |id| {
        students.get(id).map(|s| s.name.clone())
    }) {
        return err(&req.id, "bad_params", msg, None);
    }
    if let Err(msg) = validate_lesson_times(&ws.day_window, &lesson.start, &lesson.end) {
        return err(&req.id, "bad_params", msg, None);
    }

    match ws.lessons.update(&ws.conn, &day, lesson) {
        Ok(m) => ok(&req.id, mutation_json(m)),
        Err(e) => err(&req.id, "db_update_failed", format!("{e:#}"), None),
    }
}

fn handle_lessons_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let ws = match workspace_mut(state, req) {
        Ok(w) => w,
        Err(e) => return e,
    };
    let day = match required_day(req, "day") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let lesson_id = match required_i64(req, "lessonId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match ws.lessons.delete(&ws.conn, &day, lesson_id) {
        Ok(m) => ok(&req.id, mutation_json(m)),
        Err(e) => err(&req.id, "db_update_failed", format!("{e:#}"), None),
    }
}

fn link_kind(req: &Request) -> Result<LinkKind, serde_json::Value> {
    let raw = required_str(req, "kind")?;
    LinkKind::parse(&raw).ok_or_else(|| {
        err(
            &req.id,
            "bad_params",
            "kind must be links or linksHome",
            None,
        )
    })
}

fn handle_lessons_edit_link(state: &mut AppState, req: &Request, add: bool) -> serde_json::Value {
    let ws = match workspace_mut(state, req) {
        Ok(w) => w,
        Err(e) => return e,
    };
    let day = match required_day(req, "day") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let lesson_id = match required_i64(req, "lessonId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let kind = match link_kind(req) {
        Ok(v) => v,
        Err(e) => return e,
    };

    let Some(existing) = ws.lessons.get(&day, lesson_id) else {
        return ok(&req.id, mutation_json(Mutation::NotFound));
    };
    let mut lesson = existing.clone();
    let edited = if add {
        let url = match required_str(req, "url") {
            Ok(v) => v,
            Err(e) => return e,
        };
        lesson.add_link(kind, &url)
    } else {
        let index = match required_i64(req, "index").map(usize::try_from) {
            Ok(Ok(v)) => v,
            Ok(Err(_)) => return err(&req.id, "bad_params", "index must be >= 0", None),
            Err(e) => return e,
        };
        lesson.remove_link(kind, index)
    };
    if !edited {
        return ok(&req.id, mutation_json(Mutation::NotFound));
    }

    match ws.lessons.update(&ws.conn, &day, lesson) {
        Ok(m) => ok(&req.id, mutation_json(m)),
        Err(e) => err(&req.id, "db_update_failed", format!("{e:#}"), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "lessons.list" => Some(handle_lessons_list(state, req)),
        "lessons.all" => Some(handle_lessons_all(state, req)),
        "lessons.draft" => Some(handle_lessons_draft(state, req)),
        "lessons.create" => Some(handle_lessons_create(state, req)),
        "lessons.update" => Some(handle_lessons_update(state, req)),
        "lessons.delete" => Some(handle_lessons_delete(state, req)),
        "lessons.addLink" => Some(handle_lessons_edit_link(state, req, true)),
        "lessons.removeLink" => Some(handle_lessons_edit_link(state, req, false)),
        _ => None,
    }
}
