use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{mutation_json, required_i64, workspace, workspace_mut};
use crate::ipc::types::{AppState, Request};
use crate::model::{Student, StudentDraft};
use crate::validation::normalize_student;
use serde_json::json;

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let ws = match workspace(state, req) {
        Ok(w) => w,
        Err(e) => return e,
    };
    ok(&req.id, json!({ "students": ws.students.list() }))
}

fn handle_students_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let ws = match workspace_mut(state, req) {
        Ok(w) => w,
        Err(e) => return e,
    };
    let Some(input) = req.params.get("input") else {
        return err(&req.id, "bad_params", "missing input", None);
    };
    let draft: StudentDraft = match serde_json::from_value(input.clone()) {
        Ok(d) => d,
        Err(e) => return err(&req.id, "bad_params", format!("invalid input: {}", e), None),
    };
    let draft = match normalize_student(draft) {
        Ok(d) => d,
        Err(msg) => return err(&req.id, "bad_params", msg, None),
    };
    match ws.students.add(&ws.conn, draft) {
        Ok(student) => ok(&req.id, json!({ "student": student })),
        Err(e) => err(&req.id, "db_update_failed", format!("{e:#}"), None),
    }
}

fn handle_students_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let ws = match workspace_mut(state, req) {
        Ok(w) => w,
        Err(e) => return e,
    };
    let Some(raw) = req.params.get("student") else {
        return err(&req.id, "bad_params", "missing student", None);
    };
    let student: Student = match serde_json::from_value(raw.clone()) {
        Ok(s) => s,
        Err(e) => return err(&req.id, "bad_params", format!("invalid student: {}", e), None),
    };
    let id = student.id;
    let draft = StudentDraft {
        name: student.name,
        default_price: student.default_price,
        default_notes: student.default_notes,
        phone: student.phone,
        birthday: student.birthday,
    };
    let student = match normalize_student(draft) {
        Ok(d) => d.with_id(id),
        Err(msg) => return err(&req.id, "bad_params", msg, None),
    };
    match ws.students.update(&ws.conn, student) {
        Ok(m) => ok(&req.id, mutation_json(m)),
        Err(e) => err(&req.id, "db_update_failed", format!("{e:#}"), None),
    }
}

fn handle_students_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let ws = match workspace_mut(state, req) {
        Ok(w) => w,
        Err(e) => return e,
    };
    let student_id = match required_i64(req, "studentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match ws.students.delete(&ws.conn, student_id) {
        Ok(m) => ok(&req.id, mutation_json(m)),
        Err(e) => err(&req.id, "db_update_failed", format!("{e:#}"), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "students.create" => Some(handle_students_create(state, req)),
        "students.update" => Some(handle_students_update(state, req)),
        "students.delete" => Some(handle_students_delete(state, req)),
        _ => None,
    }
}
