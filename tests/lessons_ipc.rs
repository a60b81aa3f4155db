mod test_support;

use serde_json::json;
use std::io::BufReader;
use std::process::{ChildStdin, ChildStdout};
use test_support::{
    create_lesson, create_student, request_err, request_ok, select_workspace, spawn_sidecar,
    temp_dir,
};

const DAY: &str = "2026-03-02";

fn add_link(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    lesson_id: i64,
    kind: &str,
    url: &str,
) -> Option<bool> {
    let res = request_ok(
        stdin,
        reader,
        id,
        "lessons.addLink",
        json!({ "day": DAY, "lessonId": lesson_id, "kind": kind, "url": url }),
    );
    res["changed"].as_bool()
}

#[test]
fn lessons_create_prefills_from_student_and_validates_input() {
    let workspace = temp_dir("tutord-lessons-create");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    select_workspace(&mut stdin, &mut reader, &workspace);

    let ann = create_student(
        &mut stdin,
        &mut reader,
        "1",
        json!({ "name": "Ann", "defaultPrice": 450, "defaultNotes": "grammar" }),
    );

    let draft = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "lessons.draft",
        json!({ "studentId": ann }),
    );
    assert_eq!(draft["draft"]["price"], json!(450.0));
    assert_eq!(draft["draft"]["start"], json!("08:00"));

    let explicit = request_ok(
        &mut stdin,
        &mut reader,
        "2a",
        "lessons.draft",
        json!({ "studentId": ann, "start": "10:00", "end": "11:00" }),
    );
    assert_eq!(explicit["draft"]["start"], json!("10:00"));
    assert_eq!(explicit["draft"]["end"], json!("11:00"));
    for (i, params) in [
        json!({ "studentId": ann, "start": "9am" }),
        json!({ "studentId": ann, "end": 900 }),
        json!({ "studentId": ann, "start": "9:05" }),
    ]
    .into_iter()
    .enumerate()
    {
        let code = request_err(&mut stdin, &mut reader, &format!("draft-{}", i), "lessons.draft", params);
        assert_eq!(code, "bad_params");
    }

    let lesson = create_lesson(
        &mut stdin,
        &mut reader,
        "3",
        DAY,
        json!({ "studentId": ann, "start": "09:00", "end": "10:00" }),
    );
    assert_eq!(lesson["studentName"], json!("Ann"));
    assert_eq!(lesson["price"], json!(450.0));
    assert_eq!(lesson["notes"], json!("grammar"));
    assert_eq!(lesson["isPaid"], json!(false));
    assert_eq!(lesson["isCancelled"], json!(false));

    let no_student = request_err(
        &mut stdin,
        &mut reader,
        "4",
        "lessons.create",
        json!({ "day": DAY, "input": { "start": "09:00", "end": "10:00" } }),
    );
    assert_eq!(no_student, "bad_params");

    let bad_times = [
        ("10:00", "09:00"),
        ("07:00", "09:00"),
        ("21:30", "22:15"),
        ("9", "10:00"),
        ("9:05", "10:00"),
        ("+9:05", "10:00"),
        ("09:00", "9:30"),
    ];
    for (i, (start, end)) in bad_times.iter().enumerate() {
        let code = request_err(
            &mut stdin,
            &mut reader,
            &format!("bad-{}", i),
            "lessons.create",
            json!({ "day": DAY, "input": { "studentId": ann, "start": start, "end": end } }),
        );
        assert_eq!(code, "bad_params", "{}-{}", start, end);
    }

    let bad_day = request_err(
        &mut stdin,
        &mut reader,
        "5",
        "lessons.create",
        json!({ "day": "02.03.2026", "input": { "studentId": ann, "start": "09:00", "end": "10:00" } }),
    );
    assert_eq!(bad_day, "bad_params");

    let listed = request_ok(&mut stdin, &mut reader, "6", "lessons.list", json!({ "day": DAY }));
    assert_eq!(listed["lessons"].as_array().map(|a| a.len()), Some(1));

    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn lessons_update_delete_and_silent_noops() {
    let workspace = temp_dir("tutord-lessons-update");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    select_workspace(&mut stdin, &mut reader, &workspace);

    let ann = create_student(&mut stdin, &mut reader, "1", json!({ "name": "Ann", "defaultPrice": 300 }));
    let first = create_lesson(
        &mut stdin,
        &mut reader,
        "2",
        DAY,
        json!({ "studentId": ann, "start": "12:00", "end": "13:00" }),
    );
    let first_id = first["id"].as_i64().expect("id");
    let before = request_ok(&mut stdin, &mut reader, "3", "lessons.list", json!({ "day": DAY }));

    // add + delete restores the day
    let second = create_lesson(
        &mut stdin,
        &mut reader,
        "4",
        DAY,
        json!({ "studentId": ann, "start": "14:00", "end": "15:00", "links": ["https://a", "https://a"] }),
    );
    assert_eq!(second["links"], json!(["https://a"]));
    let second_id = second["id"].as_i64().expect("id");
    assert_ne!(first_id, second_id);
    let deleted = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "lessons.delete",
        json!({ "day": DAY, "lessonId": second_id }),
    );
    assert_eq!(deleted["changed"], json!(true));
    let after = request_ok(&mut stdin, &mut reader, "6", "lessons.list", json!({ "day": DAY }));
    assert_eq!(after["lessons"], before["lessons"]);

    // unknown ids are no-ops, not errors
    let missing = request_ok(
        &mut stdin,
        &mut reader,
        "7",
        "lessons.update",
        json!({ "day": DAY, "lessonId": first_id + 999, "patch": { "isPaid": true } }),
    );
    assert_eq!(missing["changed"], json!(false));
    let missing = request_ok(
        &mut stdin,
        &mut reader,
        "8",
        "lessons.delete",
        json!({ "day": "2026-03-03", "lessonId": first_id }),
    );
    assert_eq!(missing["changed"], json!(false));
    let unchanged = request_ok(&mut stdin, &mut reader, "9", "lessons.list", json!({ "day": DAY }));
    assert_eq!(unchanged["lessons"], before["lessons"]);

    // patch keeps the name snapshot and allows paid + cancelled together
    let updated = request_ok(
        &mut stdin,
        &mut reader,
        "10",
        "lessons.update",
        json!({
            "day": DAY,
            "lessonId": first_id,
            "patch": { "isPaid": true, "isCancelled": true, "topic": "Past simple", "homework": "Ex. 4" }
        }),
    );
    assert_eq!(updated["changed"], json!(true));
    let listed = request_ok(&mut stdin, &mut reader, "11", "lessons.list", json!({ "day": DAY }));
    let lesson = &listed["lessons"][0];
    assert_eq!(lesson["isPaid"], json!(true));
    assert_eq!(lesson["isCancelled"], json!(true));
    assert_eq!(lesson["topic"], json!("Past simple"));
    assert_eq!(lesson["studentName"], json!("Ann"));

    let bad_patch = request_err(
        &mut stdin,
        &mut reader,
        "12",
        "lessons.update",
        json!({ "day": DAY, "lessonId": first_id, "patch": { "end": "11:00" } }),
    );
    assert_eq!(bad_patch, "bad_params");
    let unpadded = request_err(
        &mut stdin,
        &mut reader,
        "13",
        "lessons.update",
        json!({ "day": DAY, "lessonId": first_id, "patch": { "start": "9:05" } }),
    );
    assert_eq!(unpadded, "bad_params");

    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn lesson_links_reject_duplicates_per_list() {
    let workspace = temp_dir("tutord-lessons-links");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    select_workspace(&mut stdin, &mut reader, &workspace);

    let ann = create_student(&mut stdin, &mut reader, "1", json!({ "name": "Ann" }));
    let lesson = create_lesson(
        &mut stdin,
        &mut reader,
        "2",
        DAY,
        json!({ "studentId": ann, "start": "09:00", "end": "10:00" }),
    );
    let lesson_id = lesson["id"].as_i64().expect("id");

    assert_eq!(add_link(&mut stdin, &mut reader, "3", lesson_id, "links", "https://docs.example/1"), Some(true));
    assert_eq!(add_link(&mut stdin, &mut reader, "4", lesson_id, "links", "https://docs.example/1"), Some(false));
    assert_eq!(add_link(&mut stdin, &mut reader, "5", lesson_id, "linksHome", "https://docs.example/1"), Some(true));

    let removed = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "lessons.removeLink",
        json!({ "day": DAY, "lessonId": lesson_id, "kind": "links", "index": 0 }),
    );
    assert_eq!(removed["changed"], json!(true));

    let listed = request_ok(&mut stdin, &mut reader, "7", "lessons.list", json!({ "day": DAY }));
    assert_eq!(listed["lessons"][0]["links"], json!([]));
    assert_eq!(listed["lessons"][0]["linksHome"], json!(["https://docs.example/1"]));

    let _ = std::fs::remove_dir_all(workspace);
}
