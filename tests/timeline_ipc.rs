mod test_support;

use serde_json::json;
use test_support::{create_lesson, create_student, request_ok, select_workspace, spawn_sidecar, temp_dir};

#[test]
fn timeline_day_places_lessons_and_breaks() {
    let workspace = temp_dir("tutord-timeline-day");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    select_workspace(&mut stdin, &mut reader, &workspace);

    let ann = create_student(&mut stdin, &mut reader, "1", json!({ "name": "Ann" }));
    let day = "2026-04-07";
    // inserted out of order on purpose
    let _ = create_lesson(&mut stdin, &mut reader, "2", day, json!({ "studentId": ann, "start": "10:30", "end": "11:00" }));
    let _ = create_lesson(&mut stdin, &mut reader, "3", day, json!({ "studentId": ann, "start": "09:00", "end": "10:00" }));

    let listed = request_ok(&mut stdin, &mut reader, "4", "lessons.list", json!({ "day": day }));
    assert_eq!(listed["lessons"][0]["start"], json!("10:30"));

    let tl = request_ok(&mut stdin, &mut reader, "5", "timeline.day", json!({ "day": day }));
    let lessons = tl["lessons"].as_array().expect("lessons");
    assert_eq!(lessons.len(), 2);
    assert_eq!(lessons[0]["lesson"]["start"], json!("09:00"));
    assert_eq!(lessons[0]["top"], json!(40.0));
    assert_eq!(lessons[0]["height"], json!(40.0));

    let breaks = tl["breaks"].as_array().expect("breaks");
    assert_eq!(breaks.len(), 1);
    assert_eq!(
        breaks[0]["break"],
        json!({ "start": "10:00", "end": "10:30", "durationMinutes": 30 })
    );
    assert_eq!(breaks[0]["top"], json!(80.0));
    assert_eq!(breaks[0]["height"], json!(20.0));
    assert_eq!(tl["hours"].as_array().map(|a| a.len()), Some(15));

    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn overlapping_lessons_produce_no_breaks() {
    let workspace = temp_dir("tutord-timeline-overlap");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    select_workspace(&mut stdin, &mut reader, &workspace);

    let ann = create_student(&mut stdin, &mut reader, "1", json!({ "name": "Ann" }));
    let day = "2026-04-08";
    let _ = create_lesson(&mut stdin, &mut reader, "2", day, json!({ "studentId": ann, "start": "09:00", "end": "10:00" }));
    let _ = create_lesson(&mut stdin, &mut reader, "3", day, json!({ "studentId": ann, "start": "09:30", "end": "11:00" }));

    let tl = request_ok(&mut stdin, &mut reader, "4", "timeline.day", json!({ "day": day }));
    assert_eq!(tl["lessons"].as_array().map(|a| a.len()), Some(2));
    assert_eq!(tl["breaks"], json!([]));

    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn visible_days_and_day_window_setup() {
    let workspace = temp_dir("tutord-timeline-days");
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let days = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "timeline.visibleDays",
        json!({ "center": "2026-01-01" }),
    );
    let keys: Vec<&str> = days["days"]
        .as_array()
        .expect("days")
        .iter()
        .filter_map(|d| d["day"].as_str())
        .collect();
    assert_eq!(keys, vec!["2025-12-31", "2026-01-01", "2026-01-02", "2026-01-03"]);

    select_workspace(&mut stdin, &mut reader, &workspace);
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "setup.update",
        json!({ "section": "dayWindow", "patch": { "startHour": 7, "hourUnit": 60 } }),
    );
    let ann = create_student(&mut stdin, &mut reader, "3", json!({ "name": "Ann" }));
    let _ = create_lesson(&mut stdin, &mut reader, "4", "2026-04-09", json!({ "studentId": ann, "start": "07:30", "end": "08:00" }));
    let tl = request_ok(&mut stdin, &mut reader, "5", "timeline.day", json!({ "day": "2026-04-09" }));
    assert_eq!(tl["lessons"][0]["top"], json!(30.0));
    assert_eq!(tl["dayWindow"]["startHour"], json!(7));

    let _ = std::fs::remove_dir_all(workspace);
}
