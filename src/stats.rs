use crate::calendar::{parse_day_key, StatsWindow};
use crate::model::{Lesson, Student};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStats {
    pub student_id: i64,
    pub name: String,
    pub lessons_count: usize,
    pub cancelled_count: usize,
    pub total_earned: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralStats {
    pub total_lessons: usize,
    pub cancelled_lessons: usize,
    pub paid_lessons: usize,
    pub total_earned: f64,
    pub unique_students: usize,
}

/// Cancelled lessons earn nothing; a missing price counts as zero.
fn earned(lesson: &Lesson) -> f64 {
    if lesson.is_cancelled {
        0.0
    } else {
        lesson.price.unwrap_or(0.0)
    }
}

fn lessons_in_window<'a>(
    lessons_by_day: &'a BTreeMap<String, Vec<Lesson>>,
    window: &'a StatsWindow,
) -> impl Iterator<Item = &'a Lesson> + 'a {
    lessons_by_day
        .iter()
        .filter(move |(day, _)| parse_day_key(day).is_some_and(|d| window.contains(d)))
        .flat_map(|(_, lessons)| lessons.iter())
}

/// One row per student, in store order. Lessons without a student or
/// pointing at a deleted one are not attributed.
pub fn per_student(
    students: &[Student],
    lessons_by_day: &BTreeMap<String, Vec<Lesson>>,
    window: &StatsWindow,
) -> Vec<StudentStats> {
    let mut rows: Vec<StudentStats> = students
        .iter()
        .map(|s| StudentStats {
            student_id: s.id,
            name: s.name.clone(),
            lessons_count: 0,
            cancelled_count: 0,
            total_earned: 0.0,
        })
        .collect();
    let index: HashMap<i64, usize> = students
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id, i))
        .collect();

    for lesson in lessons_in_window(lessons_by_day, window) {
        let Some(&i) = lesson.student_id.as_ref().and_then(|id| index.get(id)) else {
            continue;
        };
        let row = &mut rows[i];
        row.lessons_count += 1;
        if lesson.is_cancelled {
            row.cancelled_count += 1;
        }
        row.total_earned += earned(lesson);
    }
    rows
}

pub fn general(lessons_by_day: &BTreeMap<String, Vec<Lesson>>, window: &StatsWindow) -> GeneralStats {
    let mut stats = GeneralStats::default();
    let mut students = HashSet::new();
    for lesson in lessons_in_window(lessons_by_day, window) {
        stats.total_lessons += 1;
        if lesson.is_cancelled {
            stats.cancelled_lessons += 1;
        }
        if lesson.is_paid {
            stats.paid_lessons += 1;
        }
        stats.total_earned += earned(lesson);
        if let Some(id) = lesson.student_id {
            students.insert(id);
        }
    }
    stats.unique_students = students.len();
    stats
}
