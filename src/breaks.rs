use crate::model::{Break, Lesson};
use crate::time::to_minutes;

/// Idle intervals between chronologically adjacent lessons of one day.
/// Overlapping and back-to-back lessons yield nothing.
pub fn calculate_breaks(lessons: &[Lesson]) -> Vec<Break> {
    if lessons.len() < 2 {
        return Vec::new();
    }

    let mut sorted: Vec<&Lesson> = lessons.iter().collect();
    sorted.sort_by(|a, b| a.start.cmp(&b.start));

    let mut out = Vec::new();
    for pair in sorted.windows(2) {
        let (cur, next) = (pair[0], pair[1]);
        let (Some(cur_end), Some(next_start)) = (to_minutes(&cur.end), to_minutes(&next.start))
        else {
            continue;
        };
        let gap = next_start - cur_end;
        if gap > 0 {
            out.push(Break {
                start: cur.end.clone(),
                end: next.start.clone(),
                duration_minutes: gap,
            });
        }
    }
    out
}
