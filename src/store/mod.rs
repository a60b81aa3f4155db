mod lessons;
mod students;

pub use lessons::LessonStore;
pub use students::StudentStore;

use crate::db::KeyValue;
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

pub const STUDENTS_KEY: &str = "students";
pub const LESSONS_KEY: &str = "lessonsByDate";

/// Outcome of an update or delete. Both variants are success; `NotFound`
/// means nothing matched and nothing was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    NotFound,
}

impl Mutation {
    pub fn changed(self) -> bool {
        self == Mutation::Applied
    }
}

/// Timestamp-derived ids, strictly increasing within the process.
#[derive(Debug, Default)]
struct IdSource {
    last: i64,
}

impl IdSource {
    fn seeded(max_existing: i64) -> Self {
        Self { last: max_existing }
    }

    fn next(&mut self, taken: impl Fn(i64) -> bool) -> i64 {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        let mut id = now_ms.max(self.last.saturating_add(1));
        while taken(id) {
            id = id.saturating_add(1);
        }
        self.last = id;
        id
    }
}

/// Reads a whole collection; missing or unparsable data loads as empty.
fn load_collection<T>(kv: &dyn KeyValue, key: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = kv.get(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(v) => Ok(v),
        Err(e) => {
            warn!(key, error = %e, "stored collection is not valid JSON, starting empty");
            Ok(T::default())
        }
    }
}

fn save_collection<T: Serialize>(kv: &dyn KeyValue, key: &str, value: &T) -> anyhow::Result<()> {
    let raw = serde_json::to_string(value).with_context(|| format!("failed to serialize {}", key))?;
    kv.set(key, &raw)
}
