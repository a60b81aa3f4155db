use super::{load_collection, save_collection, IdSource, Mutation, LESSONS_KEY};
use crate::db::KeyValue;
use crate::model::{Lesson, LessonDraft};
use std::collections::BTreeMap;
use tracing::debug;

/// Lessons bucketed by day key, each bucket in insertion order.
///
/// The store performs no validation; callers check times and students
/// before handing data in. Every applied mutation rewrites the whole map.
#[derive(Debug, Default)]
pub struct LessonStore {
    by_day: BTreeMap<String, Vec<Lesson>>,
    ids: IdSource,
}

impl LessonStore {
    pub fn load(kv: &dyn KeyValue) -> anyhow::Result<Self> {
        let by_day: BTreeMap<String, Vec<Lesson>> = load_collection(kv, LESSONS_KEY)?;
        let max_id = by_day
            .values()
            .flatten()
            .map(|l| l.id)
            .max()
            .unwrap_or(0);
        Ok(Self {
            by_day,
            ids: IdSource::seeded(max_id),
        })
    }

    pub fn lessons_for(&self, day: &str) -> &[Lesson] {
        self.by_day.get(day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, day: &str, id: i64) -> Option<&Lesson> {
        self.lessons_for(day).iter().find(|l| l.id == id)
    }

    pub fn snapshot_all(&self) -> &BTreeMap<String, Vec<Lesson>> {
        &self.by_day
    }

    pub fn add(&mut self, kv: &dyn KeyValue, day: &str, draft: LessonDraft) -> anyhow::Result<Lesson> {
        let bucket = self.by_day.entry(day.to_string()).or_default();
        let id = self.ids.next(|id| bucket.iter().any(|l| l.id == id));
        let lesson = draft.with_id(id);
        bucket.push(lesson.clone());
        debug!(day, id, "lesson added");
        self.persist(kv)?;
        Ok(lesson)
    }

    pub fn update(&mut self, kv: &dyn KeyValue, day: &str, lesson: Lesson) -> anyhow::Result<Mutation> {
        let Some(slot) = self
            .by_day
            .get_mut(day)
            .and_then(|bucket| bucket.iter_mut().find(|l| l.id == lesson.id))
        else {
            return Ok(Mutation::NotFound);
        };
        debug!(day, id = lesson.id, "lesson updated");
        *slot = lesson;
        self.persist(kv)?;
        Ok(Mutation::Applied)
    }

    pub fn delete(&mut self, kv: &dyn KeyValue, day: &str, id: i64) -> anyhow::Result<Mutation> {
        let Some(bucket) = self.by_day.get_mut(day) else {
            return Ok(Mutation::NotFound);
        };
        let Some(pos) = bucket.iter().position(|l| l.id == id) else {
            return Ok(Mutation::NotFound);
        };
        bucket.remove(pos);
        if bucket.is_empty() {
            self.by_day.remove(day);
        }
        debug!(day, id, "lesson deleted");
        self.persist(kv)?;
        Ok(Mutation::Applied)
    }

    fn persist(&self, kv: &dyn KeyValue) -> anyhow::Result<()> {
        save_collection(kv, LESSONS_KEY, &self.by_day)
    }
}
