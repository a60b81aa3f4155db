use super::{load_collection, save_collection, IdSource, Mutation, STUDENTS_KEY};
use crate::db::KeyValue;
use crate::model::{Student, StudentDraft};
use tracing::debug;

/// Flat student list. Deleting a student never touches lessons that
/// reference it.
#[derive(Debug, Default)]
pub struct StudentStore {
    students: Vec<Student>,
    ids: IdSource,
}

impl StudentStore {
    pub fn load(kv: &dyn KeyValue) -> anyhow::Result<Self> {
        let students: Vec<Student> = load_collection(kv, STUDENTS_KEY)?;
        let max_id = students.iter().map(|s| s.id).max().unwrap_or(0);
        Ok(Self {
            students,
            ids: IdSource::seeded(max_id),
        })
    }

    pub fn list(&self) -> &[Student] {
        &self.students
    }

    pub fn get(&self, id: i64) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn add(&mut self, kv: &dyn KeyValue, draft: StudentDraft) -> anyhow::Result<Student> {
        let students = &self.students;
        let id = self.ids.next(|id| students.iter().any(|s| s.id == id));
        let student = draft.with_id(id);
        self.students.push(student.clone());
        debug!(id, "student added");
        self.persist(kv)?;
        Ok(student)
    }

    pub fn update(&mut self, kv: &dyn KeyValue, student: Student) -> anyhow::Result<Mutation> {
        let Some(slot) = self.students.iter_mut().find(|s| s.id == student.id) else {
            return Ok(Mutation::NotFound);
        };
        debug!(id = student.id, "student updated");
        *slot = student;
        self.persist(kv)?;
        Ok(Mutation::Applied)
    }

    pub fn delete(&mut self, kv: &dyn KeyValue, id: i64) -> anyhow::Result<Mutation> {
        let Some(pos) = self.students.iter().position(|s| s.id == id) else {
            return Ok(Mutation::NotFound);
        };
        self.students.remove(pos);
        debug!(id, "student deleted");
        self.persist(kv)?;
        Ok(Mutation::Applied)
    }

    fn persist(&self, kv: &dyn KeyValue) -> anyhow::Result<()> {
        save_collection(kv, STUDENTS_KEY, &self.students)
    }
}
