use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub default_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    pub name: String,
    #[serde(default)]
    pub default_price: f64,
    #[serde(default)]
    pub default_notes: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
}

impl StudentDraft {
    pub fn with_id(self, id: i64) -> Student {
        Student {
            id,
            name: self.name,
            default_price: self.default_price,
            default_notes: self.default_notes,
            phone: self.phone,
            birthday: self.birthday,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Materials used during the lesson.
    Lesson,
    /// Materials attached to the homework.
    Home,
}

impl LinkKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "links" | "lesson" => Some(Self::Lesson),
            "linksHome" | "home" => Some(Self::Home),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: i64,
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub student_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub is_cancelled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homework: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub links_home: Vec<String>,
}

impl Lesson {
    fn links_mut(&mut self, kind: LinkKind) -> &mut Vec<String> {
        match kind {
            LinkKind::Lesson => &mut self.links,
            LinkKind::Home => &mut self.links_home,
        }
    }

    /// Appends `url` unless it is blank or already present in that list.
    pub fn add_link(&mut self, kind: LinkKind, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() {
            return false;
        }
        let links = self.links_mut(kind);
        if links.iter().any(|l| l == url) {
            return false;
        }
        links.push(url.to_string());
        true
    }

    pub fn remove_link(&mut self, kind: LinkKind, index: usize) -> bool {
        let links = self.links_mut(kind);
        if index >= links.len() {
            return false;
        }
        links.remove(index);
        true
    }
}

/// A lesson before the store assigns it an id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonDraft {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub is_cancelled: bool,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub work_notes: Option<String>,
    #[serde(default)]
    pub homework: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub links_home: Vec<String>,
}

impl LessonDraft {
    /// New lesson prefilled from the student's defaults.
    pub fn for_student(student: &Student, start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
            student_id: Some(student.id),
            student_name: student.name.clone(),
            price: Some(student.default_price),
            notes: student.default_notes.clone(),
            ..Self::default()
        }
    }

    pub fn with_id(self, id: i64) -> Lesson {
        Lesson {
            id,
            start: self.start,
            end: self.end,
            student_id: self.student_id,
            student_name: self.student_name,
            title: self.title,
            price: self.price,
            is_paid: self.is_paid,
            is_cancelled: self.is_cancelled,
            notes: self.notes,
            topic: self.topic,
            work_notes: self.work_notes,
            homework: self.homework,
            links: self.links,
            links_home: self.links_home,
        }
    }
}

/// Idle interval between two adjacent lessons of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Break {
    pub start: String,
    pub end: String,
    pub duration_minutes: i64,
}
