use crate::db;
use crate::store::{LessonStore, StudentStore};
use crate::time::DayWindow;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DAY_WINDOW_KEY: &str = "setup.dayWindow";

/// An open workspace: the SQLite file plus the stores loaded from it.
/// Lives until another workspace is selected or the process exits.
pub struct Workspace {
    pub path: PathBuf,
    pub conn: Connection,
    pub students: StudentStore,
    pub lessons: LessonStore,
    pub day_window: DayWindow,
}

impl Workspace {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = db::open_db(path)?;
        let students = StudentStore::load(&conn)?;
        let lessons = LessonStore::load(&conn)?;
        let day_window = load_day_window(&conn);
        info!(
            workspace = %path.to_string_lossy(),
            students = students.list().len(),
            days = lessons.snapshot_all().len(),
            "workspace opened"
        );
        Ok(Self {
            path: path.to_path_buf(),
            conn,
            students,
            lessons,
            day_window,
        })
    }
}

fn load_day_window(conn: &Connection) -> DayWindow {
    match db::settings_get_json(conn, DAY_WINDOW_KEY) {
        Ok(Some(v)) => serde_json::from_value(v).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring invalid day window setting");
            DayWindow::default()
        }),
        Ok(None) => DayWindow::default(),
        Err(e) => {
            warn!(error = %e, "failed to read day window setting");
            DayWindow::default()
        }
    }
}
