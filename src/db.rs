use anyhow::Context;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

pub const DB_FILE: &str = "tutord.sqlite3";

/// Whole-value key/value persistence behind the stores.
pub trait KeyValue {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)
        .with_context(|| format!("failed to create workspace {}", workspace.to_string_lossy()))?;
    let db_path = workspace.join(DB_FILE);
    let conn = Connection::open(&db_path)
        .with_context(|| format!("failed to open {}", db_path.to_string_lossy()))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store(
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT
        )",
        [],
    )?;

    Ok(conn)
}

impl KeyValue for Connection {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let value = self
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?",
                params![key],
                |r| r.get::<_, String>(0),
            )
            .optional()
            .with_context(|| format!("failed to read key {}", key))?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.execute(
            "INSERT INTO kv_store(key, value, updated_at) VALUES(?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now_ts()],
        )
        .with_context(|| format!("failed to write key {}", key))?;
        Ok(())
    }
}

pub fn settings_get_json(kv: &dyn KeyValue, key: &str) -> anyhow::Result<Option<serde_json::Value>> {
    let Some(raw) = kv.get(key)? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw)
        .with_context(|| format!("setting {} is not valid JSON", key))?;
    Ok(Some(value))
}

pub fn settings_set_json(kv: &dyn KeyValue, key: &str, value: &serde_json::Value) -> anyhow::Result<()> {
    let raw = serde_json::to_string(value).context("failed to serialize setting")?;
    kv.set(key, &raw)
}

fn now_ts() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
