use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::JobStore;
use crate::error::Result;
use crate::models::{JobApplication, NewJobApplication};

pub struct SqliteStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        let store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        store.init()?;
        info!("Opened job database at {}", path.display());
        Ok(store)
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
            path: None,
        };
        store.init()?;
        Ok(store)
    }

    fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                company_name TEXT NOT NULL CHECK (length(company_name) > 0),
                rating TEXT NOT NULL,
                notes TEXT NOT NULL,
                has_answered INTEGER NOT NULL DEFAULT 0 CHECK (has_answered IN (0, 1)),
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE INDEX IF NOT EXISTS idx_jobs_has_answered ON jobs(has_answered);
            "#,
        )?;
        Ok(())
    }

    fn row_to_job(row: &rusqlite::Row) -> rusqlite::Result<JobApplication> {
        Ok(JobApplication {
            id: row.get(0)?,
            company_name: row.get(1)?,
            rating: row.get(2)?,
            notes: row.get(3)?,
            has_answered: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}

impl JobStore for SqliteStore {
    fn insert(&mut self, job: &NewJobApplication) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO jobs (company_name, rating, notes, has_answered)
             VALUES (?1, ?2, ?3, ?4)",
            params![job.company_name, job.rating, job.notes, job.has_answered],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("Inserted job #{} ({})", id, job.company_name);
        Ok(id)
    }

    fn list(&self) -> Result<Vec<JobApplication>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, company_name, rating, notes, has_answered, created_at
             FROM jobs
             ORDER BY has_answered DESC, id ASC",
        )?;
        let jobs = stmt
            .query_map([], Self::row_to_job)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!("Listed {} job(s)", jobs.len());
        Ok(jobs)
    }

    fn mark_answered(&mut self, id: i64) -> Result<usize> {
        let changed = self.conn.execute(
            "UPDATE jobs SET has_answered = 1 WHERE id = ?1",
            [id],
        )?;
        debug!("Marked job #{} answered ({} row(s))", id, changed);
        Ok(changed)
    }

    fn describe(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => "sqlite (in-memory)".to_string(),
        }
    }
}
