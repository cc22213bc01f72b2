//! Persistence for job applications.
//!
//! The session only talks to [`JobStore`]; which backend sits behind it is
//! decided once in `main`.

mod memory;
mod mongo;
mod sqlite;

pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::models::{JobApplication, NewJobApplication};

pub trait JobStore {
    /// Store one application and return its id.
    fn insert(&mut self, job: &NewJobApplication) -> Result<i64>;

    /// All applications, answered ones first, then by id.
    fn list(&self) -> Result<Vec<JobApplication>>;

    /// Flag the application as answered. Returns how many rows changed,
    /// which is 0 for an unknown id.
    fn mark_answered(&mut self, id: i64) -> Result<usize>;

    /// Where the data lives, for log lines.
    fn describe(&self) -> String;
}
