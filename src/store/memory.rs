use chrono::Utc;
use tracing::debug;

use super::JobStore;
use crate::error::Result;
use crate::models::{JobApplication, NewJobApplication};

/// Keeps applications in a `Vec` for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    jobs: Vec<JobApplication>,
    last_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl JobStore for MemoryStore {
    fn insert(&mut self, job: &NewJobApplication) -> Result<i64> {
        self.last_id += 1;
        self.jobs.push(JobApplication {
            id: self.last_id,
            company_name: job.company_name.clone(),
            rating: job.rating.clone(),
            notes: job.notes.clone(),
            has_answered: job.has_answered,
            created_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        });
        debug!("Inserted job #{} ({})", self.last_id, job.company_name);
        Ok(self.last_id)
    }

    fn list(&self) -> Result<Vec<JobApplication>> {
        let mut jobs = self.jobs.clone();
        // Stable, and rows are kept in id order
        jobs.sort_by(|a, b| b.has_answered.cmp(&a.has_answered));
        Ok(jobs)
    }

    fn mark_answered(&mut self, id: i64) -> Result<usize> {
        let changed = match self.jobs.iter_mut().find(|j| j.id == id) {
            Some(job) => {
                job.has_answered = true;
                1
            }
            None => 0,
        };
        debug!("Marked job #{} answered ({} row(s))", id, changed);
        Ok(changed)
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::*;

    #[test]
    fn test_insert_then_list() {
        check_insert_then_list(&mut MemoryStore::new());
    }

    #[test]
    fn test_list_orders_answered_first() {
        check_list_orders_answered_first(&mut MemoryStore::new());
    }

    #[test]
    fn test_mark_answered() {
        check_mark_answered(&mut MemoryStore::new());
    }

    #[test]
    fn test_mark_answered_is_idempotent() {
        check_mark_answered_is_idempotent(&mut MemoryStore::new());
    }

    #[test]
    fn test_mark_answered_unknown_id() {
        check_mark_answered_unknown_id(&mut MemoryStore::new());
    }

    #[test]
    fn test_duplicate_names_get_distinct_ids() {
        check_duplicate_names_get_distinct_ids(&mut MemoryStore::new());
    }

    #[test]
    fn test_ids_start_at_one() {
        let mut store = MemoryStore::new();
        assert_eq!(store.insert(&new_job("A", "1/5", "a", false)).unwrap(), 1);
        assert_eq!(store.insert(&new_job("B", "1/5", "b", false)).unwrap(), 2);
    }
}
