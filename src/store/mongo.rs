use chrono::Utc;
use mongodb::bson::doc;
use mongodb::sync::{Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::JobStore;
use crate::config::MongoConfig;
use crate::error::Result;
use crate::models::{JobApplication, NewJobApplication};

/// One application as stored in the collection. Field names are the
/// lowercase ones older collections already use; `jobid` is the numeric
/// key the update prompt asks for.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct JobDocument {
    #[serde(rename = "jobid", default)]
    id: i64,
    #[serde(rename = "companyname")]
    company_name: String,
    rating: String,
    notes: String,
    #[serde(rename = "hasanswered")]
    has_answered: bool,
    #[serde(rename = "createdat", default)]
    created_at: String,
}

impl From<JobDocument> for JobApplication {
    fn from(doc: JobDocument) -> Self {
        JobApplication {
            id: doc.id,
            company_name: doc.company_name,
            rating: doc.rating,
            notes: doc.notes,
            has_answered: doc.has_answered,
            created_at: doc.created_at,
        }
    }
}

pub struct MongoStore {
    jobs: Collection<JobDocument>,
    location: String,
}

impl MongoStore {
    pub fn connect(config: &MongoConfig) -> Result<Self> {
        let client = Client::with_uri_str(&config.uri)?;
        let db = client.database(&config.database);
        db.run_command(doc! { "ping": 1 }).run()?;
        info!("Connected to MongoDB ({}.{})", config.database, config.collection);

        Ok(Self {
            jobs: db.collection::<JobDocument>(&config.collection),
            location: format!("mongodb {}.{}", config.database, config.collection),
        })
    }

    fn next_id(&self) -> Result<i64> {
        let last = self
            .jobs
            .find_one(doc! {})
            .sort(doc! { "jobid": -1 })
            .run()?;
        Ok(last.map(|d| d.id).unwrap_or(0) + 1)
    }
}

impl JobStore for MongoStore {
    fn insert(&mut self, job: &NewJobApplication) -> Result<i64> {
        let id = self.next_id()?;
        let document = JobDocument {
            id,
            company_name: job.company_name.clone(),
            rating: job.rating.clone(),
            notes: job.notes.clone(),
            has_answered: job.has_answered,
            created_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        self.jobs.insert_one(&document).run()?;
        debug!("Inserted job #{} ({})", id, job.company_name);
        Ok(id)
    }

    fn list(&self) -> Result<Vec<JobApplication>> {
        let cursor = self
            .jobs
            .find(doc! {})
            .sort(doc! { "hasanswered": -1, "jobid": 1 })
            .run()?;
        let jobs = cursor
            .map(|d| d.map(JobApplication::from))
            .collect::<mongodb::error::Result<Vec<_>>>()?;
        debug!("Listed {} job(s)", jobs.len());
        Ok(jobs)
    }

    fn mark_answered(&mut self, id: i64) -> Result<usize> {
        let result = self
            .jobs
            .update_one(doc! { "jobid": id }, doc! { "$set": { "hasanswered": true } })
            .run()?;
        // Matched rather than modified, so an already-answered job still
        // counts as found, like the SQLite store.
        let changed = result.matched_count as usize;
        debug!("Marked job #{} answered ({} row(s))", id, changed);
        Ok(changed)
    }

    fn describe(&self) -> String {
        self.location.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::*;
    use mongodb::bson;

    #[test]
    fn test_document_field_names() {
        let document = JobDocument {
            id: 3,
            company_name: "Acme".to_string(),
            rating: "4.5/5".to_string(),
            notes: "Great culture".to_string(),
            has_answered: false,
            created_at: "2024-01-01 00:00:00".to_string(),
        };
        let raw = bson::to_document(&document).unwrap();
        assert_eq!(raw.get_i64("jobid").unwrap(), 3);
        assert_eq!(raw.get_str("companyname").unwrap(), "Acme");
        assert!(!raw.get_bool("hasanswered").unwrap());
        assert_eq!(raw.get_str("createdat").unwrap(), "2024-01-01 00:00:00");
    }

    #[test]
    fn test_reads_documents_without_id_or_timestamp() {
        // Shape written by earlier versions: generated _id only
        let raw = doc! {
            "_id": bson::oid::ObjectId::new(),
            "companyname": "Acme",
            "rating": "4/5",
            "notes": "ok",
            "hasanswered": true,
        };
        let job: JobApplication = bson::from_document::<JobDocument>(raw).unwrap().into();
        assert_eq!(job.id, 0);
        assert_eq!(job.company_name, "Acme");
        assert!(job.has_answered);
        assert!(job.created_at.is_empty());
    }

    // Needs a running server: MONGO_DB_URI=mongodb://localhost:27017 cargo test -- --ignored
    #[test]
    #[ignore]
    fn test_against_live_server() {
        let uri = std::env::var("MONGO_DB_URI").expect("MONGO_DB_URI must be set");
        let collection = format!("jobs_test_{}", std::process::id());
        let config = MongoConfig {
            uri,
            database: "jobmanager_test".to_string(),
            collection,
        };

        let checks: [fn(&mut dyn JobStore); 5] = [
            check_insert_then_list,
            check_list_orders_answered_first,
            check_mark_answered,
            check_mark_answered_unknown_id,
            check_duplicate_names_get_distinct_ids,
        ];
        for check in checks {
            let mut store = MongoStore::connect(&config).unwrap();
            store.jobs.drop().run().unwrap();
            check(&mut store);
        }

        MongoStore::connect(&config).unwrap().jobs.drop().run().unwrap();
    }
}
