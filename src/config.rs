use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DB_PATH_VAR: &str = "JOBMANAGER_DB";
pub const MONGO_URI_VAR: &str = "MONGO_DB_URI";
pub const MONGO_DATABASE_VAR: &str = "MONGO_DB_DATABASE";
pub const MONGO_COLLECTION_VAR: &str = "MONGO_DB_COLLECTION";

const DEFAULT_DB_FILE: &str = "jobs.db";
const DEFAULT_MONGO_NAME: &str = "Jobs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

/// Which store backs the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Memory,
    Sqlite(PathBuf),
    Mongo(MongoConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend: Backend,
    pub show_banner: bool,
}

impl Config {
    /// Flag beats environment beats `jobs.db` in the working directory.
    pub fn resolve(db_flag: Option<PathBuf>, env_db: Option<String>) -> PathBuf {
        db_flag
            .or_else(|| non_empty(env_db).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
    }

    /// Pick the backend: `--ephemeral`, then an explicit `--db`, then
    /// MongoDB when `MONGO_DB_URI` is set, then SQLite.
    pub fn from_vars(
        db_flag: Option<PathBuf>,
        ephemeral: bool,
        show_banner: bool,
        var: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let backend = if ephemeral {
            Backend::Memory
        } else if let Some(path) = db_flag {
            Backend::Sqlite(path)
        } else if let Some(uri) = non_empty(var(MONGO_URI_VAR)) {
            Backend::Mongo(MongoConfig {
                uri,
                database: non_empty(var(MONGO_DATABASE_VAR))
                    .unwrap_or_else(|| DEFAULT_MONGO_NAME.to_string()),
                collection: non_empty(var(MONGO_COLLECTION_VAR))
                    .unwrap_or_else(|| DEFAULT_MONGO_NAME.to_string()),
            })
        } else {
            Backend::Sqlite(Self::resolve(None, var(DB_PATH_VAR)))
        };

        Self {
            backend,
            show_banner,
        }
    }

    pub fn load(env_file: &Path, db_flag: Option<PathBuf>, ephemeral: bool, show_banner: bool) -> Self {
        load_env_file(env_file);
        Self::from_vars(db_flag, ephemeral, show_banner, |key| std::env::var(key).ok())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Pull variables from a dotenv file into the process environment.
/// Variables that are already set win; a missing file is fine.
fn load_env_file(path: &Path) {
    match dotenvy::from_path(path) {
        Ok(()) => debug!("Loaded environment from {}", path.display()),
        Err(dotenvy::Error::Io(_)) => {}
        Err(e) => warn!("Failed to load {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_resolve_prefers_flag() {
        let path = Config::resolve(Some(PathBuf::from("flag.db")), Some("env.db".to_string()));
        assert_eq!(path, PathBuf::from("flag.db"));
    }

    #[test]
    fn test_resolve_falls_back_to_env() {
        let path = Config::resolve(None, Some("env.db".to_string()));
        assert_eq!(path, PathBuf::from("env.db"));
    }

    #[test]
    fn test_resolve_default() {
        assert_eq!(Config::resolve(None, None), PathBuf::from("jobs.db"));
        assert_eq!(Config::resolve(None, Some("  ".to_string())), PathBuf::from("jobs.db"));
    }

    #[test]
    fn test_backend_defaults_to_sqlite() {
        let config = Config::from_vars(None, false, true, vars(&[]));
        assert_eq!(config.backend, Backend::Sqlite(PathBuf::from("jobs.db")));
        assert!(config.show_banner);

        let config = Config::from_vars(None, false, false, vars(&[(DB_PATH_VAR, "other.db")]));
        assert_eq!(config.backend, Backend::Sqlite(PathBuf::from("other.db")));
    }

    #[test]
    fn test_backend_mongo_from_env() {
        let config = Config::from_vars(
            None,
            false,
            true,
            vars(&[
                (MONGO_URI_VAR, "mongodb://localhost:27017"),
                (MONGO_DATABASE_VAR, "Tracker"),
                (MONGO_COLLECTION_VAR, "Applications"),
            ]),
        );
        assert_eq!(
            config.backend,
            Backend::Mongo(MongoConfig {
                uri: "mongodb://localhost:27017".to_string(),
                database: "Tracker".to_string(),
                collection: "Applications".to_string(),
            })
        );
    }

    #[test]
    fn test_backend_mongo_default_names() {
        let config = Config::from_vars(None, false, true, vars(&[(MONGO_URI_VAR, "mongodb://h")]));
        let Backend::Mongo(mongo) = config.backend else {
            panic!("expected mongo backend");
        };
        assert_eq!(mongo.database, "Jobs");
        assert_eq!(mongo.collection, "Jobs");
    }

    #[test]
    fn test_backend_flags_beat_mongo() {
        let env = [(MONGO_URI_VAR, "mongodb://h")];
        let config = Config::from_vars(Some(PathBuf::from("x.db")), false, true, vars(&env));
        assert_eq!(config.backend, Backend::Sqlite(PathBuf::from("x.db")));

        let config = Config::from_vars(Some(PathBuf::from("x.db")), true, true, vars(&env));
        assert_eq!(config.backend, Backend::Memory);
    }

    #[test]
    fn test_blank_mongo_uri_is_ignored() {
        let config = Config::from_vars(None, false, true, vars(&[(MONGO_URI_VAR, "  ")]));
        assert_eq!(config.backend, Backend::Sqlite(PathBuf::from("jobs.db")));
    }

    #[test]
    fn test_missing_env_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        // Must not panic or error
        load_env_file(&dir.path().join("does-not-exist.env"));
    }
}
