//! Error types for JobManager

use thiserror::Error;

/// Infrastructure failures. These end the session.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Bad user input. The message is printed and the prompt comes back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid rating. Please use the format x/5 where x is a number between 0 and 5")]
    InvalidRating,

    #[error("Invalid notes. Please use a short description of the company (Max 30 characters)")]
    InvalidNotes,

    #[error("Missing company name. Please provide one with -cn <name>")]
    MissingCompanyName,

    #[error("Usage: jm -ls")]
    ListUsage,

    #[error("Invalid id '{0}'. Please enter the numeric id of the application")]
    InvalidKey(String),
}
