use regex::Regex;
use std::sync::LazyLock;

use crate::error::InputError;
use crate::models::NewJobApplication;

const COMMAND_PREFIX: &str = "jm -";

static RATING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-4](?:\.[0-9]+)?|5(?:\.0+)?)/5$").expect("rating pattern is valid")
});

static NOTES_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.{1,30}$").expect("notes pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(NewJobApplication),
    List,
    Update,
    Help,
    Clear,
    Empty,
    Unknown,
}

/// Turn one input line into a command.
///
/// Matching is by prefix, first hit wins, so `jm -abc` is still an add.
pub fn parse(line: &str) -> Result<Command, InputError> {
    let line = line.trim();

    if line.is_empty() {
        return Ok(Command::Empty);
    }

    if line.starts_with(&format!("{}a", COMMAND_PREFIX)) {
        return parse_add(line).map(Command::Add);
    }

    if line.starts_with(&format!("{}ls", COMMAND_PREFIX)) {
        if line.split_whitespace().count() != 2 {
            return Err(InputError::ListUsage);
        }
        return Ok(Command::List);
    }

    if line.starts_with(&format!("{}u", COMMAND_PREFIX)) {
        return Ok(Command::Update);
    }

    if line.starts_with(&format!("{}-help", COMMAND_PREFIX)) {
        return Ok(Command::Help);
    }

    if line.starts_with("clear") {
        return Ok(Command::Clear);
    }

    Ok(Command::Unknown)
}

fn parse_add(line: &str) -> Result<NewJobApplication, InputError> {
    let mut company_name = String::new();
    let mut rating = None;
    let mut notes = None;
    let mut has_answered = false;

    // First fragment is the "jm " in front of the command flag
    for part in line.split('-').skip(1) {
        let part = part.trim();

        if let Some(value) = part.strip_prefix("cn ") {
            company_name = value.trim().to_string();
        } else if let Some(value) = part.strip_prefix("r ") {
            let value = value.trim();
            if !is_valid_rating(value) {
                return Err(InputError::InvalidRating);
            }
            rating = Some(value.to_string());
        } else if let Some(value) = part.strip_prefix("n ") {
            let value = value.trim();
            if !is_valid_notes(value) {
                return Err(InputError::InvalidNotes);
            }
            notes = Some(value.to_string());
        } else if let Some(value) = part.strip_prefix("ha ") {
            has_answered = value.trim() == "true";
        }
    }

    if company_name.is_empty() {
        return Err(InputError::MissingCompanyName);
    }

    Ok(NewJobApplication {
        company_name,
        rating: rating.ok_or(InputError::InvalidRating)?,
        notes: notes.ok_or(InputError::InvalidNotes)?,
        has_answered,
    })
}

/// Parse the id typed in answer to the update prompt.
pub fn parse_key(line: &str) -> Result<i64, InputError> {
    let line = line.trim();
    let invalid = || InputError::InvalidKey(line.to_string());
    // Digits only: no sign, no non-ASCII numerals
    if line.is_empty() || !line.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    line.parse::<i64>().map_err(|_| invalid())
}

pub fn is_valid_rating(rating: &str) -> bool {
    RATING_PATTERN.is_match(rating)
}

pub fn is_valid_notes(notes: &str) -> bool {
    NOTES_PATTERN.is_match(notes)
}
