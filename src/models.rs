#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobApplication {
    pub id: i64,
    pub company_name: String,
    pub rating: String, // "x/5"
    pub notes: String,
    pub has_answered: bool,
    pub created_at: String,
}

/// A validated application waiting to be stored.
///
/// Built by the command parser, so the rating and notes have already
/// passed their format checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJobApplication {
    pub company_name: String,
    pub rating: String,
    pub notes: String,
    pub has_answered: bool,
}
