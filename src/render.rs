use comfy_table::{presets::ASCII_FULL, Table};

use crate::models::JobApplication;

pub fn jobs_table(jobs: &[JobApplication]) -> String {
    if jobs.is_empty() {
        return "No job applications found.".to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_header(vec!["ID", "Company Name", "Rating", "Notes", "Has Answered"]);

    for job in jobs {
        table.add_row(vec![
            job.id.to_string(),
            job.company_name.clone(),
            job.rating.clone(),
            job.notes.clone(),
            job.has_answered.to_string(),
        ]);
    }

    table.to_string()
}
