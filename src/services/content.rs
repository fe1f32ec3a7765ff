// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read adapters mapping sheet rows to portfolio content.

use crate::config::ProfileDefaults;
use crate::models::sheet::cell;
use crate::models::{Experience, MainData, Row};
use crate::services::sheets::{sheet_names, SheetsClient};
use std::sync::Arc;

/// Column positions in the `experiences` sheet.
mod experience_columns {
    pub const TITLE: usize = 0;
    pub const DESCRIPTION: usize = 1;
    pub const START_DATE: usize = 2;
    pub const END_DATE: usize = 3;
    pub const COMPANY: usize = 4;
    pub const SKILLS: usize = 5;
}

/// Column positions in the `main` sheet.
mod main_columns {
    pub const NAME: usize = 0;
    pub const TITLE: usize = 1;
    pub const PERSONAL_DESCRIPTION: usize = 2;
    pub const CV_LINK: usize = 3;
    pub const CONTACT_ME: usize = 4;
    pub const GITHUB_USERNAME: usize = 5;
    pub const GITHUB_PROFILE: usize = 6;
    pub const LINKEDIN_PROFILE: usize = 7;
    pub const EMAIL_ADDRESS: usize = 8;
}

const ONGOING_END_DATE: &str = "Present";

/// Serves experience and profile content from the spreadsheet.
#[derive(Clone)]
pub struct ContentService {
    sheets: Arc<SheetsClient>,
    defaults: ProfileDefaults,
}

impl ContentService {
    pub fn new(sheets: Arc<SheetsClient>, defaults: ProfileDefaults) -> Self {
        Self { sheets, defaults }
    }

    pub fn defaults(&self) -> MainData {
        MainData::from(&self.defaults)
    }

    /// All experience entries, or an empty list when the sheet has no data rows.
    pub async fn get_experiences_data(&self) -> Vec<Experience> {
        let sheet = self
            .sheets
            .fetch_sheet(sheet_names::EXPERIENCES, false)
            .await;

        if sheet.len() < 2 {
            tracing::warn!(
                rows = sheet.len(),
                "Experiences sheet data is missing or incomplete"
            );
            return Vec::new();
        }

        let experiences = map_experience_rows(&sheet.values[1..]);
        tracing::debug!(count = experiences.len(), "Parsed experiences");
        experiences
    }

    /// Profile data, with each blank cell replaced by its default.
    pub async fn get_main_data(&self) -> MainData {
        let sheet = self.sheets.fetch_sheet(sheet_names::MAIN, false).await;

        match sheet.values.get(1) {
            Some(row) => map_main_row(row, &self.defaults),
            None => {
                tracing::warn!(
                    rows = sheet.len(),
                    "Main sheet data is missing or incomplete, using defaults"
                );
                self.defaults()
            }
        }
    }
}

/// Map data rows (header already removed) to experiences.
pub fn map_experience_rows(rows: &[Row]) -> Vec<Experience> {
    use experience_columns::*;

    rows.iter()
        .map(|row| Experience {
            title: cell(row, TITLE).to_string(),
            description: cell(row, DESCRIPTION).to_string(),
            start_date: cell(row, START_DATE).to_string(),
            end_date: or_default(cell(row, END_DATE), ONGOING_END_DATE),
            company: cell(row, COMPANY).to_string(),
            skills: split_skills(cell(row, SKILLS)),
        })
        .collect()
}

/// Map the profile data row, substituting defaults for blank cells.
pub fn map_main_row(row: &[String], defaults: &ProfileDefaults) -> MainData {
    use main_columns::*;

    MainData {
        name: or_default(cell(row, NAME), &defaults.name),
        title: or_default(cell(row, TITLE), &defaults.title),
        personal_description: or_default(
            cell(row, PERSONAL_DESCRIPTION),
            &defaults.personal_description,
        ),
        cv_link: or_default(cell(row, CV_LINK), &defaults.cv_link),
        contact_me: or_default(cell(row, CONTACT_ME), &defaults.contact_me),
        github_username: or_default(cell(row, GITHUB_USERNAME), &defaults.github_username),
        github_profile: or_default(cell(row, GITHUB_PROFILE), &defaults.github_profile),
        linkedin_profile: or_default(cell(row, LINKEDIN_PROFILE), &defaults.linkedin_profile),
        email_address: or_default(cell(row, EMAIL_ADDRESS), &defaults.email_address),
    }
}

fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_experience_column_mapping() {
        let rows = vec![row(&[
            "Engineer",
            "Did X",
            "2020",
            "2023",
            "Acme",
            "Go, Python, SQL",
        ])];

        let experiences = map_experience_rows(&rows);
        assert_eq!(
            experiences,
            vec![Experience {
                title: "Engineer".into(),
                description: "Did X".into(),
                start_date: "2020".into(),
                end_date: "2023".into(),
                company: "Acme".into(),
                skills: vec!["Go".into(), "Python".into(), "SQL".into()],
            }]
        );
    }

    #[test]
    fn test_short_row_defaults_end_date_and_skills() {
        let experiences = map_experience_rows(&[row(&["Intern", "", "2019"])]);
        assert_eq!(experiences[0].end_date, "Present");
        assert_eq!(experiences[0].company, "");
        assert!(experiences[0].skills.is_empty());
    }

    #[test]
    fn test_skills_drop_empty_tokens() {
        assert_eq!(split_skills(" Rust, ,  ,Go ,"), vec!["Rust", "Go"]);
        assert!(split_skills("").is_empty());
    }

    #[test]
    fn test_main_row_substitutes_blank_cells() {
        let defaults = ProfileDefaults::default();
        let data = map_main_row(&row(&["Ana", "", "Bio", "", "", "ana-gh"]), &defaults);

        assert_eq!(data.name, "Ana");
        assert_eq!(data.title, defaults.title);
        assert_eq!(data.personal_description, "Bio");
        assert_eq!(data.cv_link, "#");
        assert_eq!(data.contact_me, "#contact");
        assert_eq!(data.github_username, "ana-gh");
        assert_eq!(data.github_profile, defaults.github_profile);
        assert_eq!(data.email_address, defaults.email_address);
    }
}
