// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile ("main") data shown in the landing and about sections.

use crate::config::ProfileDefaults;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MainData {
    pub name: String,
    pub title: String,
    pub personal_description: String,
    pub cv_link: String,
    pub contact_me: String,
    pub github_username: String,
    pub github_profile: String,
    pub linkedin_profile: String,
    pub email_address: String,
}

impl From<&ProfileDefaults> for MainData {
    fn from(defaults: &ProfileDefaults) -> Self {
        Self {
            name: defaults.name.clone(),
            title: defaults.title.clone(),
            personal_description: defaults.personal_description.clone(),
            cv_link: defaults.cv_link.clone(),
            contact_me: defaults.contact_me.clone(),
            github_username: defaults.github_username.clone(),
            github_profile: defaults.github_profile.clone(),
            linkedin_profile: defaults.linkedin_profile.clone(),
            email_address: defaults.email_address.clone(),
        }
    }
}
