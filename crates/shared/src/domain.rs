use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

pub const BIRTHDATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

/// Onboarding profile captured once and shown across views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub birthdate: NaiveDate,
    pub gender: Gender,
}

/// Editable form state for [`UserProfile`]. Fields stay as raw text until submit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileDraft {
    pub name: String,
    pub birthdate: String,
    pub gender: Gender,
}

impl ProfileDraft {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            birthdate: profile.birthdate.format(BIRTHDATE_FORMAT).to_string(),
            gender: profile.gender,
        }
    }

    pub fn to_profile(&self) -> Result<UserProfile, ProfileError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ProfileError::MissingName);
        }

        let birthdate = self.birthdate.trim();
        if birthdate.is_empty() {
            return Err(ProfileError::MissingBirthdate);
        }
        let birthdate = NaiveDate::parse_from_str(birthdate, BIRTHDATE_FORMAT)
            .map_err(|_| ProfileError::InvalidBirthdate(birthdate.to_string()))?;

        Ok(UserProfile {
            name: name.to_string(),
            birthdate,
            gender: self.gender,
        })
    }
}
