pub mod catalog;
pub mod db;
pub mod experience;
pub mod intake;
pub mod logging;
pub mod matching;
pub mod skill;
pub mod store;
pub mod types;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use experience::Experience;
pub use skill::{Skill, SkillLevel};
pub use types::{Availability, CareerPreference, LocationType};

// Data models shared by the matching engine, the intake layer and the stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: Option<i64>,
    pub title: String,
    pub required_experience: Experience,
    pub location_type: LocationType,
    pub salary_min: i64,
    pub salary_max: i64,
    pub availability: Availability,
    pub career_preference: CareerPreference,
    /// Required skills; references into the skill catalog, never empty once stored.
    pub skills: Vec<Skill>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: Option<i64>,
    /// Anonymous identifier, unique across candidates.
    pub username: String,
    pub total_experience: Experience,
    pub preferred_location: LocationType,
    pub expected_salary_min: i64,
    pub expected_salary_max: i64,
    pub career_preference: CareerPreference,
    /// Possessed skills; references into the skill catalog, never empty once stored.
    pub skills: Vec<Skill>,
    pub created_at: Option<DateTime<Utc>>,
}
