use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{tally::Period, utils::error::ApiError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WinnerCategory {
    TopStudent,
    AppreciatedSection,
    AppreciatorSection,
    TopTeacher,
    TopStaff,
}

impl WinnerCategory {
    pub const ALL: [WinnerCategory; 5] = [
        Self::TopStudent,
        Self::AppreciatedSection,
        Self::AppreciatorSection,
        Self::TopTeacher,
        Self::TopStaff,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopStudent => "top_student",
            Self::AppreciatedSection => "appreciated_section",
            Self::AppreciatorSection => "appreciator_section",
            Self::TopTeacher => "top_teacher",
            Self::TopStaff => "top_staff",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::TopStudent => "Top Student",
            Self::AppreciatedSection => "Most Appreciated Section",
            Self::AppreciatorSection => "Top Appreciator Section",
            Self::TopTeacher => "Top Teacher",
            Self::TopStaff => "Top Staff",
        }
    }
}

impl FromStr for WinnerCategory {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ApiError::validation("category", format!("Unknown winner category: {s}")))
    }
}

/// A materialized leaderboard row written by the crown job.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Winner {
    pub id: i32,
    pub period_type: Period,
    pub category: WinnerCategory,
    pub period_label: String,
    pub rank: i32,
    pub title: String,
    pub description: String,
    pub points: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWinner {
    pub period_type: Period,
    pub category: WinnerCategory,
    pub period_label: String,
    pub rank: i32,
    pub title: String,
    pub description: String,
    pub points: i64,
}
