use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GiverType {
    Student,
    Teacher,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReceiverType {
    Student,
    Teacher,
    Staff,
}

/// Moderation state. Only `Approved` notes are ever aggregated or listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NoteStatus {
    Pending,
    Approved,
    Hidden,
}

/// Moderator actions on an existing note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NoteAction {
    Approve,
    Hide,
    Unhide,
}

impl GiverType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
        }
    }
}

impl ReceiverType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Staff => "staff",
        }
    }
}

impl NoteStatus {
    pub const ALL: [NoteStatus; 3] = [Self::Pending, Self::Approved, Self::Hidden];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Hidden => "hidden",
        }
    }
}

impl NoteAction {
    /// Status a note ends up in after the action. Unhiding restores it to the wall.
    pub fn target_status(self) -> NoteStatus {
        match self {
            Self::Approve | Self::Unhide => NoteStatus::Approved,
            Self::Hide => NoteStatus::Hidden,
        }
    }
}

impl FromStr for GiverType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            other => Err(ApiError::validation(
                "giver_type",
                format!("Unknown giver type: {other}"),
            )),
        }
    }
}

impl FromStr for ReceiverType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            "staff" => Ok(Self::Staff),
            other => Err(ApiError::validation(
                "receiver_type",
                format!("Unknown receiver type: {other}"),
            )),
        }
    }
}

impl FromStr for NoteStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "hidden" => Ok(Self::Hidden),
            other => Err(ApiError::validation("status", format!("Unknown status: {other}"))),
        }
    }
}

impl FromStr for NoteAction {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(Self::Approve),
            "hide" => Ok(Self::Hide),
            "unhide" => Ok(Self::Unhide),
            other => Err(ApiError::validation("action", format!("Unknown action: {other}"))),
        }
    }
}

impl fmt::Display for NoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Note {
    pub id: i32,
    pub giver_type: GiverType,
    pub giver_name: Option<String>,
    pub giver_section_id: Option<i32>,
    pub receiver_type: ReceiverType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_section_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_teacher_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_staff_id: Option<i32>,
    pub message: String,
    pub weight_applied: i32,
    pub status: NoteStatus,
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub fn is_approved(&self) -> bool {
        self.status == NoteStatus::Approved
    }

    /// Legacy rows may carry a zero weight; those count once.
    pub fn effective_weight(&self) -> i64 {
        if self.weight_applied > 0 {
            i64::from(self.weight_applied)
        } else {
            1
        }
    }
}

/// Student-to-student appreciation across sections counts double.
pub fn note_weight(
    giver_type: GiverType,
    giver_section_id: Option<i32>,
    receiver_section_id: Option<i32>,
) -> i32 {
    match (giver_type, giver_section_id, receiver_section_id) {
        (GiverType::Student, Some(giver), Some(receiver)) if giver != receiver => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_section_student_notes_weigh_double() {
        assert_eq!(note_weight(GiverType::Student, Some(1), Some(2)), 2);
        assert_eq!(note_weight(GiverType::Student, Some(1), Some(1)), 1);
    }

    #[test]
    fn teacher_givers_and_missing_sections_weigh_once() {
        assert_eq!(note_weight(GiverType::Teacher, Some(1), Some(2)), 1);
        assert_eq!(note_weight(GiverType::Student, None, Some(2)), 1);
        assert_eq!(note_weight(GiverType::Student, Some(1), None), 1);
    }

    #[test]
    fn unhide_restores_approval() {
        assert_eq!(NoteAction::Unhide.target_status(), NoteStatus::Approved);
        assert_eq!(NoteAction::Hide.target_status(), NoteStatus::Hidden);
        assert!("delete".parse::<NoteAction>().is_err());
    }

    #[test]
    fn status_text_matches_storage_values() {
        for status in NoteStatus::ALL {
            assert_eq!(status.as_str().parse::<NoteStatus>().unwrap(), status);
        }
    }
}
