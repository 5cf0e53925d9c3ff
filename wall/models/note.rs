use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use common::models::{GiverType, Note, ReceiverType, note_weight};
use common::tally::ChartBars;

use super::{NAME_MAX, within_length};
use crate::utils::error::{ApiError, Result};

const ANONYMOUS: &str = "Anonymous";

/// Who is writing the note. Shared by all three submission forms.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct GiverFields {
    /// `student` (default) or `teacher`.
    pub giver_type: Option<String>,
    pub giver_name: Option<String>,
    pub giver_section_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StudentNoteForm {
    #[serde(flatten)]
    pub giver: GiverFields,
    pub receiver_name: Option<String>,
    pub receiver_section_id: Option<i32>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TeacherNoteForm {
    #[serde(flatten)]
    pub giver: GiverFields,
    pub teacher_id: Option<i32>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StaffNoteForm {
    #[serde(flatten)]
    pub giver: GiverFields,
    pub staff_id: Option<i32>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receiver {
    Student { name: String, section_id: i32 },
    Teacher(i32),
    Staff(i32),
}

impl Receiver {
    pub fn receiver_type(&self) -> ReceiverType {
        match self {
            Self::Student { .. } => ReceiverType::Student,
            Self::Teacher(_) => ReceiverType::Teacher,
            Self::Staff(_) => ReceiverType::Staff,
        }
    }
}

/// A validated submission, ready to insert as a pending note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub giver_type: GiverType,
    pub giver_name: String,
    pub giver_section_id: Option<i32>,
    pub receiver: Receiver,
    pub message: String,
    pub weight_applied: i32,
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

struct Giver {
    giver_type: GiverType,
    name: Option<String>,
    section_id: Option<i32>,
}

impl GiverFields {
    fn validate(&self) -> Result<Giver> {
        let giver_type: GiverType = trimmed(self.giver_type.as_deref())
            .unwrap_or("student")
            .parse()?;
        let name = trimmed(self.giver_name.as_deref()).map(str::to_owned);
        if let Some(name) = &name {
            within_length("giver_name", "Your name", name, NAME_MAX)?;
        }

        match giver_type {
            GiverType::Teacher if name.is_none() => {
                return Err(ApiError::validation("giver_name", "Teacher name is required."));
            }
            GiverType::Student if self.giver_section_id.is_none() => {
                return Err(ApiError::validation(
                    "giver_section_id",
                    "Please select your own Class–Section.",
                ));
            }
            _ => {}
        }

        Ok(Giver {
            giver_type,
            name,
            section_id: self.giver_section_id,
        })
    }
}

impl Giver {
    fn into_note(self, receiver: Receiver, message: String) -> NewNote {
        let weight_applied = match &receiver {
            Receiver::Student { section_id, .. } => {
                note_weight(self.giver_type, self.section_id, Some(*section_id))
            }
            Receiver::Teacher(_) | Receiver::Staff(_) => 1,
        };

        NewNote {
            giver_type: self.giver_type,
            giver_name: self.name.unwrap_or_else(|| ANONYMOUS.to_owned()),
            giver_section_id: self.section_id,
            receiver,
            message,
            weight_applied,
        }
    }
}

impl StudentNoteForm {
    pub fn validate(&self) -> Result<NewNote> {
        let giver = self.giver.validate()?;

        let (Some(name), Some(section_id)) =
            (trimmed(self.receiver_name.as_deref()), self.receiver_section_id)
        else {
            return Err(ApiError::validation(
                "receiver",
                "Please enter the student name and select their Class–Section.",
            ));
        };
        within_length("receiver_name", "Student name", name, NAME_MAX)?;
        let message = trimmed(self.message.as_deref()).ok_or_else(|| {
            ApiError::validation("message", "Please write a short appreciation message.")
        })?;

        Ok(giver.into_note(
            Receiver::Student {
                name: name.to_owned(),
                section_id,
            },
            message.to_owned(),
        ))
    }
}

impl TeacherNoteForm {
    pub fn validate(&self) -> Result<NewNote> {
        let giver = self.giver.validate()?;

        match (self.teacher_id, trimmed(self.message.as_deref())) {
            (Some(teacher_id), Some(message)) => {
                Ok(giver.into_note(Receiver::Teacher(teacher_id), message.to_owned()))
            }
            _ => Err(ApiError::validation(
                "teacher_id",
                "Please select a teacher and write a message.",
            )),
        }
    }
}

impl StaffNoteForm {
    pub fn validate(&self) -> Result<NewNote> {
        let giver = self.giver.validate()?;

        match (self.staff_id, trimmed(self.message.as_deref())) {
            (Some(staff_id), Some(message)) => {
                Ok(giver.into_note(Receiver::Staff(staff_id), message.to_owned()))
            }
            _ => Err(ApiError::validation(
                "staff_id",
                "Please select a staff member and write a message.",
            )),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct WallFilter {
    #[serde(rename = "receiverType")]
    pub receiver_type: Option<String>,
    #[serde(rename = "fromDate")]
    pub from_date: Option<String>,
    #[serde(rename = "toDate")]
    pub to_date: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WallResponse {
    pub notes: Vec<Note>,
    pub bars: ChartBars,
}
