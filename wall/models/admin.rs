use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use common::models::{ClassSection, Note, Staff, Teacher};

use super::{NAME_MAX, SECTION_PART_MAX, within_length};
use crate::utils::error::{ApiError, Result};

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminPanel {
    pub pending: Vec<Note>,
    pub approved: Vec<Note>,
    pub hidden: Vec<Note>,
    pub sections: Vec<ClassSection>,
    pub teachers: Vec<Teacher>,
    pub staff: Vec<Staff>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewSectionRequest {
    pub class_name: String,
    pub section_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewTeacherRequest {
    pub name: String,
    pub subject: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewStaffRequest {
    pub name: String,
    pub role: String,
}

fn both_present<'a>(
    first: &'a str,
    second: &'a str,
    max: usize,
    message: &str,
) -> Result<(&'a str, &'a str)> {
    match (first.trim(), second.trim()) {
        ("", _) | (_, "") => Err(ApiError::validation("directory", message)),
        (first, second) => {
            within_length("directory", "Each field", first, max)?;
            within_length("directory", "Each field", second, max)?;
            Ok((first, second))
        }
    }
}

impl NewSectionRequest {
    /// Class is trimmed; the section letter is trimmed and uppercased.
    pub fn normalized(&self) -> Result<(String, String)> {
        let (class_name, section_name) = both_present(
            &self.class_name,
            &self.section_name,
            SECTION_PART_MAX,
            "Class and Section are required.",
        )?;
        let section_name = section_name.to_uppercase();
        within_length("directory", "Each field", &section_name, SECTION_PART_MAX)?;
        Ok((class_name.to_owned(), section_name))
    }
}

impl NewTeacherRequest {
    pub fn normalized(&self) -> Result<(String, String)> {
        let (name, subject) =
            both_present(&self.name, &self.subject, NAME_MAX, "Teacher name and subject are required.")?;
        Ok((name.to_owned(), subject.to_owned()))
    }
}

impl NewStaffRequest {
    pub fn normalized(&self) -> Result<(String, String)> {
        let (name, role) = both_present(&self.name, &self.role, NAME_MAX, "Staff name and role are required.")?;
        Ok((name.to_owned(), role.to_owned()))
    }
}
