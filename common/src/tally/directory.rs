use std::collections::HashMap;

use crate::models::{ClassSection, Staff, Teacher};

const UNKNOWN: &str = "Unknown";

/// Lookup tables used to turn winning ids into display labels.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    sections: HashMap<i32, ClassSection>,
    teachers: HashMap<i32, Teacher>,
    staff: HashMap<i32, Staff>,
}

impl Directory {
    pub fn new(sections: Vec<ClassSection>, teachers: Vec<Teacher>, staff: Vec<Staff>) -> Self {
        Self {
            sections: sections.into_iter().map(|s| (s.id, s)).collect(),
            teachers: teachers.into_iter().map(|t| (t.id, t)).collect(),
            staff: staff.into_iter().map(|s| (s.id, s)).collect(),
        }
    }

    pub fn section(&self, id: i32) -> Option<&ClassSection> {
        self.sections.get(&id)
    }

    pub fn teacher(&self, id: i32) -> Option<&Teacher> {
        self.teachers.get(&id)
    }

    pub fn staff(&self, id: i32) -> Option<&Staff> {
        self.staff.get(&id)
    }

    pub fn section_label(&self, id: i32) -> String {
        self.section(id).map_or_else(|| UNKNOWN.to_owned(), ClassSection::label)
    }

    pub fn teacher_label(&self, id: i32) -> String {
        self.teacher(id).map_or_else(|| UNKNOWN.to_owned(), Teacher::label)
    }

    pub fn staff_label(&self, id: i32) -> String {
        self.staff(id).map_or_else(|| UNKNOWN.to_owned(), Staff::label)
    }

    pub fn optional_section_label(&self, id: Option<i32>) -> String {
        id.map_or_else(|| UNKNOWN.to_owned(), |id| self.section_label(id))
    }
}
