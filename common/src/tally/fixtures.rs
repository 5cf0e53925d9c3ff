use chrono::{DateTime, Duration, TimeZone, Utc};

use super::directory::Directory;
use crate::models::{
    ClassSection, GiverType, Note, NoteStatus, ReceiverType, Staff, Teacher, note_weight,
};

pub const SIX_A: i32 = 1;
pub const SEVEN_A: i32 = 2;
pub const SEVEN_B: i32 = 3;

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

pub fn directory() -> Directory {
    let sections = [("6", "A"), ("7", "A"), ("7", "B"), ("8", "A"), ("8", "B")]
        .into_iter()
        .zip(1..)
        .map(|((class_name, section_name), id)| ClassSection {
            id,
            class_name: class_name.into(),
            section_name: section_name.into(),
        })
        .collect();
    let teachers = [
        ("Mr. Rahman", "Mathematics"),
        ("Ms. Ayesha", "English"),
        ("Mr. Kabir", "Science"),
        ("Mrs. Sultana", "Bangla"),
        ("Mr. Hasan", "Physics"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, subject), id)| Teacher {
        id,
        name: name.into(),
        subject: subject.into(),
    })
    .collect();
    let staff = [("Anwar", "Security"), ("Rina", "Cleaning"), ("Masud", "Office Assistant")]
        .into_iter()
        .zip(1..)
        .map(|((name, role), id)| Staff {
            id,
            name: name.into(),
            role: role.into(),
        })
        .collect();

    Directory::new(sections, teachers, staff)
}

fn base_note(id: i32, receiver_type: ReceiverType, at: DateTime<Utc>) -> Note {
    Note {
        id,
        giver_type: GiverType::Teacher,
        giver_name: Some("Ms. Ayesha".into()),
        giver_section_id: None,
        receiver_type,
        receiver_name: None,
        receiver_section_id: None,
        receiver_teacher_id: None,
        receiver_staff_id: None,
        message: "Thank you!".into(),
        weight_applied: 1,
        status: NoteStatus::Approved,
        created_at: at,
    }
}

pub fn student_note(
    id: i32,
    giver_section: Option<i32>,
    receiver_name: &str,
    receiver_section: i32,
    at: DateTime<Utc>,
) -> Note {
    Note {
        giver_type: GiverType::Student,
        giver_name: Some("Anonymous".into()),
        giver_section_id: giver_section,
        receiver_name: Some(receiver_name.into()),
        receiver_section_id: Some(receiver_section),
        weight_applied: note_weight(GiverType::Student, giver_section, Some(receiver_section)),
        ..base_note(id, ReceiverType::Student, at)
    }
}

pub fn teacher_note(id: i32, teacher_id: i32, at: DateTime<Utc>) -> Note {
    Note {
        receiver_teacher_id: Some(teacher_id),
        ..base_note(id, ReceiverType::Teacher, at)
    }
}

pub fn staff_note(id: i32, staff_id: i32, at: DateTime<Utc>) -> Note {
    Note {
        receiver_staff_id: Some(staff_id),
        ..base_note(id, ReceiverType::Staff, at)
    }
}
