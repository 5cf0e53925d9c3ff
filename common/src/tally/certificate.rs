use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{counts::Tally, directory::Directory};
use crate::{
    models::{Note, ReceiverType},
    utils::error::{ApiError, Result},
};

pub const MAX_CERTIFICATE_RANK: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CertificateCategory {
    Teacher,
    Staff,
    StudentSection,
}

impl CertificateCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Staff => "staff",
            Self::StudentSection => "student_section",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Teacher => "Most Appreciated Teacher",
            Self::Staff => "Most Appreciated Staff Member",
            Self::StudentSection => "Most Appreciated Section",
        }
    }
}

impl FromStr for CertificateCategory {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "teacher" => Ok(Self::Teacher),
            "staff" => Ok(Self::Staff),
            "student_section" => Ok(Self::StudentSection),
            other => Err(ApiError::validation(
                "category",
                format!("Unknown certificate category: {other}"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Certificate {
    pub category: CertificateCategory,
    pub rank: u8,
    pub label: String,
    pub count: i64,
}

pub fn validate_rank(rank: u32) -> Result<u8> {
    u8::try_from(rank)
        .ok()
        .filter(|rank| (1..=MAX_CERTIFICATE_RANK).contains(rank))
        .ok_or_else(|| {
            ApiError::validation(
                "rank",
                format!("Rank must be between 1 and {MAX_CERTIFICATE_RANK}"),
            )
        })
}

/// Ranks the whole approved history for `category` and returns the entry at
/// `rank` (1-based).
pub fn resolve_certificate(
    notes: &[Note],
    directory: &Directory,
    category: CertificateCategory,
    rank: u8,
) -> Result<Certificate> {
    let rank = validate_rank(rank.into())?;
    let approved = notes.iter().filter(|n| n.is_approved());

    let ranked: Vec<(Option<String>, i64)> = match category {
        CertificateCategory::Teacher => approved
            .filter(|n| n.receiver_type == ReceiverType::Teacher)
            .filter_map(|n| n.receiver_teacher_id.and_then(|id| directory.teacher(id)))
            .map(|teacher| (teacher.name.clone(), 1))
            .collect::<Tally<String>>()
            .ranked()
            .into_iter()
            .map(|(name, count)| (Some(name), count))
            .collect(),
        CertificateCategory::Staff => approved
            .filter(|n| n.receiver_type == ReceiverType::Staff)
            .filter_map(|n| n.receiver_staff_id.and_then(|id| directory.staff(id)))
            .map(|staff| (staff.name.clone(), 1))
            .collect::<Tally<String>>()
            .ranked()
            .into_iter()
            .map(|(name, count)| (Some(name), count))
            .collect(),
        CertificateCategory::StudentSection => approved
            .filter(|n| n.receiver_type == ReceiverType::Student)
            .filter_map(|n| n.receiver_section_id)
            .map(|section| (section, 1))
            .collect::<Tally<i32>>()
            .ranked()
            .into_iter()
            .map(|(section, count)| (directory.section(section).map(|s| s.label()), count))
            .collect(),
    };

    match ranked.into_iter().nth(usize::from(rank) - 1) {
        Some((Some(label), count)) => Ok(Certificate {
            category,
            rank,
            label,
            count,
        }),
        _ => Err(ApiError::NotEnoughData(
            "Not enough data for this certificate.".to_owned(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteStatus;
    use crate::tally::fixtures::*;

    fn teacher_history() -> Vec<Note> {
        let mut notes = Vec::new();
        for (teacher, times) in [(2, 3), (1, 5), (3, 1)] {
            for _ in 0..times {
                notes.push(teacher_note(notes.len() as i32, teacher, days_ago(200)));
            }
        }
        notes
    }

    #[test]
    fn resolves_each_rank_in_order() {
        let notes = teacher_history();
        let dir = directory();

        let first = resolve_certificate(&notes, &dir, CertificateCategory::Teacher, 1).unwrap();
        assert_eq!((first.label.as_str(), first.count), ("Mr. Rahman", 5));
        let second = resolve_certificate(&notes, &dir, CertificateCategory::Teacher, 2).unwrap();
        assert_eq!(second.label, "Ms. Ayesha");
        let third = resolve_certificate(&notes, &dir, CertificateCategory::Teacher, 3).unwrap();
        assert_eq!(third.label, "Mr. Kabir");
    }

    #[test]
    fn too_few_entries_is_not_enough_data() {
        let notes = vec![staff_note(1, 1, days_ago(3))];
        let err = resolve_certificate(&notes, &directory(), CertificateCategory::Staff, 2).unwrap_err();
        assert!(matches!(err, ApiError::NotEnoughData(_)));
    }

    #[test]
    fn rank_outside_one_to_three_is_rejected() {
        let notes = teacher_history();
        for rank in [0, 4] {
            let err = resolve_certificate(&notes, &directory(), CertificateCategory::Teacher, rank)
                .unwrap_err();
            assert!(matches!(err, ApiError::Validation { .. }));
        }
    }

    #[test]
    fn ranks_beyond_a_byte_are_rejected() {
        assert_eq!(validate_rank(3).unwrap(), 3);
        assert!(validate_rank(259).is_err());
        assert!(validate_rank(u32::MAX).is_err());
    }

    #[test]
    fn section_certificates_use_section_labels() {
        let notes = vec![
            student_note(1, Some(SIX_A), "A", SEVEN_B, days_ago(1)),
            student_note(2, Some(SIX_A), "B", SEVEN_B, days_ago(1)),
            student_note(3, Some(SIX_A), "C", SIX_A, days_ago(1)),
        ];
        let cert =
            resolve_certificate(&notes, &directory(), CertificateCategory::StudentSection, 1).unwrap();
        assert_eq!(cert.label, "7-B");
        assert_eq!(cert.count, 2);
    }

    #[test]
    fn vanished_section_cannot_be_certified() {
        let notes = vec![student_note(1, Some(SIX_A), "A", 77, days_ago(1))];
        let err = resolve_certificate(&notes, &directory(), CertificateCategory::StudentSection, 1)
            .unwrap_err();
        assert!(matches!(err, ApiError::NotEnoughData(_)));
    }

    #[test]
    fn hidden_notes_do_not_earn_certificates() {
        let mut note = teacher_note(1, 1, days_ago(1));
        note.status = NoteStatus::Hidden;
        assert!(resolve_certificate(&[note], &directory(), CertificateCategory::Teacher, 1).is_err());
    }

    #[test]
    fn category_names_parse() {
        assert_eq!(
            "student_section".parse::<CertificateCategory>().unwrap(),
            CertificateCategory::StudentSection
        );
        assert!("principal".parse::<CertificateCategory>().is_err());
    }
}
