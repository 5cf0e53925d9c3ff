use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{counts::Tally, directory::Directory};
use crate::models::{Note, ReceiverType};

const TOP_BARS: usize = 4;
const OTHERS: &str = "Others";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Bar {
    pub label: String,
    pub pct: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ChartBars {
    pub teachers: Vec<Bar>,
    pub students: Vec<Bar>,
    pub staffs: Vec<Bar>,
}

/// Rounds the exact binary value to one decimal, ties to even.
fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Top four labels with their share of the total, plus an `Others` bar for
/// the remainder when more labels exist.
///
/// Percentages are rounded individually, so the sum can drift slightly from
/// 100. The drift is left as is.
pub fn top_four_plus_others(counts: &Tally<String>) -> Vec<Bar> {
    let total = match counts.total() {
        0 => 1.0,
        total => total as f64,
    };

    let mut bars: Vec<Bar> = counts
        .top(TOP_BARS)
        .into_iter()
        .map(|(label, count)| Bar {
            label,
            pct: round_to_tenth(count as f64 * 100.0 / total),
        })
        .collect();

    let covered: f64 = bars.iter().map(|bar| bar.pct).sum();
    let others = round_to_tenth((100.0 - covered).max(0.0));
    if others > 0.0 && counts.len() > bars.len() {
        bars.push(Bar {
            label: OTHERS.to_owned(),
            pct: others,
        });
    }

    bars
}

/// Per-receiver counts keyed by display name. Notes pointing at a teacher or
/// staff member that no longer exists are skipped.
#[derive(Debug, Clone, Default)]
pub struct ReceiverCounts {
    pub teachers: Tally<String>,
    pub students: Tally<String>,
    pub staffs: Tally<String>,
}

impl ReceiverCounts {
    pub fn from_notes<'a>(notes: impl IntoIterator<Item = &'a Note>, directory: &Directory) -> Self {
        let mut counts = Self::default();

        for note in notes.into_iter().filter(|n| n.is_approved()) {
            match note.receiver_type {
                ReceiverType::Teacher => {
                    if let Some(teacher) = note.receiver_teacher_id.and_then(|id| directory.teacher(id)) {
                        counts.teachers.add(teacher.name.clone(), 1);
                    }
                }
                ReceiverType::Staff => {
                    if let Some(staff) = note.receiver_staff_id.and_then(|id| directory.staff(id)) {
                        counts.staffs.add(staff.name.clone(), 1);
                    }
                }
                ReceiverType::Student => {
                    if let Some(name) = note.receiver_name.as_deref().filter(|n| !n.is_empty()) {
                        counts.students.add(name.to_owned(), 1);
                    }
                }
            }
        }

        counts
    }
}

pub fn receiver_bars(notes: &[Note], directory: &Directory) -> ChartBars {
    let counts = ReceiverCounts::from_notes(notes, directory);

    ChartBars {
        teachers: top_four_plus_others(&counts.teachers),
        students: top_four_plus_others(&counts.students),
        staffs: top_four_plus_others(&counts.staffs),
    }
}
