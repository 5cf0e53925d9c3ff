use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    counts::Tally,
    directory::Directory,
    period::{Period, Window},
};
use crate::models::{GiverType, Note, ReceiverType};

const TOP_LIST_SIZE: usize = 10;

/// The three per-window frequency maps, keyed by section or teacher id.
#[derive(Debug, Clone, Default)]
pub struct WindowTallies {
    /// Receiver section → notes received by its students.
    pub appreciated_sections: Tally<i32>,
    /// Giver section → weighted notes given by its students.
    pub appreciator_sections: Tally<i32>,
    /// Teacher → notes received.
    pub teachers: Tally<i32>,
}

impl WindowTallies {
    /// Counts approved notes only; anything else in `notes` is ignored.
    pub fn from_notes<'a>(notes: impl IntoIterator<Item = &'a Note>) -> Self {
        let mut tallies = Self::default();

        for note in notes.into_iter().filter(|n| n.is_approved()) {
            if note.receiver_type == ReceiverType::Student {
                if let Some(section) = note.receiver_section_id {
                    tallies.appreciated_sections.add(section, 1);
                }
            }
            if note.giver_type == GiverType::Student {
                if let Some(section) = note.giver_section_id {
                    tallies.appreciator_sections.add(section, note.effective_weight());
                }
            }
            if note.receiver_type == ReceiverType::Teacher {
                if let Some(teacher) = note.receiver_teacher_id {
                    tallies.teachers.add(teacher, 1);
                }
            }
        }

        tallies
    }

    pub fn for_window(notes: &[Note], window: &Window) -> Self {
        Self::from_notes(notes.iter().filter(|n| window.contains(n.created_at)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WinnerSummary {
    pub key: i32,
    pub label: String,
    pub count: i64,
    /// `"{label} — {count}"`, ready for display.
    pub summary: String,
}

impl WinnerSummary {
    fn new(key: i32, label: String, count: i64) -> Self {
        let summary = format!("{label} — {count}");
        Self {
            key,
            label,
            count,
            summary,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PeriodLeaders {
    pub period: Period,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub top_appreciated_section: Option<WinnerSummary>,
    pub top_appreciator_section: Option<WinnerSummary>,
    pub top_teacher: Option<WinnerSummary>,
}

fn leader_summary(tally: &Tally<i32>, label: impl Fn(i32) -> String) -> Option<WinnerSummary> {
    tally
        .leader()
        .map(|(&key, count)| WinnerSummary::new(key, label(key), count))
}

/// One set of winners per period, in `Period::ALL` order.
pub fn compute_leaders(notes: &[Note], directory: &Directory, now: DateTime<Utc>) -> Vec<PeriodLeaders> {
    Period::ALL
        .into_iter()
        .map(|period| {
            let window = period.window(now);
            let tallies = WindowTallies::for_window(notes, &window);

            PeriodLeaders {
                period,
                start: window.start,
                end: window.end,
                top_appreciated_section: leader_summary(&tallies.appreciated_sections, |id| {
                    directory.section_label(id)
                }),
                top_appreciator_section: leader_summary(&tallies.appreciator_sections, |id| {
                    directory.section_label(id)
                }),
                top_teacher: leader_summary(&tallies.teachers, |id| directory.teacher_label(id)),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RankedEntry {
    pub key: i32,
    pub label: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TopLists {
    pub top_appreciator_sections: Vec<RankedEntry>,
    pub top_appreciated_sections: Vec<RankedEntry>,
    pub top_teachers: Vec<RankedEntry>,
}

fn ranked_entries(tally: &Tally<i32>, label: impl Fn(i32) -> String) -> Vec<RankedEntry> {
    tally
        .top(TOP_LIST_SIZE)
        .into_iter()
        .map(|(key, count)| RankedEntry {
            key,
            label: label(key),
            count,
        })
        .collect()
}

/// Top ten of each category across every approved note, regardless of date.
pub fn top_lists(notes: &[Note], directory: &Directory) -> TopLists {
    let tallies = WindowTallies::from_notes(notes);

    TopLists {
        top_appreciator_sections: ranked_entries(&tallies.appreciator_sections, |id| {
            directory.section_label(id)
        }),
        top_appreciated_sections: ranked_entries(&tallies.appreciated_sections, |id| {
            directory.section_label(id)
        }),
        top_teachers: ranked_entries(&tallies.teachers, |id| directory.teacher_label(id)),
    }
}
