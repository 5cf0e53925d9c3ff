use chrono::{DateTime, Utc};

use super::{board::WindowTallies, counts::Tally, directory::Directory, period::Period};
use crate::models::{NewWinner, Note, ReceiverType, WinnerCategory};

const WINNERS_PER_CATEGORY: usize = 3;

fn winner_rows(
    period: Period,
    period_label: &str,
    category: WinnerCategory,
    ranked: Vec<(String, Option<String>, i64)>,
) -> impl Iterator<Item = NewWinner> + '_ {
    ranked
        .into_iter()
        .zip(1..)
        .map(move |((name, qualifier, points), rank)| {
            let title = match qualifier {
                Some(qualifier) => format!("{} #{rank} ({qualifier})", category.title()),
                None => format!("{} #{rank}", category.title()),
            };

            NewWinner {
                period_type: period,
                category,
                period_label: period_label.to_owned(),
                rank,
                title,
                description: format!("{name} with {points} points"),
                points,
            }
        })
}

fn labelled(tally: &Tally<i32>, label: impl Fn(i32) -> String) -> Vec<(String, Option<String>, i64)> {
    tally
        .top(WINNERS_PER_CATEGORY)
        .into_iter()
        .map(|(key, points)| (label(key), None, points))
        .collect()
}

/// Snapshot of the top three in every category for every period.
pub fn materialize_winners(notes: &[Note], directory: &Directory, now: DateTime<Utc>) -> Vec<NewWinner> {
    let mut winners = Vec::new();

    for period in Period::ALL {
        let window = period.window(now);
        let period_label = period.label(now);
        let in_window: Vec<&Note> = notes
            .iter()
            .filter(|n| n.is_approved() && window.contains(n.created_at))
            .collect();

        let tallies = WindowTallies::from_notes(in_window.iter().copied());

        let students: Tally<(String, Option<i32>)> = in_window
            .iter()
            .filter(|n| n.receiver_type == ReceiverType::Student)
            .filter_map(|n| {
                n.receiver_name
                    .as_ref()
                    .filter(|name| !name.is_empty())
                    .map(|name| ((name.clone(), n.receiver_section_id), 1))
            })
            .collect();
        let staff: Tally<i32> = in_window
            .iter()
            .filter(|n| n.receiver_type == ReceiverType::Staff)
            .filter_map(|n| n.receiver_staff_id.map(|id| (id, 1)))
            .collect();

        let top_students: Vec<(String, Option<String>, i64)> = students
            .top(WINNERS_PER_CATEGORY)
            .into_iter()
            .map(|((name, section), points)| {
                (name, Some(directory.optional_section_label(section)), points)
            })
            .collect();

        let section_label = |id: i32| directory.section_label(id);
        let categories = [
            (WinnerCategory::TopStudent, top_students),
            (
                WinnerCategory::AppreciatedSection,
                labelled(&tallies.appreciated_sections, section_label),
            ),
            (
                WinnerCategory::AppreciatorSection,
                labelled(&tallies.appreciator_sections, section_label),
            ),
            (
                WinnerCategory::TopTeacher,
                labelled(&tallies.teachers, |id| directory.teacher_label(id)),
            ),
            (
                WinnerCategory::TopStaff,
                labelled(&staff, |id| directory.staff_label(id)),
            ),
        ];

        for (category, ranked) in categories {
            winners.extend(winner_rows(period, &period_label, category, ranked));
        }
    }

    winners
}
