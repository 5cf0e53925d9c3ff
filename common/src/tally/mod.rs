//! Leaderboard aggregation over approved notes.
//!
//! Everything here is pure: callers load notes and the directory from the
//! database, pass in `now`, and get rankings back. Nothing is cached between
//! calls.

pub mod board;
pub mod chart;
pub mod crown;
pub mod counts;
pub mod period;
pub mod directory;
pub mod certificate;

pub use board::{PeriodLeaders, RankedEntry, TopLists, WindowTallies, WinnerSummary, compute_leaders, top_lists};
pub use certificate::{Certificate, CertificateCategory, resolve_certificate};
pub use chart::{Bar, ChartBars, receiver_bars, top_four_plus_others};
pub use counts::Tally;
pub use crown::materialize_winners;
pub use directory::Directory;
pub use period::{Period, Window};

#[cfg(test)]
pub(crate) mod fixtures;
