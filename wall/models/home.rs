use serde::Serialize;
use utoipa::ToSchema;

use common::models::{Note, NoteStatus};
use common::tally::{ChartBars, PeriodLeaders, TopLists};
use common::utils::config::Config;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusCounts {
    pub pending: i64,
    pub approved: i64,
    pub hidden: i64,
}

impl StatusCounts {
    pub fn record(&mut self, status: NoteStatus, count: i64) {
        match status {
            NoteStatus::Pending => self.pending += count,
            NoteStatus::Approved => self.approved += count,
            NoteStatus::Hidden => self.hidden += count,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SchoolInfo {
    pub name: String,
    pub motto: String,
    pub session: String,
}

impl From<&Config> for SchoolInfo {
    fn from(config: &Config) -> Self {
        Self {
            name: config.school_name.clone(),
            motto: config.school_motto.clone(),
            session: config.school_session.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HomeResponse {
    pub school: SchoolInfo,
    pub counts: StatusCounts,
    pub recent: Vec<Note>,
    pub leaders: Vec<PeriodLeaders>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LeadersResponse {
    #[serde(flatten)]
    pub lists: TopLists,
    pub bars: ChartBars,
}
