use axum::{Json, extract::State};
use chrono::Utc;
use tracing::instrument;

use common::database::{
    queries::{load_approved_notes, load_directory},
    rows::map_winner_row,
};
use common::models::{NoteStatus, Winner};
use common::tally::{PeriodLeaders, compute_leaders, receiver_bars, top_lists};

use crate::{
    AppState,
    models::home::{HomeResponse, LeadersResponse, SchoolInfo, StatusCounts},
    utils::{database::notes_with_status, error::Result},
};

const RECENT_NOTES: i64 = 5;

#[utoipa::path(
    get,
    path = "/v1/home",
    responses(
        (status = 200, description = "Status counts, recent notes and current leaders", body = HomeResponse)
    ),
    security(("session" = [])),
    tag = "leaders"
)]
#[instrument(skip(state))]
pub async fn get_home(State(state): State<AppState>) -> Result<Json<HomeResponse>> {
    let client = state.pool.get().await?;

    let mut counts = StatusCounts::default();
    for row in client
        .query("SELECT status, COUNT(*) AS total FROM notes GROUP BY status", &[])
        .await?
    {
        let status: String = row.get("status");
        counts.record(status.parse::<NoteStatus>()?, row.get("total"));
    }

    let recent = notes_with_status(&client, NoteStatus::Approved, Some(RECENT_NOTES)).await?;
    let notes = load_approved_notes(&client).await?;
    let directory = load_directory(&client).await?;

    Ok(Json(HomeResponse {
        school: SchoolInfo::from(state.config.as_ref()),
        counts,
        recent,
        leaders: compute_leaders(&notes, &directory, Utc::now()),
    }))
}

#[utoipa::path(
    get,
    path = "/v1/leaders",
    responses(
        (status = 200, description = "Top-10 lists and receiver bars over all approved notes", body = LeadersResponse)
    ),
    security(("session" = [])),
    tag = "leaders"
)]
#[instrument(skip(state))]
pub async fn get_leaders(State(state): State<AppState>) -> Result<Json<LeadersResponse>> {
    let client = state.pool.get().await?;
    let notes = load_approved_notes(&client).await?;
    let directory = load_directory(&client).await?;

    Ok(Json(LeadersResponse {
        lists: top_lists(&notes, &directory),
        bars: receiver_bars(&notes, &directory),
    }))
}

#[utoipa::path(
    get,
    path = "/v1/leaders/periods",
    responses(
        (status = 200, description = "Winners for the weekly, monthly, yearly and all-time windows", body = [PeriodLeaders])
    ),
    security(("session" = [])),
    tag = "leaders"
)]
#[instrument(skip(state))]
pub async fn get_period_leaders(State(state): State<AppState>) -> Result<Json<Vec<PeriodLeaders>>> {
    let client = state.pool.get().await?;
    let notes = load_approved_notes(&client).await?;
    let directory = load_directory(&client).await?;

    Ok(Json(compute_leaders(&notes, &directory, Utc::now())))
}

#[utoipa::path(
    get,
    path = "/v1/winners",
    responses(
        (status = 200, description = "Latest materialized winners", body = [Winner])
    ),
    security(("session" = [])),
    tag = "leaders"
)]
pub async fn get_winners(State(state): State<AppState>) -> Result<Json<Vec<Winner>>> {
    let client = state.pool.get().await?;
    let rows = client
        .query(
            "SELECT id, period_type, category, period_label, rank, title, description, points, created_at
             FROM winners
             ORDER BY created_at DESC, id ASC",
            &[],
        )
        .await?;

    Ok(Json(rows.iter().map(map_winner_row).collect::<Result<_>>()?))
}
