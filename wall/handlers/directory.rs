use axum::{Json, extract::State};

use common::database::queries::{list_sections, list_staff, list_teachers};
use common::models::{ClassSection, Staff, Teacher};

use crate::{AppState, utils::error::Result};

#[utoipa::path(
    get,
    path = "/v1/sections",
    responses(
        (status = 200, description = "Class sections ordered by class then section", body = [ClassSection])
    ),
    security(("session" = [])),
    tag = "directory"
)]
pub async fn get_sections(State(state): State<AppState>) -> Result<Json<Vec<ClassSection>>> {
    let client = state.pool.get().await?;
    Ok(Json(list_sections(&client).await?))
}

#[utoipa::path(
    get,
    path = "/v1/teachers",
    responses(
        (status = 200, description = "Teachers ordered by name", body = [Teacher])
    ),
    security(("session" = [])),
    tag = "directory"
)]
pub async fn get_teachers(State(state): State<AppState>) -> Result<Json<Vec<Teacher>>> {
    let client = state.pool.get().await?;
    Ok(Json(list_teachers(&client).await?))
}

#[utoipa::path(
    get,
    path = "/v1/staff",
    responses(
        (status = 200, description = "Staff ordered by name", body = [Staff])
    ),
    security(("session" = [])),
    tag = "directory"
)]
pub async fn get_staff(State(state): State<AppState>) -> Result<Json<Vec<Staff>>> {
    let client = state.pool.get().await?;
    Ok(Json(list_staff(&client).await?))
}
