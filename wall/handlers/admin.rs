use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;

use common::database::{
    queries::{NOTE_COLUMNS, list_sections, list_staff, list_teachers},
    rows::{map_note_row, map_section_row, map_staff_row, map_teacher_row},
};
use common::models::{ClassSection, Note, NoteAction, NoteStatus, Staff, Teacher};

use crate::{
    AppState,
    auth::AdminSession,
    models::admin::{AdminPanel, NewSectionRequest, NewStaffRequest, NewTeacherRequest},
    utils::{
        database::notes_with_status,
        error::{ApiError, Result},
        extract::{PathParams, Payload},
    },
};

#[utoipa::path(
    get,
    path = "/v1/admin/panel",
    responses(
        (status = 200, description = "Notes by status plus the directory", body = AdminPanel),
        (status = 401, description = "Admin session required")
    ),
    security(("session" = [])),
    tag = "admin"
)]
#[instrument(skip_all)]
pub async fn get_panel(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Result<Json<AdminPanel>> {
    let client = state.pool.get().await?;

    Ok(Json(AdminPanel {
        pending: notes_with_status(&client, NoteStatus::Pending, None).await?,
        approved: notes_with_status(&client, NoteStatus::Approved, None).await?,
        hidden: notes_with_status(&client, NoteStatus::Hidden, None).await?,
        sections: list_sections(&client).await?,
        teachers: list_teachers(&client).await?,
        staff: list_staff(&client).await?,
    }))
}

#[utoipa::path(
    post,
    path = "/v1/admin/notes/{id}/{action}",
    params(
        ("id" = i32, Path, description = "Note id"),
        ("action" = String, Path, description = "approve, hide or unhide")
    ),
    responses(
        (status = 200, description = "Note after the action", body = Note),
        (status = 400, description = "Unknown action"),
        (status = 401, description = "Admin session required"),
        (status = 404, description = "Note not found")
    ),
    security(("session" = [])),
    tag = "admin"
)]
#[instrument(skip(state, _admin))]
pub async fn moderate_note(
    State(state): State<AppState>,
    _admin: AdminSession,
    PathParams((id, action)): PathParams<(i32, String)>,
) -> Result<Json<Note>> {
    let action: NoteAction = action.parse()?;
    let status = action.target_status();

    let client = state.pool.get().await?;
    let row = client
        .query_opt(
            &format!("UPDATE notes SET status = $1 WHERE id = $2 RETURNING {NOTE_COLUMNS}"),
            &[&status.as_str(), &id],
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Note", id))?;

    tracing::info!(note_id = id, status = %status, "Note moderated");
    Ok(Json(map_note_row(&row)?))
}

#[utoipa::path(
    delete,
    path = "/v1/admin/notes/{id}",
    params(("id" = i32, Path, description = "Note id")),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 401, description = "Admin session required"),
        (status = 404, description = "Note not found")
    ),
    security(("session" = [])),
    tag = "admin"
)]
#[instrument(skip(state, _admin))]
pub async fn delete_note(
    State(state): State<AppState>,
    _admin: AdminSession,
    PathParams(id): PathParams<i32>,
) -> Result<StatusCode> {
    let client = state.pool.get().await?;
    let deleted = client.execute("DELETE FROM notes WHERE id = $1", &[&id]).await?;

    if deleted == 0 {
        return Err(ApiError::not_found("Note", id));
    }

    tracing::info!(note_id = id, "Note deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/v1/admin/sections",
    request_body = NewSectionRequest,
    responses(
        (status = 201, description = "Section added", body = ClassSection),
        (status = 400, description = "Class or section missing"),
        (status = 409, description = "Section already exists")
    ),
    security(("session" = [])),
    tag = "admin"
)]
#[instrument(skip_all)]
pub async fn add_section(
    State(state): State<AppState>,
    _admin: AdminSession,
    Payload(request): Payload<NewSectionRequest>,
) -> Result<(StatusCode, Json<ClassSection>)> {
    let (class_name, section_name) = request.normalized()?;

    let client = state.pool.get().await?;
    let row = client
        .query_opt(
            "INSERT INTO class_sections (class_name, section_name) VALUES ($1, $2)
             ON CONFLICT (class_name, section_name) DO NOTHING
             RETURNING id, class_name, section_name",
            &[&class_name, &section_name],
        )
        .await?
        .ok_or_else(|| ApiError::Conflict("Section exists.".to_owned()))?;

    Ok((StatusCode::CREATED, Json(map_section_row(&row))))
}

#[utoipa::path(
    post,
    path = "/v1/admin/teachers",
    request_body = NewTeacherRequest,
    responses(
        (status = 201, description = "Teacher added", body = Teacher),
        (status = 400, description = "Name or subject missing"),
        (status = 409, description = "Teacher already exists")
    ),
    security(("session" = [])),
    tag = "admin"
)]
#[instrument(skip_all)]
pub async fn add_teacher(
    State(state): State<AppState>,
    _admin: AdminSession,
    Payload(request): Payload<NewTeacherRequest>,
) -> Result<(StatusCode, Json<Teacher>)> {
    let (name, subject) = request.normalized()?;

    let client = state.pool.get().await?;
    let row = client
        .query_opt(
            "INSERT INTO teachers (name, subject) VALUES ($1, $2)
             ON CONFLICT (name, subject) DO NOTHING
             RETURNING id, name, subject",
            &[&name, &subject],
        )
        .await?
        .ok_or_else(|| ApiError::Conflict("Teacher exists.".to_owned()))?;

    Ok((StatusCode::CREATED, Json(map_teacher_row(&row))))
}

#[utoipa::path(
    post,
    path = "/v1/admin/staff",
    request_body = NewStaffRequest,
    responses(
        (status = 201, description = "Staff member added", body = Staff),
        (status = 400, description = "Name or role missing"),
        (status = 409, description = "Staff member already exists")
    ),
    security(("session" = [])),
    tag = "admin"
)]
#[instrument(skip_all)]
pub async fn add_staff(
    State(state): State<AppState>,
    _admin: AdminSession,
    Payload(request): Payload<NewStaffRequest>,
) -> Result<(StatusCode, Json<Staff>)> {
    let (name, role) = request.normalized()?;

    let client = state.pool.get().await?;
    let row = client
        .query_opt(
            "INSERT INTO staff (name, role) VALUES ($1, $2)
             ON CONFLICT (name, role) DO NOTHING
             RETURNING id, name, role",
            &[&name, &role],
        )
        .await?
        .ok_or_else(|| ApiError::Conflict("Staff member exists.".to_owned()))?;

    Ok((StatusCode::CREATED, Json(map_staff_row(&row))))
}
