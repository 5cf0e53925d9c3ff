use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;

use common::database::{
    queries::{NOTE_COLUMNS, load_directory},
    rows::map_note_row,
};
use common::models::{Note, NoteStatus, ReceiverType};
use common::tally::receiver_bars;

use crate::{
    AppState,
    models::note::{NewNote, StaffNoteForm, StudentNoteForm, TeacherNoteForm, WallFilter, WallResponse},
    utils::{
        database::{QueryBuilder, ensure_note_references, insert_note},
        error::Result,
        extract::{Payload, QueryParams},
    },
};

async fn submit(state: &AppState, note: NewNote) -> Result<(StatusCode, Json<Note>)> {
    let client = state.pool.get().await?;
    ensure_note_references(&client, &note).await?;
    let note = insert_note(&client, &note).await?;

    tracing::info!(
        note_id = note.id,
        receiver_type = note.receiver_type.as_str(),
        weight = note.weight_applied,
        "Note submitted for review"
    );

    Ok((StatusCode::CREATED, Json(note)))
}

#[utoipa::path(
    post,
    path = "/v1/notes/student",
    request_body = StudentNoteForm,
    responses(
        (status = 201, description = "Pending note for a student", body = Note),
        (status = 400, description = "Missing fields or unknown section")
    ),
    security(("session" = [])),
    tag = "notes"
)]
#[instrument(skip_all)]
pub async fn post_student_note(
    State(state): State<AppState>,
    Payload(form): Payload<StudentNoteForm>,
) -> Result<(StatusCode, Json<Note>)> {
    submit(&state, form.validate()?).await
}

#[utoipa::path(
    post,
    path = "/v1/notes/teacher",
    request_body = TeacherNoteForm,
    responses(
        (status = 201, description = "Pending note for a teacher", body = Note),
        (status = 400, description = "Missing fields or unknown teacher")
    ),
    security(("session" = [])),
    tag = "notes"
)]
#[instrument(skip_all)]
pub async fn post_teacher_note(
    State(state): State<AppState>,
    Payload(form): Payload<TeacherNoteForm>,
) -> Result<(StatusCode, Json<Note>)> {
    submit(&state, form.validate()?).await
}

#[utoipa::path(
    post,
    path = "/v1/notes/staff",
    request_body = StaffNoteForm,
    responses(
        (status = 201, description = "Pending note for a staff member", body = Note),
        (status = 400, description = "Missing fields or unknown staff member")
    ),
    security(("session" = [])),
    tag = "notes"
)]
#[instrument(skip_all)]
pub async fn post_staff_note(
    State(state): State<AppState>,
    Payload(form): Payload<StaffNoteForm>,
) -> Result<(StatusCode, Json<Note>)> {
    submit(&state, form.validate()?).await
}

#[utoipa::path(
    get,
    path = "/v1/wall",
    params(WallFilter),
    responses(
        (status = 200, description = "Approved notes, newest first, with receiver bars", body = WallResponse),
        (status = 400, description = "Invalid filter")
    ),
    security(("session" = [])),
    tag = "notes"
)]
#[instrument(skip(state))]
pub async fn get_wall(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<WallFilter>,
) -> Result<Json<WallResponse>> {
    let mut query_builder = QueryBuilder::new();
    query_builder.add_condition("status = ${}", NoteStatus::Approved.as_str().to_owned());

    if let Some(receiver_type) = filter.receiver_type.as_deref().filter(|t| !t.is_empty()) {
        let receiver_type: ReceiverType = receiver_type.parse()?;
        query_builder.add_condition("receiver_type = ${}", receiver_type.as_str().to_owned());
    }

    query_builder.add_date_range_condition(
        "created_at",
        filter.from_date.as_deref(),
        filter.to_date.as_deref(),
    )?;

    let limit = filter
        .limit
        .unwrap_or(state.config.wall_limit)
        .min(state.config.wall_limit);
    let limit_index = query_builder.bind(i64::from(limit));

    let query = format!(
        "SELECT {NOTE_COLUMNS} FROM notes {} ORDER BY created_at DESC, id DESC LIMIT ${limit_index}",
        query_builder.build_where_clause()
    );

    let client = state.pool.get().await?;
    let rows = client.query(&query, &query_builder.params()).await?;
    let notes = rows.iter().map(map_note_row).collect::<Result<Vec<Note>>>()?;

    let directory = load_directory(&client).await?;
    let bars = receiver_bars(&notes, &directory);

    Ok(Json(WallResponse { notes, bars }))
}
