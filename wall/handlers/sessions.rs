use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use common::database::rows::map_account_row;
use common::models::Account;

use crate::{
    AppState,
    auth::{MemberSession, SessionKind},
    models::session::{
        AdminLoginRequest, LoginRequest, LoginResponse, RegisterRequest, SessionResponse,
    },
    utils::{
        database::{Referenced, ensure_exists},
        error::{ApiError, Result},
        extract::Payload,
    },
};

const ACCOUNT_COLUMNS: &str = "id, role, name, username, class_section_id, created_at";

#[utoipa::path(
    post,
    path = "/v1/lock",
    responses(
        (status = 200, description = "Guest session unlocking the wall", body = SessionResponse)
    ),
    tag = "sessions"
)]
#[instrument(skip(state))]
pub async fn unlock(State(state): State<AppState>) -> Result<Json<SessionResponse>> {
    let issued = state.sessions.issue(SessionKind::Guest, state.sessions.ttl)?;
    Ok(Json(issued.into()))
}

#[utoipa::path(
    post,
    path = "/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = Account),
        (status = 400, description = "Missing fields, invalid role or unknown section"),
        (status = 409, description = "Username already taken")
    ),
    tag = "sessions"
)]
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Payload(request): Payload<RegisterRequest>,
) -> Result<(StatusCode, Json<Account>)> {
    let account = request.validate()?;
    let client = state.pool.get().await?;

    if let Some(section) = account.class_section_id {
        ensure_exists(&client, Referenced::Section, section).await?;
    }

    let row = client
        .query_opt(
            &format!(
                "INSERT INTO accounts (role, name, username, password_hash, class_section_id)
                 VALUES ($1, $2, $3, crypt($4, gen_salt('bf')), $5)
                 ON CONFLICT (username) DO NOTHING
                 RETURNING {ACCOUNT_COLUMNS}"
            ),
            &[
                &account.role.as_str(),
                &account.name,
                &account.username,
                &account.password,
                &account.class_section_id,
            ],
        )
        .await?
        .ok_or_else(|| ApiError::Conflict("Username already taken.".to_owned()))?;

    let account = map_account_row(&row)?;
    tracing::info!(account_id = account.id, role = account.role.as_str(), "Account registered");

    Ok((StatusCode::CREATED, Json(account)))
}

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Member session", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "sessions"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Payload(request): Payload<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let username = request.username.trim().to_lowercase();
    let client = state.pool.get().await?;

    let row = client
        .query_opt(
            &format!(
                "SELECT {ACCOUNT_COLUMNS} FROM accounts
                 WHERE username = $1 AND password_hash = crypt($2, password_hash)"
            ),
            &[&username, &request.password],
        )
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password.".to_owned()))?;
    let account = map_account_row(&row)?;

    let lifetime = if request.remember {
        state.sessions.remember_ttl
    } else {
        state.sessions.ttl
    };
    let issued = state.sessions.issue(
        SessionKind::Member {
            account_id: account.id,
        },
        lifetime,
    )?;

    Ok(Json(LoginResponse {
        session: issued.into(),
        account,
    }))
}

#[utoipa::path(
    get,
    path = "/v1/auth/me",
    responses(
        (status = 200, description = "Signed-in account", body = Account),
        (status = 401, description = "Not signed in")
    ),
    security(("session" = [])),
    tag = "sessions"
)]
pub async fn me(State(state): State<AppState>, member: MemberSession) -> Result<Json<Account>> {
    let client = state.pool.get().await?;
    let row = client
        .query_opt(
            &format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"),
            &[&member.account_id],
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Account", member.account_id))?;

    Ok(Json(map_account_row(&row)?))
}

#[utoipa::path(
    post,
    path = "/v1/admin/login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Admin session", body = SessionResponse),
        (status = 401, description = "Wrong PIN")
    ),
    security(("session" = [])),
    tag = "admin"
)]
#[instrument(skip_all)]
pub async fn admin_login(
    State(state): State<AppState>,
    Payload(request): Payload<AdminLoginRequest>,
) -> Result<Json<SessionResponse>> {
    if request.pin.trim() != state.config.admin_pin {
        tracing::warn!("Rejected admin PIN");
        return Err(ApiError::Unauthorized("Wrong PIN.".to_owned()));
    }

    let issued = state.sessions.issue(SessionKind::Admin, state.sessions.ttl)?;
    Ok(Json(issued.into()))
}
