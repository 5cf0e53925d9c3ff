mod auth;
mod utils;
mod models;
mod handlers;
mod middleware;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{
    Json, Router,
    middleware::{from_fn, from_fn_with_state},
    response::Html,
    routing::{delete, get, post},
};
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{EnvFilter, fmt};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_scalar::Scalar;

use common::database::connection::DbPool;
use common::utils::config::Config;

use auth::SessionKeys;
use handlers::{
    admin::{add_section, add_staff, add_teacher, delete_note, get_panel, moderate_note},
    certificates::{get_certificate, print_certificate},
    directory::{get_sections, get_staff, get_teachers},
    leaders::{get_home, get_leaders, get_period_leaders, get_winners},
    notes::{get_wall, post_staff_note, post_student_note, post_teacher_note},
    sessions::{admin_login, login, me, register, unlock},
};
use middleware::{request_logger, require_unlock};
use utils::error::Result;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<Config>,
    pub sessions: Arc<SessionKeys>,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config) -> Self {
        let sessions = Arc::new(SessionKeys::from_config(&config));
        Self {
            pool,
            config: Arc::new(config),
            sessions,
        }
    }
}

struct SessionSecurity;

impl Modify for SessionSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Kindness Wall",
        description = "Appreciation notes, moderation, leaderboards and certificates for a school kindness wall.",
        version = "0.1.0",
        license(
            name = "MIT OR Apache-2.0",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        handlers::sessions::unlock,
        handlers::sessions::register,
        handlers::sessions::login,
        handlers::sessions::me,
        handlers::sessions::admin_login,
        handlers::leaders::get_home,
        handlers::leaders::get_leaders,
        handlers::leaders::get_period_leaders,
        handlers::leaders::get_winners,
        handlers::directory::get_sections,
        handlers::directory::get_teachers,
        handlers::directory::get_staff,
        handlers::notes::post_student_note,
        handlers::notes::post_teacher_note,
        handlers::notes::post_staff_note,
        handlers::notes::get_wall,
        handlers::certificates::get_certificate,
        handlers::certificates::print_certificate,
        handlers::admin::get_panel,
        handlers::admin::moderate_note,
        handlers::admin::delete_note,
        handlers::admin::add_section,
        handlers::admin::add_teacher,
        handlers::admin::add_staff,
    ),
    components(
        schemas(
            common::models::Note,
            common::models::ClassSection,
            common::models::Teacher,
            common::models::Staff,
            common::models::Winner,
            common::models::Account,
            common::tally::Bar,
            common::tally::ChartBars,
            common::tally::PeriodLeaders,
            common::tally::TopLists,
            common::tally::Certificate,
            models::note::StudentNoteForm,
            models::note::TeacherNoteForm,
            models::note::StaffNoteForm,
            models::note::WallFilter,
            models::note::WallResponse,
            models::home::HomeResponse,
            models::home::LeadersResponse,
            models::admin::AdminPanel,
            models::admin::NewSectionRequest,
            models::admin::NewTeacherRequest,
            models::admin::NewStaffRequest,
            models::session::SessionResponse,
            models::session::LoginResponse,
            models::session::AdminLoginRequest,
            models::session::RegisterRequest,
            models::session::LoginRequest,
        )
    ),
    modifiers(&SessionSecurity),
    tags(
        (name = "sessions", description = "Unlocking the wall and member accounts"),
        (name = "notes", description = "Submitting and reading appreciation notes"),
        (name = "leaders", description = "Leaderboards, period winners and the home summary"),
        (name = "directory", description = "Sections, teachers and staff"),
        (name = "certificates", description = "Certificate winners"),
        (name = "admin", description = "Moderation and directory management"),
    )
)]
struct ApiDoc;

async fn serve_docs() -> Html<String> {
    Html(Scalar::new(ApiDoc::openapi()).to_html())
}

async fn serve_openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/lock", post(unlock))
        .route("/v1/auth/register", post(register))
        .route("/v1/auth/login", post(login))
        .route("/v1/auth/me", get(me))
        .route("/v1/home", get(get_home))
        .route("/v1/sections", get(get_sections))
        .route("/v1/teachers", get(get_teachers))
        .route("/v1/staff", get(get_staff))
        .route("/v1/notes/student", post(post_student_note))
        .route("/v1/notes/teacher", post(post_teacher_note))
        .route("/v1/notes/staff", post(post_staff_note))
        .route("/v1/wall", get(get_wall))
        .route("/v1/leaders", get(get_leaders))
        .route("/v1/leaders/periods", get(get_period_leaders))
        .route("/v1/winners", get(get_winners))
        .route("/v1/certificates/{category}/{rank}", get(get_certificate))
        .route("/v1/certificates/{category}/{rank}/print", get(print_certificate))
        .route("/v1/admin/login", post(admin_login))
        .route("/v1/admin/panel", get(get_panel))
        .route("/v1/admin/notes/{id}", delete(delete_note))
        .route("/v1/admin/notes/{id}/{action}", post(moderate_note))
        .route("/v1/admin/sections", post(add_section))
        .route("/v1/admin/teachers", post(add_teacher))
        .route("/v1/admin/staff", post(add_staff))
        .route("/api-docs/openapi.json", get(serve_openapi_json))
        .route("/v1/docs", get(serve_docs))
        .layer(from_fn_with_state(state.clone(), require_unlock))
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(request_logger))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => tracing::error!("Failed to install terminate handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .expect("Failed to install crypto provider");

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let pool = common::database::connection::create_pool(&config).await?;
    let port = config.api_port;

    let app = create_router(AppState::new(pool, config));

    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Kindness Wall starting on {addr}");
    tracing::info!("API documentation available at http://localhost:{port}/v1/docs");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
