use axum::{
    Json,
    extract::State,
    response::Html,
};
use chrono::Utc;
use tracing::instrument;

use common::database::queries::{load_approved_notes, load_directory};
use common::tally::{
    Certificate, CertificateCategory, certificate::validate_rank, resolve_certificate,
};
use common::utils::config::Config;

use crate::{
    AppState,
    utils::{error::Result, extract::PathParams},
};

async fn load_certificate(state: &AppState, category: &str, rank: u32) -> Result<Certificate> {
    let category: CertificateCategory = category.parse()?;
    let rank = validate_rank(rank)?;

    let client = state.pool.get().await?;
    let notes = load_approved_notes(&client).await?;
    let directory = load_directory(&client).await?;

    resolve_certificate(&notes, &directory, category, rank)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn ordinal(rank: u8) -> &'static str {
    match rank {
        1 => "1st",
        2 => "2nd",
        _ => "3rd",
    }
}

pub(crate) fn render_certificate(certificate: &Certificate, config: &Config, issued: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} | {school}</title>
<style>
  body {{ font-family: Georgia, serif; background: #fdfaf3; margin: 0; }}
  .certificate {{ margin: 40px auto; max-width: 820px; padding: 48px; border: 12px double #b08d57; text-align: center; background: #fff; }}
  h1 {{ font-size: 2.4em; margin: 0.2em 0; }}
  .name {{ font-size: 2em; font-weight: bold; margin: 0.6em 0; }}
  .meta {{ color: #555; }}
  @media print {{ body {{ background: #fff; }} .certificate {{ margin: 0; }} }}
</style>
</head>
<body onload="window.print()">
<div class="certificate">
  <p class="meta">{school}<br><em>{motto}</em></p>
  <h1>Certificate of Kindness</h1>
  <p>{title} &middot; {place} place</p>
  <p>This certificate is proudly presented to</p>
  <p class="name">{label}</p>
  <p>for receiving {count} appreciation notes on the Kindness Wall.</p>
  <p class="meta">Session {session} &middot; Issued {issued}</p>
</div>
</body>
</html>
"#,
        title = certificate.category.title(),
        place = ordinal(certificate.rank),
        label = escape_html(&certificate.label),
        count = certificate.count,
        school = escape_html(&config.school_name),
        motto = escape_html(&config.school_motto),
        session = escape_html(&config.school_session),
        issued = issued,
    )
}

#[utoipa::path(
    get,
    path = "/v1/certificates/{category}/{rank}",
    params(
        ("category" = String, Path, description = "teacher, staff or student_section"),
        ("rank" = u32, Path, description = "Place from 1 to 3")
    ),
    responses(
        (status = 200, description = "Certificate winner", body = Certificate),
        (status = 400, description = "Unknown category or rank out of range"),
        (status = 422, description = "Not enough data for this place")
    ),
    security(("session" = [])),
    tag = "certificates"
)]
#[instrument(skip(state))]
pub async fn get_certificate(
    State(state): State<AppState>,
    PathParams((category, rank)): PathParams<(String, u32)>,
) -> Result<Json<Certificate>> {
    Ok(Json(load_certificate(&state, &category, rank).await?))
}

#[utoipa::path(
    get,
    path = "/v1/certificates/{category}/{rank}/print",
    params(
        ("category" = String, Path, description = "teacher, staff or student_section"),
        ("rank" = u32, Path, description = "Place from 1 to 3")
    ),
    responses(
        (status = 200, description = "Printable certificate", body = String, content_type = "text/html"),
        (status = 400, description = "Unknown category or rank out of range"),
        (status = 422, description = "Not enough data for this place")
    ),
    security(("session" = [])),
    tag = "certificates"
)]
#[instrument(skip(state))]
pub async fn print_certificate(
    State(state): State<AppState>,
    PathParams((category, rank)): PathParams<(String, u32)>,
) -> Result<Html<String>> {
    let certificate = load_certificate(&state, &category, rank).await?;
    let issued = Utc::now().format("%d %B %Y").to_string();

    Ok(Html(render_certificate(&certificate, &state.config, &issued)))
}
