//! End-to-end checks against a running server.
//!
//! Set `WALL_TEST_URL` (for example `http://localhost:8080`) to run them, and
//! `WALL_TEST_PIN` if the server does not use the default admin PIN. The
//! server's database must be seeded.

use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

static BASE_URL: Lazy<Option<String>> = Lazy::new(|| {
    std::env::var("WALL_TEST_URL")
        .ok()
        .map(|url| url.trim_end_matches('/').to_owned())
});

static ADMIN_PIN: Lazy<String> =
    Lazy::new(|| std::env::var("WALL_TEST_PIN").unwrap_or_else(|_| "1234".to_owned()));

// A fresh client per request: each #[tokio::test] runs on its own runtime.
fn client() -> Client {
    Client::new()
}

fn url(base: &str, path: &str) -> String {
    format!("{base}{path}")
}

async fn token(base: &str, path: &str, body: Value, bearer: Option<&str>) -> String {
    let mut request = client().post(url(base, path)).json(&body);
    if let Some(bearer) = bearer {
        request = request.bearer_auth(bearer);
    }
    let response = request.send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK, "{path}");
    let body: Value = response.json().await.unwrap();
    body["token"].as_str().unwrap().to_owned()
}

async fn get_json(base: &str, path: &str, bearer: &str) -> Value {
    let response = client()
        .get(url(base, path))
        .bearer_auth(bearer)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK, "{path}");
    response.json().await.unwrap()
}

#[tokio::test]
async fn wall_stays_locked_without_a_session() {
    let Some(base) = BASE_URL.as_deref() else {
        eprintln!("WALL_TEST_URL not set, skipping");
        return;
    };

    let response = client().get(url(base, "/v1/wall")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn approved_note_reaches_the_wall() {
    let Some(base) = BASE_URL.as_deref() else {
        eprintln!("WALL_TEST_URL not set, skipping");
        return;
    };

    let guest = token(base, "/v1/lock", json!({}), None).await;
    let sections = get_json(base, "/v1/sections", &guest).await;
    let sections = sections.as_array().unwrap();
    assert!(sections.len() >= 2, "seed the database before running these tests");
    let giver_section = sections[0]["id"].as_i64().unwrap();
    let receiver_section = sections[1]["id"].as_i64().unwrap();

    let receiver_name = format!("Test Student {}", unique_stamp());
    let response = client()
        .post(url(base, "/v1/notes/student"))
        .bearer_auth(&guest)
        .json(&json!({
            "giver_section_id": giver_section,
            "receiver_name": receiver_name,
            "receiver_section_id": receiver_section,
            "message": "Thank you for helping me with fractions",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let note: Value = response.json().await.unwrap();
    assert_eq!(note["status"], "pending");
    assert_eq!(note["weight_applied"], 2);
    assert_eq!(note["giver_name"], "Anonymous");
    let note_id = note["id"].as_i64().unwrap();

    let wall = get_json(base, "/v1/wall?receiverType=student", &guest).await;
    assert!(
        !wall["notes"]
            .as_array()
            .unwrap()
            .iter()
            .any(|n| n["id"].as_i64() == Some(note_id)),
        "pending notes must not be listed"
    );

    let admin = token(
        base,
        "/v1/admin/login",
        json!({ "pin": ADMIN_PIN.as_str() }),
        Some(&guest),
    )
    .await;
    let response = client()
        .post(url(base, &format!("/v1/admin/notes/{note_id}/approve")))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let wall = get_json(base, "/v1/wall?receiverType=student", &guest).await;
    assert!(
        wall["notes"]
            .as_array()
            .unwrap()
            .iter()
            .any(|n| n["id"].as_i64() == Some(note_id))
    );
    assert!(wall["bars"]["students"].is_array());

    let response = client()
        .delete(url(base, &format!("/v1/admin/notes/{note_id}")))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client()
        .delete(url(base, &format!("/v1/admin/notes/{note_id}")))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn leaders_cover_every_period() {
    let Some(base) = BASE_URL.as_deref() else {
        eprintln!("WALL_TEST_URL not set, skipping");
        return;
    };

    let guest = token(base, "/v1/lock", json!({}), None).await;
    let periods = get_json(base, "/v1/leaders/periods", &guest).await;
    let periods: Vec<&str> = periods
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["period"].as_str().unwrap())
        .collect();
    assert_eq!(periods, ["weekly", "monthly", "yearly", "alltime"]);

    let leaders = get_json(base, "/v1/leaders", &guest).await;
    for list in ["top_appreciator_sections", "top_appreciated_sections", "top_teachers"] {
        assert!(leaders[list].as_array().unwrap().len() <= 10);
    }
    for bars in ["teachers", "students", "staffs"] {
        assert!(leaders["bars"][bars].as_array().unwrap().len() <= 5);
    }
}

#[tokio::test]
async fn duplicate_section_conflicts() {
    let Some(base) = BASE_URL.as_deref() else {
        eprintln!("WALL_TEST_URL not set, skipping");
        return;
    };

    let guest = token(base, "/v1/lock", json!({}), None).await;
    let admin = token(
        base,
        "/v1/admin/login",
        json!({ "pin": ADMIN_PIN.as_str() }),
        Some(&guest),
    )
    .await;

    let response = client()
        .post(url(base, "/v1/admin/sections"))
        .bearer_auth(&admin)
        .json(&json!({ "class_name": "6", "section_name": "a" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

fn unique_stamp() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
}
