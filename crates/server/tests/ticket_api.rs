mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use bountydesk_core::FeaturePhase;
use common::{fixtures, TestFixture};

const FEATURE: &str = "a1b2c3d4-0000-4000-8000-000000000001";
const PHASE: &str = "a1b2c3d4-0000-4000-8000-000000000002";

fn ticket_path(uuid: &str) -> String {
    format!("/api/v1/bounties/ticket/{}", uuid)
}

fn phase_tickets_path(feature: &str, phase: &str) -> String {
    format!("/api/v1/features/{}/phase/{}/tickets", feature, phase)
}

/// Register `FEATURE` and its phase `PHASE`.
fn seed_phase(fixture: &TestFixture) {
    fixtures::seed_feature(&fixture.features, &Uuid::new_v4().to_string(), FEATURE).unwrap();
    fixture
        .features
        .insert_phase(&FeaturePhase {
            uuid: PHASE.to_string(),
            feature_uuid: FEATURE.to_string(),
            name: "Build".to_string(),
        })
        .unwrap();
}

fn ticket_body(name: &str) -> serde_json::Value {
    json!({
        "feature_uuid": FEATURE,
        "phase_uuid": PHASE,
        "name": name,
        "description": "First draft",
    })
}

#[tokio::test]
async fn test_create_then_get_ticket() {
    let fixture = TestFixture::new().await;
    let uuid = Uuid::new_v4().to_string();

    let created = fixture.post(&ticket_path(&uuid), ticket_body("Add search")).await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["uuid"], uuid);
    assert_eq!(created.body["status"], "DRAFT");
    assert_eq!(created.body["name"], "Add search");

    let fetched = fixture.get(&ticket_path(&uuid)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["description"], "First draft");
    assert_eq!(fetched.body["feature_uuid"], FEATURE);
}

#[tokio::test]
async fn test_edit_keeps_created_at_and_status() {
    let fixture = TestFixture::new().await;
    let uuid = Uuid::new_v4().to_string();

    let mut body = ticket_body("Add search");
    body["status"] = json!("READY");
    let created = fixture.post(&ticket_path(&uuid), body).await;
    assert_eq!(created.status, StatusCode::OK);

    // No status on edit leaves it alone.
    let mut edit = ticket_body("Add fuzzy search");
    edit["description"] = json!("Second draft");
    let edited = fixture.post(&ticket_path(&uuid), edit).await;

    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.body["name"], "Add fuzzy search");
    assert_eq!(edited.body["status"], "READY");
    assert_eq!(edited.body["created_at"], created.body["created_at"]);
}

#[tokio::test]
async fn test_path_uuid_wins_over_body() {
    let fixture = TestFixture::new().await;
    let uuid = Uuid::new_v4().to_string();

    let mut body = ticket_body("Add search");
    body["uuid"] = json!(Uuid::new_v4().to_string());
    let created = fixture.post(&ticket_path(&uuid), body).await;

    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["uuid"], uuid);
}

#[tokio::test]
async fn test_invalid_ticket_uuid_is_bad_request() {
    let fixture = TestFixture::new().await;

    let response = fixture.post(&ticket_path("not-a-uuid"), ticket_body("x")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["kind"], "bad_request");

    let response = fixture.get(&ticket_path("not-a-uuid")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_required_fields() {
    let fixture = TestFixture::new().await;
    let uuid = Uuid::new_v4().to_string();

    let response = fixture
        .post(&ticket_path(&uuid), json!({ "feature_uuid": FEATURE, "name": "x" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["kind"], "validation");
    assert_eq!(
        response.body["error"],
        "feature_uuid, phase_uuid, and name are required"
    );
    assert_eq!(fixture.get(&ticket_path(&uuid)).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_status_rejected() {
    let fixture = TestFixture::new().await;
    let uuid = Uuid::new_v4().to_string();

    let mut body = ticket_body("Add search");
    body["status"] = json!("ready");
    let response = fixture.post(&ticket_path(&uuid), body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["kind"], "validation");
}

#[tokio::test]
async fn test_malformed_json_body() {
    let fixture = TestFixture::new().await;
    let uuid = Uuid::new_v4().to_string();

    let response = fixture.post_raw(&ticket_path(&uuid), "{not json").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["kind"], "validation");
}

#[tokio::test]
async fn test_get_missing_ticket() {
    let fixture = TestFixture::new().await;

    let response = fixture.get(&ticket_path(&Uuid::new_v4().to_string())).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["kind"], "not_found");
}

#[tokio::test]
async fn test_delete_ticket() {
    let fixture = TestFixture::new().await;
    let uuid = Uuid::new_v4().to_string();
    fixture.post(&ticket_path(&uuid), ticket_body("Add search")).await;

    let deleted = fixture.delete(&ticket_path(&uuid)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["uuid"], uuid);

    assert_eq!(fixture.get(&ticket_path(&uuid)).await.status, StatusCode::NOT_FOUND);
    assert_eq!(fixture.delete(&ticket_path(&uuid)).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_phase_tickets_in_sequence_order() {
    let fixture = TestFixture::new().await;
    seed_phase(&fixture);

    for (name, sequence) in [("third", 3), ("first", 1), ("second", 2)] {
        let mut body = ticket_body(name);
        body["sequence"] = json!(sequence);
        let response = fixture
            .post(&ticket_path(&Uuid::new_v4().to_string()), body)
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    // A ticket in another phase stays out of the listing.
    let mut other = ticket_body("elsewhere");
    other["phase_uuid"] = json!(Uuid::new_v4().to_string());
    fixture
        .post(&ticket_path(&Uuid::new_v4().to_string()), other)
        .await;

    let response = fixture.get(&phase_tickets_path(FEATURE, PHASE)).await;

    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_list_phase_tickets_rejects_bad_uuid() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .get(&format!("/api/v1/features/{}/phase/nope/tickets", FEATURE))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_phase_tickets_unknown_feature() {
    let fixture = TestFixture::new().await;
    fixture.post(&ticket_path(&Uuid::new_v4().to_string()), ticket_body("orphan")).await;

    let response = fixture.get(&phase_tickets_path(FEATURE, PHASE)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["kind"], "not_found");
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .starts_with("Feature not found"));
}

#[tokio::test]
async fn test_list_phase_tickets_unknown_phase() {
    let fixture = TestFixture::new().await;
    seed_phase(&fixture);

    let missing = Uuid::new_v4().to_string();
    let response = fixture.get(&phase_tickets_path(FEATURE, &missing)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .starts_with("Phase not found"));
}

#[tokio::test]
async fn test_list_phase_tickets_phase_of_other_feature() {
    let fixture = TestFixture::new().await;
    seed_phase(&fixture);

    let other_feature = Uuid::new_v4().to_string();
    fixtures::seed_feature(&fixture.features, &Uuid::new_v4().to_string(), &other_feature)
        .unwrap();

    let response = fixture.get(&phase_tickets_path(&other_feature, PHASE)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .starts_with("Phase not found"));
}
