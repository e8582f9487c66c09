//! HTTP routes served by the binary, exercised with actix's test harness.

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};

use pow_vote_ledger::api::{self, AppState};
use pow_vote_ledger::models::{MSG_CHAIN_VALID, MSG_VOTE_DUPLICATE, MSG_VOTE_FAILED};
use pow_vote_ledger::{Ledger, VotingService};

fn state() -> web::Data<AppState> {
    state_with(Ledger::new(1).unwrap())
}

fn state_with(ledger: Ledger) -> web::Data<AppState> {
    web::Data::new(AppState {
        service: VotingService::new(ledger),
        candidates: vec!["Alice".to_string(), "Bob".to_string(), "Charlie".to_string()],
    })
}

fn vote(voter_id: &str, candidate: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/vote")
        .set_json(json!({ "voterId": voter_id, "candidate": candidate }))
}

#[actix_web::test]
async fn vote_then_results() {
    let app = test::init_service(App::new().app_data(state()).configure(api::configure)).await;

    for (voter, candidate) in [("v1", "Alice"), ("v2", "Alice"), ("v3", "Bob")] {
        let resp = test::call_service(&app, vote(voter, candidate).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let results: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/getResults").to_request(),
    )
    .await;
    assert_eq!(results[0]["candidate"], "Alice");
    assert_eq!(results[0]["votes"], 2);
    assert_eq!(results[0]["percentage"], 66.7);
    assert_eq!(results[1]["percentage"], 33.3);

    let total: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/getTotalVotes").to_request(),
    )
    .await;
    assert_eq!(total["totalVotes"], 3);
}

#[actix_web::test]
async fn duplicate_vote_conflicts() {
    let app = test::init_service(App::new().app_data(state()).configure(api::configure)).await;

    test::call_service(&app, vote("v1", "Alice").to_request()).await;
    let resp = test::call_service(&app, vote("v1", "Bob").to_request()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], MSG_VOTE_DUPLICATE);
}

#[actix_web::test]
async fn sealing_failure_is_server_error() {
    let ledger = Ledger::with_seal_limit(64, Some(2)).unwrap();
    let app =
        test::init_service(App::new().app_data(state_with(ledger)).configure(api::configure)).await;

    let resp = test::call_service(&app, vote("v1", "Alice").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], MSG_VOTE_FAILED);

    let total: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/getTotalVotes").to_request(),
    )
    .await;
    assert_eq!(total["totalVotes"], 0);
}

#[actix_web::test]
async fn rejects_blank_voter_and_unknown_candidate() {
    let app = test::init_service(App::new().app_data(state()).configure(api::configure)).await;

    let resp = test::call_service(&app, vote("   ", "Alice").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Please enter your Voter ID");

    let resp = test::call_service(&app, vote("v1", "Mallory").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Please select a candidate");

    let voters: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/getVoterIds").to_request(),
    )
    .await;
    assert_eq!(voters, json!([]));
}

#[actix_web::test]
async fn verify_and_chain_views() {
    let app = test::init_service(App::new().app_data(state()).configure(api::configure)).await;
    test::call_service(&app, vote(" v1 ", "Charlie").to_request()).await;

    let status: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/verify").to_request())
            .await;
    assert_eq!(status["valid"], true);
    assert_eq!(status["message"], MSG_CHAIN_VALID);

    let latest: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/getLatestBlock").to_request(),
    )
    .await;
    assert_eq!(latest["chainLength"], 2);
    assert_eq!(latest["block"]["voterId"], "v1");
    assert_eq!(latest["block"]["vote"], "Charlie");

    let state: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/getChainState").to_request(),
    )
    .await;
    assert_eq!(state["totalVoters"], 1);
    assert_eq!(state["candidateVotes"]["Charlie"], 1);

    let history: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/getHistory").to_request(),
    )
    .await;
    assert_eq!(history.as_array().map(Vec::len), Some(2));
    assert_eq!(history[1]["isValid"], true);

    let candidates: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/candidates").to_request(),
    )
    .await;
    assert_eq!(candidates, json!(["Alice", "Bob", "Charlie"]));
}
