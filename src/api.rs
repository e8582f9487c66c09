use actix_web::{web, HttpResponse, Responder};
use log::debug;
use serde_json::json;

use crate::error::LedgerError;
use crate::ledger::receipt_for;
use crate::models::{VoteReceipt, VoteRequest};
use crate::service::VotingService;

pub struct AppState {
    pub service: VotingService,
    pub candidates: Vec<String>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/vote", web::post().to(handle_vote))
        .route("/getResults", web::get().to(get_results))
        .route("/getTotalVotes", web::get().to(get_total_votes))
        .route("/verify", web::get().to(verify_chain))
        .route("/getLatestBlock", web::get().to(get_latest_block))
        .route("/getVoterIds", web::get().to(get_voter_ids))
        .route("/getChainState", web::get().to(get_chain_state))
        .route("/getHistory", web::get().to(get_history))
        .route("/candidates", web::get().to(get_candidates));
}

async fn handle_vote(data: web::Data<AppState>, vote: web::Json<VoteRequest>) -> impl Responder {
    let vote = vote.into_inner();
    let voter_id = vote.voter_id.trim();
    debug!("Form data: voter {:?}, candidate {:?}", voter_id, vote.candidate);

    if voter_id.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Please enter your Voter ID",
        }));
    }
    if !data.candidates.iter().any(|c| *c == vote.candidate) {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Please select a candidate",
        }));
    }

    match data.service.try_submit_vote(voter_id, &vote.candidate).await {
        Ok(()) => HttpResponse::Ok().json(VoteReceipt::accepted(&vote.candidate)),
        Err(err @ LedgerError::DuplicateVote(_)) => HttpResponse::Conflict().json(receipt_for(&err)),
        Err(err) => HttpResponse::InternalServerError().json(receipt_for(&err)),
    }
}

async fn get_results(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.service.get_results().await)
}

async fn get_total_votes(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({ "totalVotes": data.service.get_total_votes().await }))
}

async fn verify_chain(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.service.is_chain_valid().await)
}

async fn get_latest_block(data: web::Data<AppState>) -> impl Responder {
    let snapshot = data.service.snapshot().await;
    HttpResponse::Ok().json(json!({
        "block": snapshot.last_block,
        "chainLength": snapshot.chain_length,
    }))
}

async fn get_voter_ids(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.service.get_voter_ids().await)
}

async fn get_chain_state(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.service.snapshot().await)
}

async fn get_history(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.service.history().await)
}

async fn get_candidates(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(&data.candidates)
}
