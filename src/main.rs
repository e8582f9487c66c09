use std::io;

use actix_web::{web, App, HttpServer};
use log::info;

use pow_vote_ledger::api::{self, AppState};
use pow_vote_ledger::{Config, Ledger, VotingService};

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    let ledger = Ledger::with_seal_limit(config.difficulty, config.max_seal_attempts)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    let state = web::Data::new(AppState {
        service: VotingService::new(ledger),
        candidates: config.candidates.clone(),
    });

    info!(
        "Vote ledger listening on {}:{} with candidates {:?}",
        config.host, config.port, config.candidates
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::configure)
    })
    .bind(config.bind_addr())?
    .run()
    .await
}
