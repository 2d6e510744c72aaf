mod cache;
mod handlers;
mod models;
mod routes;
mod utils;

use std::sync::Arc;

use axum::serve;
use tokio::net::TcpListener;
use tracing::{error, info};

use routes::{init_tracing, make_app};
use utils::state::AppState;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    let state = match AppState::init() {
        Ok(state) => Arc::new(state),
        Err(err) => {
            error!("failed to initialize application: {err}");
            std::process::exit(1);
        }
    };

    let addr = format!("0.0.0.0:{}", state.config.port);
    let app = make_app(state);

    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => panic!("{}", err),
    };
    info!("Listening on http://{addr}");

    if let Err(err) = serve(listener, app).await {
        error!("server error: {err}");
    }
}
