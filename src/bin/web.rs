//! Swiss tournament web server: JSON API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Set DATABASE to a SQLite file path to persist data; otherwise it is kept in memory.

use actix_web::{web::Data, App, HttpServer};
use swiss_tournament_web::{api, AppConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    let store = config
        .open_store()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let state = Data::from(store);

    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || App::new().app_data(state.clone()).configure(api::configure))
        .bind(bind)?
        .run()
        .await
}
