use std::sync::Arc;

use config::{Config, File};
use env_logger::Builder;
use log::{info, LevelFilter};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};

mod handlers;
mod order;
mod store;

use handlers::{order_routes, AppState};
use store::{NullStore, OrderStore, PostgresStore};

#[derive(Debug, Deserialize)]
struct WebConfig {
    listen_address: String,
    listen_port: String,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
    dbname: String,
    user: String,
    password: String,
    host: String,
    port: String,
}

#[derive(Debug, Deserialize)]
struct AppConfig {
    web: WebConfig,
    // Present: orders go to Postgres. Absent: orders are acknowledged only.
    database: Option<DatabaseConfig>,
}

#[tokio::main]
async fn main() {
    Builder::new().filter(None, LevelFilter::Info).init();
    info!("Starting the order intake server");

    let settings = Config::builder()
        .add_source(File::with_name("config/order_service.yaml"))
        .build()
        .expect("Failed to read configuration");

    let config: AppConfig = settings
        .try_deserialize()
        .expect("Invalid configuration");

    let store: Arc<dyn OrderStore> = match &config.database {
        Some(db) => {
            let store = PostgresStore::connect(&db.dbname, &db.user, &db.password, &db.host, &db.port)
                .await
                .expect("Failed to connect to the database");
            info!("Persistence enabled: orders will be stored in Postgres");
            Arc::new(store)
        }
        None => {
            info!("No database configured: orders will not be persisted");
            Arc::new(NullStore)
        }
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = order_routes()
        .with_state(AppState { store })
        .layer(cors);

    let listener_address_port = format!("{}:{}", config.web.listen_address, config.web.listen_port);
    let listener = tokio::net::TcpListener::bind(listener_address_port)
        .await
        .expect("Failed to bind listen address");
    info!("Listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
