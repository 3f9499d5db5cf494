//! Application state management

use mongodb::{Client, Database};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
}

/// State whose client points at a port nothing listens on (9).
///
/// Client creation is lazy, so this never blocks; operations fail after 200ms.
#[cfg(test)]
pub(crate) async fn unreachable_state() -> AppState {
    use crate::config::{Config, Environment};
    use core_config::{app_info, server::ServerConfig};
    use database::mongodb::MongoConfig;

    const UNREACHABLE: &str =
        "mongodb://127.0.0.1:9/?serverSelectionTimeoutMS=200&connectTimeoutMS=200";

    let mongo_client = Client::with_uri_str(UNREACHABLE).await.unwrap();
    AppState {
        config: Config {
            app: app_info!(),
            mongodb: MongoConfig::new(UNREACHABLE),
            server: ServerConfig::default(),
            environment: Environment::Development,
        },
        db: mongo_client.database("products"),
        mongo_client,
    }
}
