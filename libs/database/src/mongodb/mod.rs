//! MongoDB connection management

mod config;
mod connector;
mod health;

pub use config::{DEFAULT_DATABASE, MongoConfig};
pub use connector::{client_options, connect_from_config};
pub use health::{HealthStatus, check_health_detailed};

pub use mongodb::{Client, Collection, Database};
