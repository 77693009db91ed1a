pub mod aggregate;
pub mod app;
pub mod buckets;
pub mod config;
pub mod dates;
pub mod errors;
pub mod fetcher;
pub mod handlers;
pub mod models;
pub mod sources;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
