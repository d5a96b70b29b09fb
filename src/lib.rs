pub mod app;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod models;
pub mod percent;
pub mod portal;
pub mod report;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use percent::{normalize, normalize_with, ZeroTotal};
pub use state::AppState;
