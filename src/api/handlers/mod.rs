//! REST API request handlers.

pub mod health;
pub mod links;
pub mod resolve;
pub mod shorten;
pub mod stats;

pub use health::health_handler;
pub use links::{delete_url_handler, update_url_handler};
pub use resolve::resolve_handler;
pub use shorten::create_url_handler;
pub use stats::stats_handler;
