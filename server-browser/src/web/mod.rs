//! Web layer for the server browser.
//!
//! Serves the cached server list as a single HTML page.

mod routes;
mod state;
pub mod templates;

pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
