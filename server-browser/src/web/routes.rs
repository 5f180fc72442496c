//! HTTP route handlers.

use askama::Template;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tracing::{error, warn};

use crate::steam::ServerProvider;

use super::state::AppState;
use super::templates::ServerListTemplate;

/// Create the application router.
pub fn create_router<P: ServerProvider + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/", get(server_list::<P>))
        .with_state(state)
}

/// The server list page.
///
/// A failed refresh is logged and the previous (possibly empty) list is
/// rendered anyway; only a rendering failure reaches the client.
async fn server_list<P: ServerProvider>(
    State(state): State<AppState<P>>,
) -> Result<Html<String>, AppError> {
    let (snapshot, refresh_error) = state.cache.get().await.into_parts();

    if let Some(e) = refresh_error {
        let age_secs = snapshot
            .age(state.cache.now())
            .map(|age| age.num_seconds());
        warn!(
            error = %e,
            servers = snapshot.len(),
            age_secs,
            "update failed, serving previous server list"
        );
    }

    let html = ServerListTemplate::from_snapshot(&snapshot).render()?;
    Ok(Html(html))
}

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The page template failed to render
    #[error("response generation failed: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("{self}");

        match self {
            AppError::Render(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to generate response!",
            )
                .into_response(),
        }
    }
}
