pub mod health;
pub mod interactions;
pub mod party;
pub mod presence;

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::api::AppState;

/// Error body returned for every rejected command or action.
///
/// `error` is the text shown to the invoking user.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn api_error(status: StatusCode, code: &str, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.to_string(),
        }),
    )
}

/// JSON body extractor whose rejections use the [`ErrorResponse`] shape
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(invalid_request(rejection)),
        }
    }
}

fn invalid_request(rejection: JsonRejection) -> ApiError {
    api_error(rejection.status(), "INVALID_REQUEST", rejection.body_text())
}

/// Create the main API router
pub fn create_api_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .nest("/party", create_party_router())
        .route("/interactions", post(interactions::handle_interaction))
        .route("/presence", post(presence::presence_update))
        .route("/health", get(health::health_handler))
        .with_state(state)
}

/// Create party router (slash command surface)
fn create_party_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(party::list_parties).post(party::create_party))
        .route("/:roleId", delete(party::remove_party))
        .route("/:roleId/adjust", post(party::adjust_party))
        .route("/:roleId/kick", post(party::kick_player))
}
