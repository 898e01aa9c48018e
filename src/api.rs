use std::{future::Future, time::Duration};

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::store::{MessageStore, StoreError};

mod error;
mod message;

pub use error::ApiError;

#[derive(Clone)]
pub struct Application<S> {
    pub store: S,
    pub request_timeout: Duration,
}

pub fn router<S: MessageStore>() -> Router<Application<S>> {
    Router::new()
        .nest("/message", message::router())
        .fallback(|| async { ApiError::NotFound })
}

/// Makes sure the message table exists and only then hands out the service.
/// No router exists for a store whose schema could not be set up.
pub async fn initialise<S: MessageStore>(
    application: Application<S>,
) -> Result<Router, StoreError> {
    application.store.ensure_schema().await?;

    Ok(router()
        .layer(TraceLayer::new_for_http())
        .with_state(application))
}

/// Awaits a store call, dropping it once `limit` has passed.
async fn within<T>(
    limit: Duration,
    call: impl Future<Output = Result<T, StoreError>>,
) -> Result<T, ApiError> {
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| ApiError::Timeout)?
        .map_err(ApiError::from)
}
