use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde_json::{Map, Value};
use tracing::info;

use crate::{
    model::{Message, NewMessage},
    store::MessageStore,
};

use super::{within, ApiError, Application};

pub fn router<S: MessageStore>() -> Router<Application<S>> {
    Router::new()
        .route("/", post(create_message::<S>))
        .route("/:id", get(get_message::<S>))
}

/// Body must be a JSON object with a string `content`; arrays and other
/// values are refused even when they could be read positionally.
fn content_of(mut body: Map<String, Value>) -> Result<String, ApiError> {
    match body.remove("content") {
        Some(Value::String(content)) => Ok(content),
        Some(_) => Err(ApiError::BadRequest("`content` must be a string".into())),
        None => Err(ApiError::BadRequest("missing field `content`".into())),
    }
}

/// Only plain ASCII digits name a message; `+1` or `-1` do not.
fn parse_id(segment: &str) -> Result<u64, ApiError> {
    if segment.is_empty() || !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ApiError::NotFound);
    }
    segment.parse().map_err(|_| ApiError::NotFound)
}

pub async fn create_message<S: MessageStore>(
    State(Application {
        store,
        request_timeout,
    }): State<Application<S>>,
    WithRejection(Json(body), _): WithRejection<Json<Map<String, Value>>, ApiError>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let message = NewMessage::new(content_of(body)?)?;
    let message = within(request_timeout, store.insert(message)).await?;

    info!(id = message.id, "created message");
    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn get_message<S: MessageStore>(
    State(Application {
        store,
        request_timeout,
    }): State<Application<S>>,
    WithRejection(Path(id), _): WithRejection<Path<String>, ApiError>,
) -> Result<Json<Message>, ApiError> {
    within(request_timeout, store.find(parse_id(&id)?))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}
