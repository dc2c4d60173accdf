/// User API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use roster_core::{User, UserDraft, UserId};
use serde_json::{Map, Value};

/// POST /users
///
/// The body is decoded as JSON whatever its `Content-Type`.
pub async fn create_user(State(app_state): State<AppState>, body: Bytes) -> Result<Json<User>> {
    let new_user = decode_draft(&body)?.validate()?;

    let user = app_state
        .store
        .create_user(new_user)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create user: {}", e);
            ServerError::Internal("Failed to create user".to_string())
        })?;

    tracing::info!(user_id = %user.id, "User created");
    Ok(Json(user))
}

/// Decode a create payload, accepting only a JSON object
///
/// A derived struct deserializer would also read `["name", "email"]`
/// positionally, so the body goes through a map first.
fn decode_draft(body: &[u8]) -> Result<UserDraft> {
    let object: Map<String, Value> =
        serde_json::from_slice(body).map_err(|e| ServerError::BadRequest(e.to_string()))?;
    serde_json::from_value(Value::Object(object)).map_err(|e| ServerError::BadRequest(e.to_string()))
}

/// GET /users/:id
pub async fn get_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<User>> {
    let user_id: UserId = id
        .parse()
        .map_err(|_| ServerError::BadRequest("Invalid user ID".to_string()))?;

    match app_state.store.find_user(user_id).await {
        Ok(user) => Ok(Json(user)),
        Err(e) if e.is_not_found() => {
            if app_state.api.distinct_not_found {
                Err(ServerError::NotFound("User not found".to_string()))
            } else {
                Err(ServerError::Internal("User not found".to_string()))
            }
        }
        Err(e) => {
            tracing::error!(user_id = %user_id, "Failed to fetch user: {}", e);
            // Legacy clients only ever see "User not found" on a failed lookup
            let msg = if app_state.api.distinct_not_found {
                "Failed to fetch user"
            } else {
                "User not found"
            };
            Err(ServerError::Internal(msg.to_string()))
        }
    }
}
