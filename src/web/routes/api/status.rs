use axum::{extract::State, Json};
use tracing::info;

use crate::{
    web::{
        extract::ApiJson,
        types::{StatusCheck, StatusCheckCreate},
        WebResult,
    },
    AppState,
};

use super::LIST_LIMIT;

#[tracing::instrument(
    name = "Saving new status check",
    skip(app_state, input),
    fields(client_name = %input.client_name)
)]
pub async fn status_create(
    State(app_state): State<AppState>,
    ApiJson(input): ApiJson<StatusCheckCreate>,
) -> WebResult<Json<StatusCheck>> {
    let status_check = StatusCheck::try_from(input)?;

    app_state
        .database_mgr
        .insert(StatusCheck::COLLECTION, &status_check)
        .await?;

    info!(id = %status_check.id, "status check stored");
    Ok(Json(status_check))
}

#[tracing::instrument(name = "Listing status checks", skip(app_state))]
pub async fn status_list(State(app_state): State<AppState>) -> WebResult<Json<Vec<StatusCheck>>> {
    let status_checks = app_state
        .database_mgr
        .find_all(StatusCheck::COLLECTION, LIST_LIMIT)
        .await?;

    Ok(Json(status_checks))
}
