use axum::{extract::State, Json};
use tracing::info;

use crate::{
    web::{
        extract::ApiJson,
        types::{ContactForm, ContactFormCreate},
        WebResult,
    },
    AppState,
};

use super::LIST_LIMIT;

#[tracing::instrument(
    name = "Saving new contact form",
    skip(app_state, input),
    fields(contact_email = %input.email, contact_reason = %input.reason)
)]
pub async fn contact_create(
    State(app_state): State<AppState>,
    ApiJson(input): ApiJson<ContactFormCreate>,
) -> WebResult<Json<ContactForm>> {
    let contact = ContactForm::try_from(input)?;

    app_state
        .database_mgr
        .insert(ContactForm::COLLECTION, &contact)
        .await?;

    info!(id = %contact.id, "contact form stored");
    Ok(Json(contact))
}

#[tracing::instrument(name = "Listing contact forms", skip(app_state))]
pub async fn contact_list(State(app_state): State<AppState>) -> WebResult<Json<Vec<ContactForm>>> {
    let contacts = app_state
        .database_mgr
        .find_all(ContactForm::COLLECTION, LIST_LIMIT)
        .await?;

    Ok(Json(contacts))
}
