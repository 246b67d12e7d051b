use axum::{extract::State, Json};
use mongodb::bson::doc;
use tracing::info;

use crate::{
    database,
    web::{
        extract::ApiJson,
        types::{NewsletterSignup, NewsletterSignupCreate},
        Error, WebResult,
    },
    AppState,
};

use super::LIST_LIMIT;

/// Validates the email, rejects it if it is already subscribed and stores the signup otherwise.
///
/// The lookup and the insert are two separate operations. Two concurrent signups with the same
/// email can both pass the lookup, the unique index on `email` then rejects the second insert
/// and it is reported the same way as a regular duplicate.
#[tracing::instrument(
    name = "Saving new newsletter signup",
    skip(app_state, input),
    fields(signup_email = %input.email)
)]
pub async fn newsletter_create(
    State(app_state): State<AppState>,
    ApiJson(input): ApiJson<NewsletterSignupCreate>,
) -> WebResult<Json<NewsletterSignup>> {
    let signup = NewsletterSignup::try_from(input)?;
    let db = &app_state.database_mgr;

    let existing: Option<NewsletterSignup> = db
        .find_one(
            NewsletterSignup::COLLECTION,
            doc! { "email": signup.email.as_str() },
        )
        .await?;
    if existing.is_some() {
        info!("email already subscribed");
        return Err(Error::AlreadySubscribed);
    }

    db.insert(NewsletterSignup::COLLECTION, &signup)
        .await
        .map_err(|er| match er {
            database::Error::DuplicateKey { .. } => Error::AlreadySubscribed,
            er => Error::Database(er),
        })?;

    info!(id = %signup.id, "newsletter signup stored");
    Ok(Json(signup))
}

#[tracing::instrument(name = "Listing newsletter signups", skip(app_state))]
pub async fn newsletter_list(
    State(app_state): State<AppState>,
) -> WebResult<Json<Vec<NewsletterSignup>>> {
    let signups = app_state
        .database_mgr
        .find_all(NewsletterSignup::COLLECTION, LIST_LIMIT)
        .await?;

    Ok(Json(signups))
}
