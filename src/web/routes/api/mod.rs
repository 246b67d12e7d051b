mod contact;
mod newsletter;
mod status;

pub use contact::{contact_create, contact_list};
pub use newsletter::{newsletter_create, newsletter_list};
pub use status::{status_create, status_list};

use axum::Json;
use serde::Serialize;

/// Upper bound on the number of records a list endpoint returns.
const LIST_LIMIT: i64 = 1000;

pub const GREETING: &str = "PrognosCore API - Predict. Prevent. Perform.";

#[derive(Debug, Serialize)]
pub struct Greeting {
    pub message: &'static str,
}

pub async fn root() -> Json<Greeting> {
    Json(Greeting { message: GREETING })
}
