use axum::extract::FromRequest;

use crate::web::Error;

/// `axum::Json` with its rejection wrapped into `web::Error`,
/// so that extraction failures get the same error body as every other error.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);
