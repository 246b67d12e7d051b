use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use strum_macros::AsRefStr;

use crate::{database, web::types::DataParsingError};

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("email is already subscribed to the newsletter")]
    AlreadySubscribed,

    #[error("data parsing error: {0}")]
    DataParsing(#[from] DataParsingError),
    #[error("json extraction error: {0}")]
    JsonRejection(#[from] JsonRejection),

    #[error("database error: {0}")]
    Database(#[from] database::Error),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        use ClientError::*;

        match self {
            Error::AlreadySubscribed => (StatusCode::BAD_REQUEST, AlreadySubscribed),
            Error::DataParsing(data_er) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                InvalidInput(data_er.to_string()),
            ),
            // Missing fields and wrong types are 422, syntax errors 400, wrong content type 415.
            Error::JsonRejection(rejection) => {
                let status = rejection.status();
                if status == StatusCode::UNPROCESSABLE_ENTITY {
                    (status, InvalidInput(rejection.body_text()))
                } else {
                    (status, BadRequest(rejection.body_text()))
                }
            }
            Error::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, ServiceError),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// The error as the client gets to see it.
#[derive(Debug, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("Received invalid input")]
    InvalidInput(String),
    #[display("Bad request")]
    BadRequest(String),
    #[display("Email already subscribed")]
    AlreadySubscribed,
    #[display("Service Error!")]
    ServiceError,
}

impl ClientError {
    /// Field level detail of the error, if there is any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::InvalidInput(detail) | ClientError::BadRequest(detail) => {
                Some(detail.as_str())
            }
            ClientError::AlreadySubscribed | ClientError::ServiceError => None,
        }
    }
}
