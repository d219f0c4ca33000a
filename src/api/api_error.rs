use crate::error::Error;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// A failed response's error string, stashed on the response so the request
/// logging middleware can report it.
#[derive(Clone)]
pub(super) struct ErrorMsg(pub String);

pub(crate) struct APIError(anyhow::Error);

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        // Fold extractor rejections into the crate error taxonomy so status
        // mapping and body text stay in one place.
        let any_err = match self.0.downcast::<JsonRejection>() {
            Ok(rejection) => anyhow::Error::new(Error::from(rejection)),
            Err(err) => err,
        };
        let any_err = match any_err.downcast::<QueryRejection>() {
            Ok(rejection) => anyhow::Error::new(Error::from(rejection)),
            Err(err) => err,
        };

        let status = match any_err.downcast_ref::<Error>() {
            Some(Error::Unauthorized) => StatusCode::UNAUTHORIZED,
            Some(Error::NotFound) => StatusCode::NOT_FOUND,
            Some(
                Error::EmptyDomain
                | Error::BadDomain(_)
                | Error::BadQuery(_)
                | Error::BodyReadFail(_),
            ) => StatusCode::BAD_REQUEST,
            Some(Error::BadJson(rejection)) => match rejection {
                JsonRejection::JsonDataError(_) => StatusCode::UNPROCESSABLE_ENTITY,
                JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                _ => StatusCode::BAD_REQUEST,
            },
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Repository and IO failures surface their generic Display text only;
        // underlying detail stays in the log.
        let message = format!("{any_err}");
        let mut response = (status, Json(json!({ "error": message }))).into_response();
        response.extensions_mut().insert(ErrorMsg(message));
        response
    }
}

impl<E> From<E> for APIError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
