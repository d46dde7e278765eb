use crate::error::{DirectoryError, MalformedFormSnafu, MalformedJsonSnafu};
use axum::{
    Form, Json,
    extract::{
        FromRequest, FromRequestParts, Path, Request,
        rejection::{FormRejection, JsonRejection},
    },
    http::{header::CONTENT_TYPE, request::Parts},
};
use serde::de::DeserializeOwned;
use snafu::IntoError;

/// Request body sent either as JSON or as a urlencoded form.
///
/// Only a body that can't be parsed at all is rejected. Any other (or missing) content type, and a
/// body that parses but doesn't have the expected shape, yield `T::default()` like an empty body.
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = DirectoryError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mime = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|value| value.trim().to_ascii_lowercase());

        match mime.as_deref() {
            Some("application/json") => match Json::<T>::from_request(req, state).await {
                Ok(Json(body)) => Ok(Self(body)),
                Err(JsonRejection::JsonDataError(e)) => {
                    debug!(?e, "JSON body had an unexpected shape, treating it as empty");
                    Ok(Self(T::default()))
                }
                Err(e) => Err(MalformedJsonSnafu.into_error(e)),
            },
            Some("application/x-www-form-urlencoded") => {
                match Form::<T>::from_request(req, state).await {
                    Ok(Form(body)) => Ok(Self(body)),
                    Err(FormRejection::FailedToDeserializeFormBody(e)) => {
                        debug!(?e, "Form body had an unexpected shape, treating it as empty");
                        Ok(Self(T::default()))
                    }
                    Err(e) => Err(MalformedFormSnafu.into_error(e)),
                }
            }
            _ => Ok(Self(T::default())),
        }
    }
}

/// Student id exactly as it appeared in the path.
///
/// It is bound as text, so SQLite's integer affinity decides what it matches (`1.0` finds row 1,
/// `abc` finds nothing).
pub struct StudentId(pub String);

impl<S> FromRequestParts<S> for StudentId
where
    S: Send + Sync,
{
    type Rejection = DirectoryError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| DirectoryError::StudentNotFound { id: String::new() })?;

        Ok(Self(raw))
    }
}
