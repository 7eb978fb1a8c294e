//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Form;

use super::error::HttpError;
use crate::models::FormFields;

/// Row id from the `{id}` path segment.
///
/// Anything other than a positive integer is a 404, like an unknown id.
pub struct EntityId(pub i64);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| HttpError::NotFound {
                resource: "page",
                id: parts.uri.path().to_string(),
            })?;

        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(HttpError::NotFound {
                resource: "page",
                id: raw,
            }),
        }
    }
}

/// Urlencoded form body with repeated keys kept in order.
pub struct FormBody(pub FormFields);

impl<S> FromRequest<S> for FormBody
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs): Form<Vec<(String, String)>> = Form::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::Validation(rejection.body_text()))?;

        Ok(Self(FormFields::from(pairs)))
    }
}
