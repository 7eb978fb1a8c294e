//! One-shot flash notices carried in a short-lived cookie
//!
//! A mutation sets `gigboard_flash` on its redirect; the next page that
//! reads it shows the message and expires the cookie.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponseParts, ResponseParts};

use super::views::Notice;

pub const FLASH_COOKIE: &str = "gigboard_flash";

const FLASH_MAX_AGE_SECS: u32 = 60;

/// Outgoing flash message, set as a response cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash(pub String);

impl Flash {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// `Set-Cookie` value carrying this message.
    pub fn cookie(&self) -> String {
        format!(
            "{FLASH_COOKIE}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={FLASH_MAX_AGE_SECS}",
            urlencoding::encode(&self.0)
        )
    }
}

impl IntoResponseParts for Flash {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        append_cookie(res.headers_mut(), self.cookie());
        Ok(res)
    }
}

/// Flash message read from the request, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomingFlash(pub Option<String>);

impl IncomingFlash {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let message = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == FLASH_COOKIE)
            .and_then(|(_, value)| urlencoding::decode(value).ok())
            .map(|decoded| decoded.into_owned())
            .filter(|message| !message.is_empty());

        Self(message)
    }

    /// Notices for the page layout.
    pub fn notices(&self) -> Vec<Notice> {
        self.0.iter().cloned().map(Notice::success).collect()
    }

    /// Response part that expires the cookie once it has been shown.
    pub fn consume(&self) -> ClearFlash {
        ClearFlash(self.0.is_some())
    }
}

impl<S> FromRequestParts<S> for IncomingFlash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// Expires the flash cookie when it held a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearFlash(bool);

impl IntoResponseParts for ClearFlash {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if self.0 {
            append_cookie(
                res.headers_mut(),
                format!("{FLASH_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0"),
            );
        }
        Ok(res)
    }
}

fn append_cookie(headers: &mut HeaderMap, cookie: String) {
    match HeaderValue::try_from(cookie) {
        Ok(value) => {
            headers.append(SET_COOKIE, value);
        }
        Err(e) => tracing::warn!("dropping unencodable flash cookie: {}", e),
    }
}
