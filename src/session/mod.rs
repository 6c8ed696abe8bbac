use std::fmt;

use axum::http::{header::InvalidHeaderValue, HeaderMap, HeaderValue};
use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

pub(crate) mod extractors;

pub use extractors::MaybeSession;

pub const SESSION_COOKIE: &str = "sessionId";

/// Opaque identifier scoping meals to one anonymous client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

pub(crate) fn is_valid_session_id(raw: &str) -> bool {
    lazy_static! {
        static ref SESSION_RE: Regex = Regex::new(r"^[A-Za-z0-9_-]{1,128}$").unwrap();
    }
    SESSION_RE.is_match(raw)
}

impl SessionId {
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        is_valid_session_id(&raw).then_some(Self(raw))
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Looks up the session cookie across every `Cookie` header.
    ///
    /// A present but malformed value counts as absent.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(axum::http::header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, value)| Self::new(value.trim_matches('"')))
    }

    /// `Set-Cookie` value issuing this session for `max_age_secs`.
    pub fn to_cookie(&self, max_age_secs: u64) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_str(&format!(
            "{SESSION_COOKIE}={}; Max-Age={max_age_secs}; Path=/",
            self.0
        ))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
