//! Identity extraction for authenticated requests.
//!
//! The service sits behind an identity-aware proxy that validates tokens and
//! forwards the asserted claims as request headers. This extractor rebuilds
//! the domain [`User`] from those headers; the core never sees or verifies a
//! token itself.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload};

use crate::domain::{Error, User, UserId};

/// Header carrying the stable subject identifier.
pub const SUBJECT_HEADER: &str = "X-Auth-Subject";
/// Header carrying the preferred username claim.
pub const USERNAME_HEADER: &str = "X-Auth-Username";
/// Header carrying the given name claim.
pub const GIVEN_NAME_HEADER: &str = "X-Auth-Given-Name";
/// Header carrying the family name claim.
pub const FAMILY_NAME_HEADER: &str = "X-Auth-Family-Name";

/// The authenticated caller, rebuilt from forwarded identity headers.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    /// Borrow the underlying domain user.
    pub fn user(&self) -> &User {
        &self.0
    }
}

fn optional_header(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .map(str::to_owned)
}

fn extract_user(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let subject = optional_header(req, SUBJECT_HEADER)
        .ok_or_else(|| Error::unauthorized("authentication required"))?;

    let id = UserId::new(&subject)
        .map_err(|_| Error::unauthorized("invalid subject asserted by the identity provider"))?;

    Ok(AuthenticatedUser(User {
        id,
        username: optional_header(req, USERNAME_HEADER),
        given_name: optional_header(req, GIVEN_NAME_HEADER),
        family_name: optional_header(req, FAMILY_NAME_HEADER),
    }))
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_user(req))
    }
}
