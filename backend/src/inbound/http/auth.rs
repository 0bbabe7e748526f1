//! Bearer token extraction.
//!
//! [`Caller`] resolves the `Authorization: Bearer <token>` header through the
//! account service. Missing or rejected tokens leave the caller anonymous;
//! [`Caller::authorize`] then turns that into a `401`, and a role that lacks
//! the operation into a `403`.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Error, ErrorCode, Identity, Operation, authorize};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "bearer ";

/// The identity behind a request, if its token verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    identity: Option<Identity>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    pub fn identified(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Apply the access policy for `operation`.
    pub fn authorize(&self, operation: Operation) -> Result<Identity, Error> {
        authorize(self.identity.as_ref(), operation)
    }
}

/// Token text following a case-insensitive `Bearer` scheme.
fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let prefix = header.get(..BEARER_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(BEARER_PREFIX) {
        return None;
    }
    let token = header.get(BEARER_PREFIX.len()..)?.trim();
    (!token.is_empty()).then_some(token)
}

fn resolve(req: &HttpRequest) -> Result<Caller, Error> {
    let Some(token) = bearer_token(req) else {
        return Ok(Caller::anonymous());
    };
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;

    match state.accounts.authenticate(token) {
        Ok(identity) => Ok(Caller::identified(identity)),
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            debug!(reason = err.message(), "bearer token rejected");
            Ok(Caller::anonymous())
        }
        Err(err) => Err(err),
    }
}

impl FromRequest for Caller {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve(req))
    }
}
