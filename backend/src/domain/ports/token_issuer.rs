//! Port for issuing and verifying signed bearer tokens.

use crate::domain::{AccessToken, Identity};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token issuer adapters.
    pub enum TokenIssuerError {
        /// The token is malformed or its signature does not match.
        Invalid => "token is invalid",
        /// The token was valid once but its expiry has passed.
        Expired => "token has expired",
        /// The issuer could not produce a token.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Issues tokens for authenticated identities and verifies presented tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Sign a token carrying `identity`.
    fn issue(&self, identity: &Identity) -> Result<AccessToken, TokenIssuerError>;

    /// Check a presented token and return the identity it carries.
    fn verify(&self, token: &str) -> Result<Identity, TokenIssuerError>;
}
