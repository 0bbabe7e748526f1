//! HMAC-SHA256 signed bearer tokens.
//!
//! A token is `<payload>.<signature>`: the payload is the base64url JSON
//! claims (`sub`, `role`, `exp`) and the signature is the hex HMAC of the
//! payload text under the server secret.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Duration;
use hmac::{Hmac, Mac};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::ports::{TokenIssuer, TokenIssuerError};
use crate::domain::{AccessToken, Identity, Role, UserId};

type HmacSha256 = Hmac<Sha256>;

/// Secret key used to sign tokens. Wiped from memory on drop.
#[derive(Clone)]
pub struct TokenSigningKey(Zeroizing<Vec<u8>>);

impl TokenSigningKey {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self(Zeroizing::new(secret.as_ref().to_vec()))
    }
}

impl std::fmt::Debug for TokenSigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenSigningKey(<redacted>)")
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    role: Role,
    exp: i64,
}

/// [`TokenIssuer`] producing HMAC-signed tokens with a fixed lifetime.
#[derive(Clone)]
pub struct HmacTokenIssuer {
    key: TokenSigningKey,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl HmacTokenIssuer {
    pub fn new(key: TokenSigningKey, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { key, ttl, clock }
    }

    fn mac(&self) -> Result<HmacSha256, TokenIssuerError> {
        HmacSha256::new_from_slice(&self.key.0)
            .map_err(|err| TokenIssuerError::signing(err.to_string()))
    }
}

impl TokenIssuer for HmacTokenIssuer {
    fn issue(&self, identity: &Identity) -> Result<AccessToken, TokenIssuerError> {
        let claims = Claims {
            sub: *identity.user_id.as_uuid(),
            role: identity.role,
            exp: (self.clock.utc() + self.ttl).timestamp(),
        };
        let json =
            serde_json::to_vec(&claims).map_err(|err| TokenIssuerError::signing(err.to_string()))?;
        let payload = URL_SAFE_NO_PAD.encode(json);

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());
        Ok(AccessToken::new(format!("{payload}.{signature}")))
    }

    fn verify(&self, token: &str) -> Result<Identity, TokenIssuerError> {
        let (payload, signature) = token.split_once('.').ok_or(TokenIssuerError::Invalid)?;
        let signature = hex::decode(signature).map_err(|_| TokenIssuerError::Invalid)?;

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenIssuerError::Invalid)?;

        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TokenIssuerError::Invalid)?;
        let claims: Claims = serde_json::from_slice(&json).map_err(|_| TokenIssuerError::Invalid)?;
        if claims.exp <= self.clock.utc().timestamp() {
            return Err(TokenIssuerError::Expired);
        }

        Ok(Identity {
            user_id: UserId::from_uuid(claims.sub),
            role: claims.role,
        })
    }
}
