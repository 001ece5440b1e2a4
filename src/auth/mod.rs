//! Request signing
//!
//! The search API authenticates every request with a DPoP-style proof
//! token bound to the HTTP method and target URL. Signing sits behind the
//! [`TokenSigner`] trait so the crawl core never touches key material.

use crate::error::{Error, Result};
use chrono::Utc;
use jsonwebtoken::jwk::Jwk;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;
use uuid::Uuid;


/// Signs one page request into an authentication proof token
pub trait TokenSigner: Send + Sync {
    /// Produce a token binding `method` and `url`, tagged with the
    /// crawl-identifying `nonce`
    fn sign(&self, method: &str, url: &str, nonce: &str) -> Result<String>;
}

/// Claims carried by a DPoP proof
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DpopClaims {
    /// Issued-at, Unix seconds
    pub iat: i64,
    /// Unique token id
    pub jti: String,
    /// HTTP method the proof is bound to
    pub htm: String,
    /// URL the proof is bound to
    pub htu: String,
    /// Crawl-identifying nonce
    pub uuid: String,
}

impl DpopClaims {
    /// Build the claims for one request
    pub fn new(method: &str, url: &str, nonce: &str) -> Self {
        Self {
            iat: Utc::now().timestamp(),
            jti: Uuid::new_v4().to_string(),
            htm: method.to_string(),
            htu: url.to_string(),
            uuid: nonce.to_string(),
        }
    }
}

/// ES256 proof signer backed by an EC private key
pub struct DpopSigner {
    key: EncodingKey,
    jwk: Option<Jwk>,
}

impl DpopSigner {
    /// Load the signing key from a PEM-encoded EC private key
    pub fn from_ec_pem(pem: &[u8]) -> Result<Self> {
        let key = EncodingKey::from_ec_pem(pem)
            .map_err(|e| Error::signing(format!("invalid EC private key: {e}")))?;
        Ok(Self { key, jwk: None })
    }

    /// Embed the public JWK (JSON text) in each proof header
    pub fn with_jwk(mut self, jwk_json: &str) -> Result<Self> {
        self.jwk = Some(parse_jwk(jwk_json)?);
        Ok(self)
    }
}

impl TokenSigner for DpopSigner {
    fn sign(&self, method: &str, url: &str, nonce: &str) -> Result<String> {
        let mut header = Header::new(Algorithm::ES256);
        header.typ = Some("dpop+jwt".to_string());
        header.jwk = self.jwk.clone();

        let claims = DpopClaims::new(method, url, nonce);
        jsonwebtoken::encode(&header, &claims, &self.key)
            .map_err(|e| Error::signing(format!("proof encoding failed: {e}")))
    }
}

impl std::fmt::Debug for DpopSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DpopSigner")
            .field("has_jwk", &self.jwk.is_some())
            .finish_non_exhaustive()
    }
}

fn parse_jwk(json: &str) -> Result<Jwk> {
    serde_json::from_str(json).map_err(|e| Error::signing(format!("invalid JWK: {e}")))
}

/// Signer that returns a fixed, pre-minted token
///
/// Useful in tests and in setups where proofs are generated by an external
/// tool.
#[derive(Debug, Clone)]
pub struct StaticSigner {
    token: String,
}

impl StaticSigner {
    /// Create a signer that always yields `token`
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl TokenSigner for StaticSigner {
    fn sign(&self, _method: &str, _url: &str, _nonce: &str) -> Result<String> {
        Ok(self.token.clone())
    }
}
