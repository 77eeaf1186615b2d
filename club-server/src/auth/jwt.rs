//! JWT token service
//!
//! Issues and validates the admin capability token.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role carried by every token this service issues
pub const ADMIN_ROLE: &str = "admin";

const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// HS256 secret (at least 32 bytes)
    pub secret: String,
    pub expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    /// Build a config around an explicit secret with default claims
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_minutes: 480,
            issuer: "club-server".to_string(),
            audience: "club-admin".to_string(),
        }
    }

    /// Load from `JWT_SECRET` / `JWT_EXPIRATION_MINUTES`
    ///
    /// A missing secret is only tolerated in development, where a random one
    /// is generated (tokens then do not survive a restart).
    pub fn from_env(allow_generated: bool) -> Result<Self, JwtError> {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => {
                if secret.len() < MIN_SECRET_LEN {
                    return Err(JwtError::ConfigError(format!(
                        "JWT_SECRET must be at least {MIN_SECRET_LEN} characters long"
                    )));
                }
                secret
            }
            Err(_) if allow_generated => {
                tracing::warn!("JWT_SECRET not set, generating a temporary key for development");
                generate_printable_secret()?
            }
            Err(_) => {
                return Err(JwtError::ConfigError(
                    "JWT_SECRET environment variable must be set".to_string(),
                ));
            }
        };

        let mut config = Self::with_secret(secret);
        if let Some(minutes) = std::env::var("JWT_EXPIRATION_MINUTES")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.expiration_minutes = minutes;
        }
        Ok(config)
    }
}

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin username
    pub sub: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),

    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Generate a 64-character printable secret
pub fn generate_printable_secret() -> Result<String, JwtError> {
    const ALLOWED: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_=+!@#%^&*";

    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    rng.fill(&mut bytes).map_err(|_| {
        JwtError::KeyGenerationFailed("Failed to generate secure random key".to_string())
    })?;

    Ok(bytes
        .iter()
        .map(|b| ALLOWED[*b as usize % ALLOWED.len()] as char)
        .collect())
}

/// Issued token plus its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// Unix millis
    pub expires_at: i64,
}

#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue an admin token for `username`
    pub fn generate_token(&self, username: &str) -> Result<IssuedToken, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: username.to_string(),
            role: ADMIN_ROLE.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_at: expiration.timestamp_millis(),
        })
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an `Authorization` header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

/// Authenticated administrator, inserted into request extensions by
/// [`super::require_admin`]
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub username: String,
}

impl TryFrom<Claims> for CurrentAdmin {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        if claims.role != ADMIN_ROLE {
            return Err(JwtError::InvalidToken(format!(
                "unexpected role: {}",
                claims.role
            )));
        }
        Ok(Self {
            username: claims.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::with_config(JwtConfig::with_secret(
            "test-secret-that-is-definitely-longer-than-32",
        ))
    }

    #[test]
    fn token_round_trips_admin_claims() {
        let service = service();
        let issued = service.generate_token("admin").unwrap();
        let claims = service.validate_token(&issued.token).unwrap();

        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role, ADMIN_ROLE);
        assert_eq!(claims.iss, "club-server");
        assert!(issued.expires_at > Utc::now().timestamp_millis());

        let admin = CurrentAdmin::try_from(claims).unwrap();
        assert_eq!(admin.username, "admin");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other = JwtService::with_config(JwtConfig::with_secret(
            "another-secret-that-is-also-longer-than-32",
        ));
        let issued = other.generate_token("admin").unwrap();
        assert!(service().validate_token(&issued.token).is_err());
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let mut config = JwtConfig::with_secret("test-secret-that-is-definitely-longer-than-32");
        config.expiration_minutes = -10;
        let service = JwtService::with_config(config);
        let issued = service.generate_token("admin").unwrap();

        assert!(matches!(
            service.validate_token(&issued.token),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn non_admin_role_is_not_a_capability() {
        let claims = Claims {
            sub: "someone".into(),
            role: "student".into(),
            exp: 0,
            iat: 0,
            iss: String::new(),
            aud: String::new(),
        };
        assert!(CurrentAdmin::try_from(claims).is_err());
    }

    #[test]
    fn printable_secret_is_long_enough() {
        let a = generate_printable_secret().unwrap();
        let b = generate_printable_secret().unwrap();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }
}
