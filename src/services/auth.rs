use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during authentication
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing authorization token")]
    MissingToken,
}

/// JWT claims carried by admin tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Password hashing and token issuance for admin accounts
///
/// Passwords are stored as hex-encoded SHA-256 digests over a per-user
/// random salt followed by the password. Tokens are HS256 JWTs whose
/// subject is the username.
pub struct AuthService {
    secret: String,
    token_ttl_secs: u64,
}

impl AuthService {
    pub fn new(secret: impl Into<String>, token_ttl_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            token_ttl_secs,
        }
    }

    /// Generate a fresh random salt
    pub fn generate_salt() -> String {
        Uuid::new_v4().simple().to_string()
    }

    /// Hash a password with the given salt
    pub fn hash_password(password: &str, salt: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Check a password attempt against a stored salt and hash
    pub fn verify_password(password: &str, salt: &str, hash: &str) -> bool {
        Self::hash_password(password, salt) == hash
    }

    /// Issue a token for the given username
    pub fn issue_token(&self, username: &str) -> Result<String, AuthError> {
        let exp = (Utc::now() + chrono::Duration::seconds(self.token_ttl_secs as i64)).timestamp();
        let claims = Claims {
            sub: username.to_string(),
            exp: exp as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Validate a token and return its claims
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(data.claims)
    }

    /// Validate an Authorization header value
    ///
    /// Accepts both `Bearer <token>` and a bare token.
    pub fn authenticate(&self, header: Option<&str>) -> Result<Claims, AuthError> {
        let header = header.ok_or(AuthError::MissingToken)?;
        let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();

        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        self.verify_token(token)
    }
}
