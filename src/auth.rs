use axum::http::{header, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, TokenData, Validation};
use secrecy::{ExposeSecret as _, SecretString};

use crate::prelude::*;

/// How long an issued token stays valid.
pub const TOKEN_LIFETIME_DAYS: i64 = 7;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, new)]
pub struct UserCredentials {
    // public claims
    pub exp: i64,
    /// key of the user inside the `users` table
    pub sub: String,

    // user data
    pub username: String,
}

impl UserCredentials {
    pub fn user(&self) -> Record<User> {
        Record::new(self.sub.clone())
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AuthError {
    #[snafu(display("token invalid"))]
    Decode {
        source: jsonwebtoken::errors::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("failed to encode JWT token"))]
    Encode {
        source: jsonwebtoken::errors::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("token missing"))]
    ExtractToken {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("failed to look up user '{username}'"))]
    SignIn {
        username: String,
        source: DatabaseQueryError,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("invalid username or password"))]
    InvalidLogin {
        username: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl Located for AuthError {
    fn location(&self) -> Location {
        match self {
            AuthError::Decode { location, .. }
            | AuthError::Encode { location, .. }
            | AuthError::ExtractToken { location, .. }
            | AuthError::SignIn { location, .. }
            | AuthError::InvalidLogin { location, .. } => *location,
        }
    }
}

/// Issues and verifies bearer tokens, and checks passwords against the `users` table.
#[derive(Debug, Clone)]
pub struct Authenticator {
    pub secret: SecretString,
    pub algorithm: Algorithm,
    pub validation: Validation,
}

impl Authenticator {
    pub fn new(secret: SecretString, algorithm: Algorithm) -> Self {
        Self {
            secret,
            algorithm,
            validation: Validation::new(algorithm),
        }
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.expose_secret().as_bytes())
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.secret.expose_secret().as_bytes())
    }

    fn header(&self) -> jsonwebtoken::Header {
        jsonwebtoken::Header::new(self.algorithm)
    }

    pub fn decode(&self, token: &str) -> Result<TokenData<UserCredentials>, AuthError> {
        jsonwebtoken::decode(token, &self.decoding_key(), &self.validation).context(DecodeSnafu)
    }

    pub fn encode(&self, claims: &UserCredentials) -> Result<String, AuthError> {
        jsonwebtoken::encode(&self.header(), claims, &self.encoding_key()).context(EncodeSnafu)
    }

    pub fn expiration(&self) -> i64 {
        (Utc::now() + Duration::days(TOKEN_LIFETIME_DAYS)).timestamp()
    }

    pub fn as_credentials(&self, user: &User) -> UserCredentials {
        UserCredentials {
            exp: self.expiration(),
            sub: user.id.key(),
            username: user.username.clone(),
        }
    }

    /// Signs a fresh token for `user`.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        self.encode(&self.as_credentials(user))
    }
}

impl Authenticator {
    /// Reads and verifies the `Authorization: Bearer <token>` header.
    pub fn extract_token(&self, headers: &HeaderMap) -> Result<UserCredentials, AuthError> {
        let header = headers
            .get(header::AUTHORIZATION)
            .context(ExtractTokenSnafu)?;

        let token = header.to_str().ok().context(ExtractTokenSnafu)?;
        let token = strip_bearer(token).context(ExtractTokenSnafu)?;

        self.decode(token).map(|data| data.claims)
    }

    /// Checks `password` against the stored hash for `username`.
    pub async fn signin(&self, username: &str, password: &str, db: &Database) -> Result<User, AuthError> {
        User::find(username, password, db)
            .await
            .context(SignInSnafu { username })?
            .context(InvalidLoginSnafu { username })
    }
}

fn strip_bearer(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    scheme.eq_ignore_ascii_case("bearer").then_some(token.trim())
}
