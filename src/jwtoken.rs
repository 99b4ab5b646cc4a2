use std::{fs, io::ErrorKind, path::Path};

use chrono::{DateTime, Days, TimeZone, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind as JwtErrorKind, Algorithm, DecodingKey, EncodingKey,
    Header, TokenData, Validation,
};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    /// Claims for a session starting at `issued_at` and lasting one day.
    pub fn issued(email: &str, issued_at: DateTime<Utc>) -> Result<Claims, SessionError> {
        let expiration = issued_at
            .checked_add_days(Days::new(1))
            .ok_or(SessionError::ExpiryOutOfRange)?;

        Ok(Claims {
            sub: email.to_string(),
            iat: issued_at.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        })
    }
}

pub fn generate_token(email: &str, secret: &str) -> Result<String, SessionError> {
    let claims = Claims::issued(email, Utc::now())?;
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;
    Ok(token)
}

pub fn decode_token(token: &str, secret: &str) -> Result<TokenData<Claims>, SessionError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|error| match error.kind() {
        JwtErrorKind::ExpiredSignature => SessionError::Expired,
        _ => SessionError::Token(error),
    })
}

/// The logged-in admin. Handed to every call that talks to the API, which
/// checks expiry before sending anything.
#[derive(Clone)]
pub struct Session {
    token: String,
    secret: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(token: String, secret: impl Into<String>) -> Session {
        Session {
            token,
            secret: secret.into(),
        }
    }

    pub fn issue(email: &str, secret: &str) -> Result<Session, SessionError> {
        Ok(Session::new(generate_token(email, secret)?, secret))
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the claims if the token is still valid.
    pub fn check(&self) -> Result<Claims, SessionError> {
        Ok(decode_token(&self.token, &self.secret)?.claims)
    }

    pub fn expires_at(&self) -> Result<DateTime<Utc>, SessionError> {
        let claims = self.check()?;
        Utc.timestamp_opt(claims.exp as i64, 0)
            .single()
            .ok_or(SessionError::Expired)
    }

    pub fn store(&self, path: &Path) -> Result<(), SessionError> {
        fs::write(path, &self.token)?;
        info!("Session stored at {}", path.display());
        Ok(())
    }

    /// Reads a stored token back. A missing file means nobody logged in, an
    /// expired token is rejected here rather than on the first request.
    pub fn restore(path: &Path, secret: &str) -> Result<Session, SessionError> {
        let token = match fs::read_to_string(path) {
            Ok(token) => token,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(SessionError::Missing)
            }
            Err(error) => return Err(SessionError::Storage(error)),
        };
        let session = Session::new(token.trim().to_string(), secret);
        session.check()?;
        Ok(session)
    }

    pub fn clear(path: &Path) -> Result<(), SessionError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(SessionError::Storage(error)),
        }
    }
}
