use log::{info, warn};

use super::Route;
use crate::config::Config;
use crate::error::SessionError;
use crate::jwtoken::Session;

pub fn login(config: &Config, email: &str, password: &str) -> Result<(Session, Route), SessionError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(SessionError::MissingCredentials);
    }
    if email != config.admin_email || password != config.admin_password {
        warn!("Rejected login for {}", email);
        return Err(SessionError::InvalidCredentials);
    }

    let session = Session::issue(email, &config.jwt_secret)?;
    session.store(&config.session_file)?;
    info!("Admin {} logged in", email);

    Ok((session, Route::Dashboard))
}

pub fn logout(config: &Config) -> Result<Route, SessionError> {
    Session::clear(&config.session_file)?;
    info!("Admin logged out");
    Ok(Route::Login)
}

/// Picks the stored session back up, if it is still valid.
pub fn current_session(config: &Config) -> Result<Session, SessionError> {
    Session::restore(&config.session_file, &config.jwt_secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            session_file: std::env::temp_dir()
                .join(format!("quiz-admin-auth-{}", uuid::Uuid::new_v4())),
            ..Config::default()
        }
    }

    #[test]
    fn login_roundtrip() {
        let config = config();

        let (session, route) = login(&config, "admin@example.com", "password123").unwrap();
        assert_eq!(route, Route::Dashboard);
        assert_eq!(current_session(&config).unwrap().token(), session.token());

        assert_eq!(logout(&config).unwrap(), Route::Login);
        assert!(matches!(current_session(&config), Err(SessionError::Missing)));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let config = config();
        assert!(matches!(
            login(&config, "admin@example.com", "hunter2"),
            Err(SessionError::InvalidCredentials)
        ));
        assert!(matches!(
            login(&config, "", ""),
            Err(SessionError::MissingCredentials)
        ));
        assert!(!config.session_file.exists());
    }
}
