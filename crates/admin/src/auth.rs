//! Admin login gate.
//!
//! Access control here is a convenience latch, not security: the check is
//! a trimmed comparison against the configured phone number, and a
//! successful login is remembered in the data directory until logout.

use tracing::info;

use crate::config::AdminConfig;
use crate::persist::{LocalStore, PersistError, keys};

/// Check a phone number against the configured one. With no number
/// configured, nobody can log in.
#[must_use]
pub fn verify_phone(config: &AdminConfig, phone: &str) -> bool {
    config
        .admin_phone
        .as_deref()
        .is_some_and(|expected| expected.trim() == phone.trim())
}

/// Attempt a login; on success the session is persisted.
///
/// # Errors
///
/// [`PersistError`] when the session cannot be written.
pub fn login(local: &LocalStore, config: &AdminConfig, phone: &str) -> Result<bool, PersistError> {
    if !verify_phone(config, phone) {
        info!("admin login rejected");
        return Ok(false);
    }
    local.save(keys::ADMIN_PHONE, &phone.trim())?;
    info!("admin login accepted");
    Ok(true)
}

/// Drop the persisted session.
///
/// # Errors
///
/// [`PersistError`] when the session file cannot be removed.
pub fn logout(local: &LocalStore) -> Result<(), PersistError> {
    local.remove(keys::ADMIN_PHONE)
}

/// Whether a persisted admin session exists.
#[must_use]
pub fn is_admin(local: &LocalStore) -> bool {
    local.load::<String>(keys::ADMIN_PHONE).is_some()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(phone: Option<&str>) -> AdminConfig {
        AdminConfig {
            admin_phone: phone.map(ToString::to_string),
            ..AdminConfig::default()
        }
    }

    #[test]
    fn test_verify_trims_both_sides() {
        let cfg = config(Some(" +1 555 010 2030 "));
        assert!(verify_phone(&cfg, "+1 555 010 2030"));
        assert!(!verify_phone(&cfg, "+1 555 010 2031"));
    }

    #[test]
    fn test_no_configured_phone_rejects_everything() {
        assert!(!verify_phone(&config(None), ""));
        assert!(!verify_phone(&config(None), "+1 555"));
    }

    #[test]
    fn test_login_logout_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStore::open(dir.path()).unwrap();
        let cfg = config(Some("+1 555"));

        assert!(!is_admin(&local));
        assert!(!login(&local, &cfg, "wrong").unwrap());
        assert!(!is_admin(&local));

        assert!(login(&local, &cfg, "+1 555").unwrap());
        assert!(is_admin(&local));

        logout(&local).unwrap();
        assert!(!is_admin(&local));
    }
}
