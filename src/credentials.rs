//! Admin credential validation, injected into the login handler.
//! Used by: handlers::auth, state.

use subtle::ConstantTimeEq;

pub trait CredentialValidator: Send + Sync {
    fn validate(&self, admin_id: &str, secret_key: &str) -> bool;
}

/// The single shared admin id / secret key pair configured out of band.
pub struct StaticCredentials {
    admin_id: String,
    secret_key: String,
}

impl StaticCredentials {
    pub fn new(admin_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            admin_id: admin_id.into(),
            secret_key: secret_key.into(),
        }
    }
}

impl CredentialValidator for StaticCredentials {
    fn validate(&self, admin_id: &str, secret_key: &str) -> bool {
        // Both comparisons always run.
        let id_ok = self.admin_id.as_bytes().ct_eq(admin_id.as_bytes());
        let key_ok = self.secret_key.as_bytes().ct_eq(secret_key.as_bytes());
        bool::from(id_ok & key_ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> StaticCredentials {
        StaticCredentials::new("root-admin", "correct horse")
    }

    #[test]
    fn matching_pair_accepted() {
        assert!(creds().validate("root-admin", "correct horse"));
    }

    #[test]
    fn wrong_secret_rejected() {
        assert!(!creds().validate("root-admin", "correct horsE"));
        assert!(!creds().validate("root-admin", ""));
    }

    #[test]
    fn wrong_id_rejected() {
        assert!(!creds().validate("root", "correct horse"));
        assert!(!creds().validate("", "correct horse"));
    }

    #[test]
    fn swapped_fields_rejected() {
        assert!(!creds().validate("correct horse", "root-admin"));
    }
}
