//! Password hashing built on argon2
//!
//! Hashing cost is tunable through configuration but clamped so it can
//! never drop below the argon2 crate's recommended defaults. Verification
//! runs against a fixed dummy hash when the username does not resolve, so
//! an unknown user and a wrong password cost the same.

use anyhow::Result;
use argon2::password_hash::SaltString;
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier as _, Version,
};

/// Verified when the looked-up user does not exist. Never matches any
/// password; its parameters mirror the defaults so the comparison costs
/// the same as a real one.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZmluZGV4ZHVtbXlzYWx0MA$AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8";

/// Password hashing service with clamped, tunable cost parameters.
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Build a hasher from the configured costs, raising each one to the
    /// argon2 default when the configuration asks for less.
    pub fn new(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self> {
        let params = Params::new(
            m_cost.max(Params::DEFAULT_M_COST),
            t_cost.max(Params::DEFAULT_T_COST),
            p_cost.max(Params::DEFAULT_P_COST),
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid argon2 parameters: {}", e))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash.
    ///
    /// When `stored` is `None` the comparison still runs, against
    /// [`DUMMY_HASH`], and the result is always `false`. Callers must not
    /// branch on why verification failed.
    pub fn verify(&self, stored: Option<&str>, password: &str) -> bool {
        let phc = stored.unwrap_or(DUMMY_HASH);

        let matched = match PasswordHash::new(phc) {
            Ok(parsed) => self
                .argon2()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        };

        matched && stored.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(0, 0, 0).expect("default parameters are valid")
    }

    #[test]
    fn dummy_hash_is_well_formed() {
        assert!(PasswordHash::new(DUMMY_HASH).is_ok());
    }

    #[test]
    fn costs_are_clamped_to_defaults() {
        let hasher = PasswordHasher::new(1, 1, 1).expect("clamped parameters are valid");
        let hash = hasher.hash("pw123").expect("hashing succeeds");
        assert!(hash.contains(&format!("m={}", Params::DEFAULT_M_COST)));
    }

    #[test]
    fn round_trip_verifies() {
        let hasher = hasher();
        let hash = hasher.hash("pw123").expect("hashing succeeds");
        assert!(hasher.verify(Some(&hash), "pw123"));
        assert!(!hasher.verify(Some(&hash), "wrongpw"));
    }

    #[test]
    fn missing_user_path_never_verifies() {
        let hasher = hasher();
        assert!(!hasher.verify(None, "pw123"));
        assert!(!hasher.verify(None, ""));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let hasher = hasher();
        let first = hasher.hash("pw123").expect("hashing succeeds");
        let second = hasher.hash("pw123").expect("hashing succeeds");
        assert_ne!(first, second);
    }
}
