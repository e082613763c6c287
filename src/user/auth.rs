//! Password hashing and session token generation.

use anyhow::Result;
use rand::distr::Alphanumeric;
use rand::Rng;

const SESSION_TOKEN_LENGTH: usize = 64;

/// Opaque value carried by the session cookie.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SessionToken(pub String);

impl SessionToken {
    pub fn generate() -> SessionToken {
        let rng = rand::rng();
        let random_string: String = rng
            .sample_iter(&Alphanumeric)
            .take(SESSION_TOKEN_LENGTH)
            .map(char::from)
            .collect();
        SessionToken(random_string)
    }
}

mod argon2_hashing {
    use anyhow::{anyhow, Result};
    use argon2::{
        password_hash::{
            rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        },
        Argon2,
    };

    pub fn hash(plain: &[u8]) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash_string = Argon2::default()
            .hash_password(plain, &salt)
            .map_err(|err| anyhow!("{}", err))?
            .to_string();
        Ok(hash_string)
    }

    pub fn verify(plain: &[u8], target_hash: &str) -> Result<bool> {
        let password_hash = PasswordHash::new(target_hash).map_err(|err| anyhow!("{}", err))?;
        Ok(Argon2::default()
            .verify_password(plain, &password_hash)
            .is_ok())
    }
}

/// Hashing scheme for stored passwords. Hashes are PHC strings, so the salt
/// travels inside the hash itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CredentialHasher {
    #[default]
    Argon2,
}

impl CredentialHasher {
    pub fn hash(&self, plain: &str) -> Result<String> {
        match self {
            CredentialHasher::Argon2 => argon2_hashing::hash(plain.as_bytes()),
        }
    }

    /// Fails only when `target_hash` is not a valid hash string.
    pub fn verify(&self, plain: &str, target_hash: &str) -> Result<bool> {
        match self {
            CredentialHasher::Argon2 => argon2_hashing::verify(plain.as_bytes(), target_hash),
        }
    }
}
