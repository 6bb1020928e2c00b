use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Failed to hash password: {0}")]
    HashingFailed(String),

    #[error("Failed to parse password hash: {0}")]
    InvalidHash(String),
}

pub type Result<T> = std::result::Result<T, PasswordError>;

/// Argon2id memory cost used by the server, in KiB.
pub const DEFAULT_MEMORY_KIB: u32 = 19 * 1024;
pub const DEFAULT_ITERATIONS: u32 = 2;
pub const DEFAULT_LANES: u32 = 1;

const MAX_PASSWORD_LEN: usize = 512;

/// Salted one-way password hashing. Hashes are stored in PHC string form, so
/// verification reads the parameters back out of the stored hash.
#[derive(Clone)]
pub struct Passwords {
    a2: Argon2<'static>,
}

impl Passwords {
    pub fn new(mem_kib: u32, iters: u32, lanes: u32) -> Result<Self> {
        let params = Params::new(mem_kib, iters, lanes, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;
        let a2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        Ok(Self { a2 })
    }

    pub fn hash(&self, password: &str) -> Result<String> {
        if password.is_empty() || password.chars().count() > MAX_PASSWORD_LEN {
            return Err(PasswordError::HashingFailed(
                "password length out of bounds".into(),
            ));
        }
        let salt = SaltString::generate(&mut OsRng);
        let phc = self
            .a2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
        Ok(phc.to_string())
    }

    /// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
    pub fn verify(&self, password: &str, pw_hash: &str) -> Result<bool> {
        let parsed =
            PasswordHash::new(pw_hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;
        Ok(self
            .a2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
