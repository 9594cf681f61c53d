//! Argon2id によるパスワードハッシュ

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;

use crate::ports::password_hasher::{PasswordHasher as PasswordHasherTrait, Result};

/// Argon2id でパスワードをハッシュ化・照合する（ハッシュごとにランダムなソルト）
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasherTrait for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| format!("password hashing failed: {e}"))?;

        Ok(hash.to_string())
    }

    /// 不一致は `Ok(false)`。保存済みハッシュの形式が不正な場合はエラー。
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| format!("invalid password hash format: {e}"))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(format!("password verification failed: {e}").into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("pw").unwrap();

        assert_ne!(hash, "pw");
        assert!(hasher.verify("pw", &hash).unwrap());
        assert!(!hasher.verify("other", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = Argon2PasswordHasher::new();
        assert_ne!(hasher.hash("pw").unwrap(), hasher.hash("pw").unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let hasher = Argon2PasswordHasher::new();
        assert!(hasher.verify("pw", "not-a-hash").is_err());
    }
}
