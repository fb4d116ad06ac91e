//! # Password Hashing
//!
//! Thin wrapper over `bcrypt`. Hashing and verification are CPU-bound, so
//! both run on tokio's blocking pool and are awaited to completion.

use thiserror::Error;

/// Work factor used when `BCRYPT_COST` is not set.
pub const DEFAULT_COST: u32 = 10;

/// Lowest work factor bcrypt accepts.
pub const MIN_COST: u32 = 4;

/// Highest work factor bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Errors raised by the hashing library. A wrong password is not one of them.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// bcrypt rejected the input or the stored hash
    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// The blocking task panicked or was cancelled
    #[error("Password hashing task failed: {0}")]
    Task(String),

    /// Work factor outside what bcrypt supports
    #[error("Invalid bcrypt cost: {0}")]
    InvalidCost(u32),
}

/// Produces salted bcrypt hashes at a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with the given work factor (4..=31).
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(PasswordError::InvalidCost(cost));
        }
        Ok(Self { cost })
    }

    #[cfg(test)]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password with a freshly generated random salt.
    pub async fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let cost = self.cost;
        let plaintext = plaintext.to_owned();

        tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| PasswordError::Task(e.to_string()))?
            .map_err(PasswordError::from)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

/// Check a candidate password against a stored bcrypt hash.
///
/// A mismatch is `Ok(false)`. Only a malformed hash or a failed blocking
/// task produces an error.
pub async fn verify_password(candidate: &str, hash: &str) -> Result<bool, PasswordError> {
    let candidate = candidate.to_owned();
    let hash = hash.to_owned();

    tokio::task::spawn_blocking(move || bcrypt::verify(candidate, &hash))
        .await
        .map_err(|e| PasswordError::Task(e.to_string()))?
        .map_err(PasswordError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_is_salted() {
        let hasher = PasswordHasher::new(MIN_COST).unwrap();
        let first = hasher.hash("tomatoes").await.unwrap();
        let second = hasher.hash("tomatoes").await.unwrap();

        assert_ne!(first, "tomatoes");
        assert_ne!(first, second);
        assert!(verify_password("tomatoes", &first).await.unwrap());
        assert!(verify_password("tomatoes", &second).await.unwrap());
    }

    #[tokio::test]
    async fn test_default_cost_is_encoded() {
        let hash = PasswordHasher::default().hash("onions").await.unwrap();
        assert!(hash.starts_with("$2b$10$"), "unexpected hash prefix: {}", hash);
    }

    #[tokio::test]
    async fn test_wrong_password_is_false_not_error() {
        let hasher = PasswordHasher::new(MIN_COST).unwrap();
        let hash = hasher.hash("potatoes").await.unwrap();

        assert!(!verify_password("potatoe", &hash).await.unwrap());
        assert!(!verify_password("", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_hash_is_error() {
        assert!(verify_password("potatoes", "not-a-hash").await.is_err());
    }

    #[test]
    fn test_cost_bounds() {
        assert!(PasswordHasher::new(MIN_COST - 1).is_err());
        assert!(PasswordHasher::new(MAX_COST + 1).is_err());
        assert_eq!(PasswordHasher::new(MIN_COST).unwrap().cost(), 4);
        assert_eq!(PasswordHasher::new(MAX_COST).unwrap().cost(), 31);
        assert_eq!(PasswordHasher::new(12).unwrap().cost(), 12);
    }
}
