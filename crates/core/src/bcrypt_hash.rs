//! bcrypt password hashing and verification.
//!
//! Hashing is the one deliberately slow operation in the crate; the cost
//! factor is capped so a single call stays well under a few seconds.

use serde::Serialize;

pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 14;
pub const DEFAULT_COST: u32 = 10;

/// bcrypt only reads this many bytes of a password.
pub const MAX_PASSWORD_BYTES: usize = 72;

const VERSIONS: [&str; 4] = ["2a", "2b", "2x", "2y"];
const SALT_CHARS: usize = 22;
const CHECKSUM_CHARS: usize = 31;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BcryptError {
    #[error("Enter a password to hash")]
    EmptyPassword,

    #[error("Cost must be between 4 and 14, got {0}")]
    Cost(u32),

    #[error("Invalid bcrypt hash format")]
    InvalidHash,

    #[error("bcrypt failed: {0}")]
    Hashing(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hashed {
    pub hash: String,
    pub cost: u32,
    /// The password was longer than [`MAX_PASSWORD_BYTES`]; the tail is ignored.
    pub truncated: bool,
}

/// The parts of a modular-crypt `$2b$10$<salt><checksum>` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashInfo {
    pub version: String,
    pub cost: u32,
    pub salt: String,
    pub checksum: String,
}

pub fn hash(password: &str, cost: u32) -> Result<Hashed, BcryptError> {
    if password.is_empty() {
        return Err(BcryptError::EmptyPassword);
    }
    if !(MIN_COST..=MAX_COST).contains(&cost) {
        return Err(BcryptError::Cost(cost));
    }

    let hash = ::bcrypt::hash(password, cost).map_err(|e| BcryptError::Hashing(e.to_string()))?;
    Ok(Hashed {
        hash,
        cost,
        truncated: password.len() > MAX_PASSWORD_BYTES,
    })
}

pub fn verify(password: &str, hash: &str) -> Result<bool, BcryptError> {
    let hash = hash.trim();
    inspect(hash)?;
    ::bcrypt::verify(password, hash).map_err(|_| BcryptError::InvalidHash)
}

pub fn inspect(hash: &str) -> Result<HashInfo, BcryptError> {
    let invalid = || BcryptError::InvalidHash;

    let mut parts = hash.trim().split('$');
    let (Some(""), Some(version), Some(cost), Some(rest), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return Err(invalid());
    };

    if !VERSIONS.contains(&version) {
        return Err(invalid());
    }
    if cost.len() != 2 || !cost.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let cost: u32 = cost.parse().map_err(|_| invalid())?;
    if !(MIN_COST..=31).contains(&cost) {
        return Err(invalid());
    }

    let alphabet = |b: u8| b.is_ascii_alphanumeric() || b == b'.' || b == b'/';
    if rest.len() != SALT_CHARS + CHECKSUM_CHARS || !rest.bytes().all(alphabet) {
        return Err(invalid());
    }
    let (salt, checksum) = rest.split_at(SALT_CHARS);

    Ok(HashInfo {
        version: version.to_string(),
        cost,
        salt: salt.to_string(),
        checksum: checksum.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: &str = "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

    // ============================================================================
    // hash / verify tests
    // ============================================================================

    #[test]
    fn test_hash_then_verify() {
        let hashed = hash("correct horse", MIN_COST).unwrap();
        assert!(hashed.hash.starts_with("$2b$04$"));
        assert_eq!(hashed.hash.len(), 60);
        assert!(!hashed.truncated);

        assert!(verify("correct horse", &hashed.hash).unwrap());
        assert!(!verify("battery staple", &hashed.hash).unwrap());
    }

    #[test]
    fn test_hash_salts_every_call() {
        let a = hash("same", MIN_COST).unwrap();
        let b = hash("same", MIN_COST).unwrap();
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn test_hash_rejects_bad_input() {
        assert_eq!(hash("", DEFAULT_COST), Err(BcryptError::EmptyPassword));
        assert_eq!(hash("pw", 3), Err(BcryptError::Cost(3)));
        assert_eq!(hash("pw", 15), Err(BcryptError::Cost(15)));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert_eq!(verify("pw", "not-a-hash"), Err(BcryptError::InvalidHash));
        assert_eq!(verify("pw", &KNOWN[..59]), Err(BcryptError::InvalidHash));
    }

    // ============================================================================
    // inspect tests
    // ============================================================================

    #[test]
    fn test_inspect_known_hash() {
        let info = inspect(KNOWN).unwrap();
        assert_eq!(info.version, "2a");
        assert_eq!(info.cost, 10);
        assert_eq!(info.salt, "N9qo8uLOickgx2ZMRZoMye");
        assert_eq!(info.checksum, "IjZAgcfl7p92ldGxad68LJZdL17lhWy");
    }

    #[test]
    fn test_inspect_rejects_unknown_version_and_cost() {
        assert!(inspect(&KNOWN.replace("$2a$", "$3a$")).is_err());
        assert!(inspect(&KNOWN.replace("$10$", "$99$")).is_err());
        assert!(inspect(&KNOWN.replace("$10$", "$1$")).is_err());
        assert!(inspect(&format!("{KNOWN}$")).is_err());
    }
}
