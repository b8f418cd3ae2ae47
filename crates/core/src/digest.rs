//! Message digests and HMAC signatures.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DigestError {
    #[error("Secret key must not be empty")]
    EmptySecret,

    #[error("Secret key has an invalid length")]
    InvalidKey,

    #[error("Signature is not valid {0}")]
    InvalidSignature(Encoding),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha256,
        Algorithm::Sha384,
        Algorithm::Sha512,
    ];
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Algorithm::Md5 => "MD5",
            Algorithm::Sha1 => "SHA-1",
            Algorithm::Sha256 => "SHA-256",
            Algorithm::Sha384 => "SHA-384",
            Algorithm::Sha512 => "SHA-512",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashOutput {
    pub algorithm: Algorithm,
    pub digest: String,
}

/// Lowercase hex digest of `bytes`.
pub fn hash(algorithm: Algorithm, bytes: &[u8]) -> String {
    match algorithm {
        Algorithm::Md5 => format!("{:x}", md5::compute(bytes)),
        Algorithm::Sha1 => hex::encode(Sha1::digest(bytes)),
        Algorithm::Sha256 => hex::encode(Sha256::digest(bytes)),
        Algorithm::Sha384 => hex::encode(Sha384::digest(bytes)),
        Algorithm::Sha512 => hex::encode(Sha512::digest(bytes)),
    }
}

pub fn hash_all(bytes: &[u8]) -> Vec<HashOutput> {
    Algorithm::ALL
        .iter()
        .map(|algorithm| HashOutput {
            algorithm: *algorithm,
            digest: hash(*algorithm, bytes),
        })
        .collect()
}

// ============================================================================
// HMAC
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HmacAlgorithm {
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl std::fmt::Display for HmacAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HmacAlgorithm::Sha256 => "HMAC-SHA256",
            HmacAlgorithm::Sha384 => "HMAC-SHA384",
            HmacAlgorithm::Sha512 => "HMAC-SHA512",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Hex,
    Base64,
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Encoding::Hex => f.write_str("hex"),
            Encoding::Base64 => f.write_str("Base64"),
        }
    }
}

fn keyed<M: Mac + KeyInit>(secret: &[u8], message: &[u8]) -> Result<M, DigestError> {
    if secret.is_empty() {
        return Err(DigestError::EmptySecret);
    }
    let mut mac = <M as KeyInit>::new_from_slice(secret).map_err(|_| DigestError::InvalidKey)?;
    Mac::update(&mut mac, message);
    Ok(mac)
}

/// Raw HMAC tag bytes.
pub fn hmac_bytes(
    algorithm: HmacAlgorithm,
    message: &[u8],
    secret: &[u8],
) -> Result<Vec<u8>, DigestError> {
    let tag = match algorithm {
        HmacAlgorithm::Sha256 => keyed::<Hmac<Sha256>>(secret, message)?
            .finalize()
            .into_bytes()
            .to_vec(),
        HmacAlgorithm::Sha384 => keyed::<Hmac<Sha384>>(secret, message)?
            .finalize()
            .into_bytes()
            .to_vec(),
        HmacAlgorithm::Sha512 => keyed::<Hmac<Sha512>>(secret, message)?
            .finalize()
            .into_bytes()
            .to_vec(),
    };
    Ok(tag)
}

/// Check `tag` against the HMAC of `message` in constant time.
pub fn hmac_verify(
    algorithm: HmacAlgorithm,
    message: &[u8],
    secret: &[u8],
    tag: &[u8],
) -> Result<bool, DigestError> {
    let valid = match algorithm {
        HmacAlgorithm::Sha256 => keyed::<Hmac<Sha256>>(secret, message)?.verify_slice(tag),
        HmacAlgorithm::Sha384 => keyed::<Hmac<Sha384>>(secret, message)?.verify_slice(tag),
        HmacAlgorithm::Sha512 => keyed::<Hmac<Sha512>>(secret, message)?.verify_slice(tag),
    };
    Ok(valid.is_ok())
}

pub fn hmac(
    algorithm: HmacAlgorithm,
    message: &[u8],
    secret: &[u8],
    encoding: Encoding,
) -> Result<String, DigestError> {
    let tag = hmac_bytes(algorithm, message, secret)?;
    Ok(match encoding {
        Encoding::Hex => hex::encode(tag),
        Encoding::Base64 => STANDARD.encode(tag),
    })
}

/// Verify a hex or Base64 signature string. Hex is case-insensitive.
pub fn verify_signature(
    algorithm: HmacAlgorithm,
    message: &[u8],
    secret: &[u8],
    signature: &str,
    encoding: Encoding,
) -> Result<bool, DigestError> {
    let signature = signature.trim();
    let tag = match encoding {
        Encoding::Hex => hex::decode(signature).ok(),
        Encoding::Base64 => STANDARD.decode(signature).ok(),
    }
    .ok_or(DigestError::InvalidSignature(encoding))?;
    hmac_verify(algorithm, message, secret, &tag)
}
