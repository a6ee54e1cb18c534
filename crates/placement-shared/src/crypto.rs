use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::constants::KDF_CONTEXT_PASSWORD;
use crate::error::CodecError;

// BLAKE3 KDF with domain separation, hex-encoded for storage
pub fn hash_password(password: &str) -> String {
    let mut hasher = blake3::Hasher::new_derive_key(KDF_CONTEXT_PASSWORD);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize().as_bytes())
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    hash_password(password) == stored_hash
}

pub fn encode_cv(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode_cv(encoded: &str) -> Result<Vec<u8>, CodecError> {
    Ok(STANDARD.decode(encoded.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic_hex() {
        let h1 = hash_password("hunter2");
        let h2 = hash_password("hunter2");
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
        assert!(h1.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_verify_password() {
        let stored = hash_password("correct horse");
        assert!(verify_password("correct horse", &stored));
        assert!(!verify_password("Correct horse", &stored));
    }

    #[test]
    fn test_cv_roundtrip() {
        let pdf = b"%PDF-1.4 fake cv".to_vec();
        let encoded = encode_cv(&pdf);
        assert_eq!(decode_cv(&encoded).unwrap(), pdf);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_cv("not base64 !!").is_err());
    }
}
