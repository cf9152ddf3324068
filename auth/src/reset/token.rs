use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Digest;
use sha2::Sha256;

/// A freshly issued password-reset token.
///
/// The plaintext is handed to the user out-of-band (email) and exists only
/// here and in that message. Only the digest may be persisted.
#[derive(Debug, Clone)]
pub struct ResetTokenPair {
    /// Hex-encoded random token, sent to the user
    pub plaintext: String,
    /// Hex-encoded SHA-256 digest of the plaintext, stored server-side
    pub hash: String,
}

/// Generator for single-use password-reset tokens.
pub struct ResetTokenGenerator;

impl ResetTokenGenerator {
    const TOKEN_BYTES: usize = 32;

    /// Issue a new reset token pair from cryptographically random bytes.
    pub fn issue() -> ResetTokenPair {
        let mut bytes = [0u8; Self::TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let plaintext = hex::encode(bytes);
        let hash = Self::hash(&plaintext);

        ResetTokenPair { plaintext, hash }
    }

    /// Digest a plaintext token.
    ///
    /// Deterministic: the same plaintext always yields the same digest, so
    /// a submitted token can be looked up by its stored hash.
    pub fn hash(plaintext: &str) -> String {
        hex::encode(Sha256::digest(plaintext.as_bytes()))
    }
}
