//! Password digests and token minting backed by OS entropy.

use argon2::Argon2;
use argon2::password_hash::Output;
use rand::RngCore;
use rand::rngs::OsRng;

use crate::domain::ports::{PasswordHashError, PasswordHasher, TokenGenerator};
use crate::domain::{AccessToken, PasswordDigest};

const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;
const TOKEN_LEN: usize = 32;

/// Argon2id over a per-user random salt. Salt and hash are stored as hex.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    fn derive(&self, plaintext: &str, salt: &[u8], out: &mut [u8]) -> Result<(), argon2::Error> {
        Argon2::default().hash_password_into(plaintext.as_bytes(), salt, out)
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn digest(&self, plaintext: &str) -> Result<PasswordDigest, PasswordHashError> {
        let mut salt = [0_u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let mut hash = [0_u8; HASH_LEN];
        self.derive(plaintext, &salt, &mut hash)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(PasswordDigest::new(hex::encode(salt), hex::encode(hash)))
    }

    fn verify(&self, plaintext: &str, stored: &PasswordDigest) -> bool {
        let (Ok(salt), Ok(expected)) = (hex::decode(stored.salt()), hex::decode(stored.hash()))
        else {
            return false;
        };
        let mut actual = vec![0_u8; expected.len()];
        if self.derive(plaintext, &salt, &mut actual).is_err() {
            return false;
        }
        // `Output` equality is constant time.
        match (Output::new(&actual), Output::new(&expected)) {
            (Ok(actual), Ok(expected)) => actual == expected,
            _ => false,
        }
    }
}

/// Mints 256-bit hex tokens from the OS random source.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> AccessToken {
        let mut bytes = [0_u8; TOKEN_LEN];
        OsRng.fill_bytes(&mut bytes);
        AccessToken::from_generated(hex::encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::new()
    }

    #[rstest]
    fn digest_then_verify_accepts_the_same_password(hasher: Argon2PasswordHasher) {
        let digest = hasher.digest("correct horse").expect("digest");
        assert_eq!(digest.salt().len(), SALT_LEN * 2);
        assert_eq!(digest.hash().len(), HASH_LEN * 2);
        assert!(hasher.verify("correct horse", &digest));
        assert!(!hasher.verify("correct horse ", &digest));
    }

    #[rstest]
    fn salts_differ_between_digests(hasher: Argon2PasswordHasher) {
        let first = hasher.digest("pw").expect("digest");
        let second = hasher.digest("pw").expect("digest");
        assert_ne!(first.salt(), second.salt());
        assert_ne!(first.hash(), second.hash());
    }

    #[rstest]
    fn digests_are_deterministic_for_a_salt(hasher: Argon2PasswordHasher) {
        let digest = hasher.digest("pw").expect("digest");
        let salt = hex::decode(digest.salt()).expect("hex salt");
        let mut again = [0_u8; HASH_LEN];
        hasher.derive("pw", &salt, &mut again).expect("derive");
        assert_eq!(hex::encode(again), digest.hash());
    }

    #[rstest]
    #[case("zz", "00")]
    #[case("00112233445566778899aabbccddeeff", "not-hex")]
    #[case("00112233445566778899aabbccddeeff", "0011")]
    fn malformed_digests_never_verify(
        hasher: Argon2PasswordHasher,
        #[case] salt: &str,
        #[case] hash: &str,
    ) {
        assert!(!hasher.verify("pw", &PasswordDigest::new(salt, hash)));
    }

    #[rstest]
    fn tokens_are_long_unique_hex() {
        let generator = RandomTokenGenerator;
        let first = generator.generate();
        let second = generator.generate();
        assert_eq!(first.as_str().len(), TOKEN_LEN * 2);
        assert!(first.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }
}
