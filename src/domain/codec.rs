//! Reversible id-to-code obfuscation.
//!
//! Short codes are not random: each one is a deterministic, invertible
//! encoding of the row id, parameterized by a server-held secret. The
//! redirect path decodes the incoming code back to the id and looks the
//! record up by primary key, so the stored `short_code` column is never
//! consulted for resolution.
//!
//! The scheme is obfuscation, not cryptography. Its only job is to keep
//! sequential ids from producing visibly sequential codes; it must not be
//! relied on to hide the mapping from anyone with oracle access.
//!
//! # Algorithm
//!
//! 1. The positive id is passed through a 4-round balanced Feistel
//!    permutation over the 64-bit space. Round functions are HMAC-SHA256
//!    keyed by per-round keys derived from the secret, so the permutation
//!    is a pure function of the secret with no per-call entropy.
//! 2. The mixed value is written in base62 using an alphabet shuffled by
//!    the secret, and left-padded with the shuffled zero symbol up to a
//!    7-character floor so small ids do not leak their magnitude.
//!
//! Decoding runs the same steps in reverse. Every malformed input (foreign
//! symbols, empty string, overflow, values that reverse outside the valid
//! id range) collapses into the single [`DecodeError`] signal.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Base62 alphabet in canonical order, before secret shuffling.
const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Minimum length of every generated code.
pub const MIN_CODE_LENGTH: usize = 7;

/// Longest possible code: ceil(64 / log2(62)) base62 digits for a u64.
const MAX_CODE_LENGTH: usize = 11;

const FEISTEL_ROUNDS: usize = 4;

/// Construction and encoding failures. These indicate misconfiguration or
/// caller bugs, never bad client input.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Running with an empty secret would make codes trivially guessable
    /// and incompatible across deployments, so it is rejected at startup.
    #[error("hash secret must not be empty")]
    EmptySecret,

    #[error("link id must be positive, got {0}")]
    NonPositiveId(i64),
}

/// Uniform failure signal for all undecodable inputs.
///
/// Callers must not be able to distinguish *why* a code failed to decode;
/// sub-cases would hand an enumeration oracle to anyone probing the
/// redirect endpoint.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid short code")]
pub struct DecodeError;

/// Salted, reversible mapping between positive ids and short codes.
///
/// A codec built twice from the same secret produces identical codes, even
/// across process boundaries. Built from different secrets, the mappings
/// disagree: a code minted under one secret decodes under another to an id
/// that resolves to nothing (or fails outright).
pub struct ShortCodec {
    /// Secret-shuffled base62 alphabet; index = digit value.
    alphabet: [u8; 62],
    /// Reverse of `alphabet` for ASCII bytes; -1 marks foreign symbols.
    digits: [i8; 128],
    round_keys: [[u8; 32]; FEISTEL_ROUNDS],
}

impl ShortCodec {
    /// Builds a codec from the deployment secret.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptySecret`] for an empty secret.
    pub fn new(secret: &str) -> Result<Self, CodecError> {
        if secret.is_empty() {
            return Err(CodecError::EmptySecret);
        }

        let mut alphabet = *ALPHABET;
        shuffle(&mut alphabet, secret.as_bytes());

        let mut digits = [-1i8; 128];
        for (value, &symbol) in alphabet.iter().enumerate() {
            digits[symbol as usize] = value as i8;
        }

        let mut round_keys = [[0u8; 32]; FEISTEL_ROUNDS];
        for (round, key) in round_keys.iter_mut().enumerate() {
            let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
                .expect("HMAC accepts keys of any length");
            mac.update(b"short-api/round-key");
            mac.update(&[round as u8]);
            key.copy_from_slice(&mac.finalize().into_bytes());
        }

        Ok(Self {
            alphabet,
            digits,
            round_keys,
        })
    }

    /// Encodes a positive id into a short code of at least
    /// [`MIN_CODE_LENGTH`] characters.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::NonPositiveId`] for ids below 1. Store ids are
    /// assigned by a BIGSERIAL column, so this only fires on caller bugs.
    pub fn encode(&self, id: i64) -> Result<String, CodecError> {
        if id <= 0 {
            return Err(CodecError::NonPositiveId(id));
        }

        let mixed = self.mix(id as u64);

        // Least significant digit first, reversed on output.
        let mut digit_values = [0u8; MAX_CODE_LENGTH];
        let mut remaining = mixed;
        let mut len = 0;
        loop {
            digit_values[len] = (remaining % 62) as u8;
            remaining /= 62;
            len += 1;
            if remaining == 0 {
                break;
            }
        }

        let mut out = Vec::with_capacity(len.max(MIN_CODE_LENGTH));
        for _ in len..MIN_CODE_LENGTH {
            out.push(self.alphabet[0]);
        }
        for &value in digit_values[..len].iter().rev() {
            out.push(self.alphabet[value as usize]);
        }

        Ok(String::from_utf8(out).expect("alphabet is ASCII"))
    }

    /// Decodes a short code back to the id it was encoded from.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] for any input that is not a valid encoding
    /// of a positive id under this codec's secret. Never panics, whatever
    /// the input.
    pub fn decode(&self, code: &str) -> Result<i64, DecodeError> {
        let bytes = code.as_bytes();
        if bytes.is_empty() || bytes.len() > MAX_CODE_LENGTH {
            return Err(DecodeError);
        }

        let mut acc: u128 = 0;
        for &byte in bytes {
            if byte >= 128 {
                return Err(DecodeError);
            }
            let digit = self.digits[byte as usize];
            if digit < 0 {
                return Err(DecodeError);
            }
            acc = acc * 62 + digit as u128;
            if acc > u64::MAX as u128 {
                return Err(DecodeError);
            }
        }

        let id = self.unmix(acc as u64);
        if id == 0 || id > i64::MAX as u64 {
            return Err(DecodeError);
        }
        Ok(id as i64)
    }

    /// Feistel round function: first four bytes of HMAC-SHA256 over the
    /// opposite half, keyed by the per-round key.
    fn round(&self, round: usize, half: u32) -> u32 {
        let mut mac = HmacSha256::new_from_slice(&self.round_keys[round])
            .expect("HMAC accepts keys of any length");
        mac.update(&half.to_be_bytes());
        let tag = mac.finalize().into_bytes();
        u32::from_be_bytes([tag[0], tag[1], tag[2], tag[3]])
    }

    /// Forward permutation over the full u64 space.
    fn mix(&self, value: u64) -> u64 {
        let mut left = (value >> 32) as u32;
        let mut right = value as u32;
        for round in 0..FEISTEL_ROUNDS {
            let next = left ^ self.round(round, right);
            left = right;
            right = next;
        }
        ((left as u64) << 32) | right as u64
    }

    /// Exact inverse of [`Self::mix`]: same rounds, reversed order.
    fn unmix(&self, value: u64) -> u64 {
        let mut left = (value >> 32) as u32;
        let mut right = value as u32;
        for round in (0..FEISTEL_ROUNDS).rev() {
            let previous = right ^ self.round(round, left);
            right = left;
            left = previous;
        }
        ((left as u64) << 32) | right as u64
    }
}

/// Deterministic alphabet shuffle driven by the secret bytes.
///
/// Swap positions depend only on the secret, so every codec built from the
/// same secret sees the same alphabet order.
fn shuffle(alphabet: &mut [u8], secret: &[u8]) {
    let mut salt_index = 0;
    let mut salt_sum = 0;
    for i in (1..alphabet.len()).rev() {
        salt_index %= secret.len();
        let salt_byte = secret[salt_index] as usize;
        salt_sum += salt_byte;
        let j = (salt_byte + salt_index + salt_sum) % i;
        alphabet.swap(i, j);
        salt_index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec(secret: &str) -> ShortCodec {
        ShortCodec::new(secret).unwrap()
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(ShortCodec::new(""), Err(CodecError::EmptySecret)));
    }

    #[test]
    fn test_non_positive_ids_rejected() {
        let c = codec("secret");
        assert!(matches!(c.encode(0), Err(CodecError::NonPositiveId(0))));
        assert!(matches!(c.encode(-7), Err(CodecError::NonPositiveId(-7))));
    }

    #[test]
    fn test_round_trip_across_id_range() {
        let ids = [1, 2, 7, 61, 62, 63, 4096, 123_456_789, i64::MAX - 1, i64::MAX];
        for secret in ["secret", "another-secret", "x", "correct horse battery staple"] {
            let c = codec(secret);
            for id in ids {
                let code = c.encode(id).unwrap();
                assert_eq!(c.decode(&code), Ok(id), "secret={secret} id={id}");
            }
        }
    }

    #[test]
    fn test_encoding_is_deterministic_across_instances() {
        // The workflow may encode and decode from independent service
        // instances; the secret is the only allowed entropy source.
        let a = codec("secret");
        let b = codec("secret");
        for id in [1, 42, 999_999] {
            assert_eq!(a.encode(id).unwrap(), b.encode(id).unwrap());
            assert_eq!(a.encode(id).unwrap(), a.encode(id).unwrap());
        }
    }

    #[test]
    fn test_minimum_length_floor() {
        let c = codec("secret");
        for id in 1..500 {
            assert!(c.encode(id).unwrap().len() >= MIN_CODE_LENGTH);
        }
    }

    #[test]
    fn test_alphabet_closure() {
        let c = codec("secret");
        for id in [1, 1000, 70_000_000_000] {
            let code = c.encode(id).unwrap();
            assert!(
                code.bytes().all(|b| ALPHABET.contains(&b)),
                "code {code} contains symbols outside base62"
            );
        }
    }

    #[test]
    fn test_codes_for_distinct_ids_are_distinct() {
        let c = codec("secret");
        let codes: Vec<String> = (1..=50).map(|id| c.encode(id).unwrap()).collect();
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_decode_with_wrong_secret_misses() {
        let minted = codec("secret-one");
        let other = codec("secret-two");
        for id in [1, 42, 987_654_321] {
            let code = minted.encode(id).unwrap();
            assert_ne!(other.decode(&code), Ok(id));
        }
    }

    #[test]
    fn test_decode_rejects_malformed_input() {
        let c = codec("secret");
        for input in [
            "",
            "has space",
            "under_score",
            "favicon.ico",
            "not-a-real-code",
            "emoji\u{1F600}",
            "nul\0byte",
            "waaaaaaaaaaaaaaaaaaaaaaytoolong",
        ] {
            assert_eq!(c.decode(input), Err(DecodeError), "input {input:?}");
        }
    }

    #[test]
    fn test_decode_rejects_overflowing_values() {
        // Eleven of the highest-valued symbol exceeds u64.
        let c = codec("secret");
        let top = c.alphabet[61] as char;
        let overflowing: String = (0..11).map(|_| top).collect();
        assert_eq!(c.decode(&overflowing), Err(DecodeError));
    }

    #[test]
    fn test_decode_of_arbitrary_valid_alphabet_never_panics() {
        let c = codec("secret");
        // Strings that are alphabet-closed but were never produced by
        // encode must come back as a clean result, never a fault.
        for input in ["0000000", "abcdefg", "ZZZZZZZ", "1", "kg5aV2z"] {
            let _ = c.decode(input);
        }
    }
}
