//! Access key generation and normalization
//!
//! Access keys are 8 characters drawn from `[A-Z0-9]`. They are the public
//! address of a form and must be unique among live forms.

use rand_core::RngCore;

pub const ACCESS_KEY_LEN: usize = 8;

const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Largest multiple of the alphabet size that fits in a byte. Bytes at or
/// above it are discarded so every character is equally likely.
const REJECTION_LIMIT: u8 = (256 / ALPHABET.len() * ALPHABET.len()) as u8;

/// Draw one random access key
pub fn generate<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut key = String::with_capacity(ACCESS_KEY_LEN);
    let mut buf = [0u8; 16];

    while key.len() < ACCESS_KEY_LEN {
        rng.fill_bytes(&mut buf);
        for &byte in buf.iter() {
            if byte >= REJECTION_LIMIT {
                continue;
            }
            key.push(ALPHABET[(byte as usize) % ALPHABET.len()] as char);
            if key.len() == ACCESS_KEY_LEN {
                break;
            }
        }
    }

    key
}

/// Draw keys until `is_taken` rejects none of them
pub fn generate_unique<R, F>(rng: &mut R, is_taken: F) -> String
where
    R: RngCore + ?Sized,
    F: Fn(&str) -> bool,
{
    loop {
        let key = generate(rng);
        if !is_taken(&key) {
            return key;
        }
        tracing::debug!("Access key collision on {}, resampling", key);
    }
}

/// Lookups are case-insensitive; keys are stored uppercase
pub fn normalize(key: &str) -> String {
    key.trim().to_ascii_uppercase()
}

pub fn is_well_formed(key: &str) -> bool {
    key.len() == ACCESS_KEY_LEN
        && key
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}
