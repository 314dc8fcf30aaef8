//! Location keys.
//!
//! Two entries may share a path; the key tells them apart. Keys are short
//! random strings over `[0-9a-z]`, so with the default length of six there
//! are 36^6 (about 2.2 billion) possible values, plenty for one session.

use rand::Rng;

/// Default number of characters in a generated key.
pub const DEFAULT_KEY_LENGTH: usize = 6;

const KEY_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Produces random location keys of a fixed length.
///
/// # Example
///
/// ```
/// use memory_history::KeyGenerator;
///
/// let keys = KeyGenerator::new(8);
/// let key = keys.generate();
/// assert_eq!(key.len(), 8);
/// assert!(key.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyGenerator {
    length: usize,
}

impl KeyGenerator {
    /// Create a generator for keys of `length` characters.
    pub const fn new(length: usize) -> Self {
        Self { length }
    }

    /// Number of characters in each generated key.
    pub const fn length(&self) -> usize {
        self.length
    }

    /// Generate a fresh key.
    pub fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| char::from(KEY_ALPHABET[rng.gen_range(0..KEY_ALPHABET.len())]))
            .collect()
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_LENGTH)
    }
}
