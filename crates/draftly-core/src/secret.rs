//! Share secret generation
//!
//! Secrets travel inside URLs and get copy-pasted by hand, so the
//! character set is plain alphanumeric with nothing that needs escaping.

use rand::Rng;

/// Characters used in generated secrets
const SECRET_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default length of generated secrets
pub const DEFAULT_SECRET_LENGTH: usize = 6;

/// Generate a new random secret of the given length
pub fn generate(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..SECRET_CHARSET.len());
            SECRET_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_length() {
        assert_eq!(generate(DEFAULT_SECRET_LENGTH).len(), 6);
        assert_eq!(generate(12).len(), 12);
        assert_eq!(generate(0).len(), 0);
    }

    #[test]
    fn test_generate_charset() {
        let secret = generate(256);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_is_random() {
        // 62^24 possibilities; a collision here means the generator is broken
        assert_ne!(generate(24), generate(24));
    }
}
