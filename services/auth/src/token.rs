//! Opaque session token generation

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use rand::rngs::OsRng;

/// Random bytes behind each token (256 bits).
const TOKEN_BYTES: usize = 32;

/// Generate an unguessable session token: 32 bytes from the OS RNG,
/// URL-safe base64 without padding.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successive_tokens_are_never_equal() {
        assert_ne!(generate_token(), generate_token());
    }

    #[test]
    fn tokens_decode_to_at_least_256_bits() {
        let token = generate_token();
        let decoded = URL_SAFE_NO_PAD
            .decode(token.as_bytes())
            .expect("token is valid URL-safe base64");
        assert!(decoded.len() >= 32);
    }

    #[test]
    fn tokens_are_cookie_safe() {
        let token = generate_token();
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }
}
