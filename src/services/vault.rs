// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Passphrase-protected access token.
//!
//! The deployed configuration carries the records access token encrypted
//! with a shared club passphrase, in the OpenSSL `enc` / CryptoJS format:
//! base64 of `"Salted__" || salt[8] || AES-256-CBC(PKCS#7)`, with key and IV
//! derived from passphrase and salt by MD5 `EVP_BytesToKey`.
//! The passphrase never leaves the process; only the recovered token does.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use md5::{Digest, Md5};
use ring::rand::{SecureRandom, SystemRandom};

use crate::error::AppError;

type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;
type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;

const SALT_MAGIC: &[u8] = b"Salted__";
const SALT_LEN: usize = 8;
const KEY_LEN: usize = 32;
const IV_LEN: usize = 16;
const BLOCK_LEN: usize = 16;

/// Accepted passphrase length range (characters).
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 32;

/// Holds the encrypted token and recovers it for a passphrase.
#[derive(Clone)]
pub struct TokenVault {
    encrypted_token: String,
    token_length: usize,
}

impl TokenVault {
    pub fn new(encrypted_token: impl Into<String>, token_length: usize) -> Self {
        Self {
            encrypted_token: encrypted_token.into(),
            token_length,
        }
    }

    /// Recover the access token.
    ///
    /// Every failure (length, padding, UTF-8, token size) surfaces as
    /// `InvalidPassword`; the underlying cause is only logged.
    pub fn unlock(&self, password: &str) -> Result<String, AppError> {
        validate_password(password)?;

        let token = decrypt_token(&self.encrypted_token, password).map_err(|e| {
            tracing::debug!(error = %e, "Token decryption failed");
            AppError::InvalidPassword
        })?;

        let length = token.chars().count();
        if length != self.token_length {
            tracing::debug!(
                expected = self.token_length,
                actual = length,
                "Decrypted token has unexpected length"
            );
            return Err(AppError::InvalidPassword);
        }

        Ok(token)
    }
}

/// Check the passphrase length bounds.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    let length = password.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&length) {
        return Err(AppError::InvalidPassword);
    }
    Ok(())
}

/// Decrypt an OpenSSL-format ciphertext with a passphrase.
pub fn decrypt_token(encrypted_b64: &str, passphrase: &str) -> Result<String, VaultError> {
    let data = BASE64
        .decode(encrypted_b64.trim())
        .map_err(|e| VaultError::Encoding(e.to_string()))?;

    if data.len() < SALT_MAGIC.len() + SALT_LEN || !data.starts_with(SALT_MAGIC) {
        return Err(VaultError::MissingSalt);
    }
    let (salt, ciphertext) = data[SALT_MAGIC.len()..].split_at(SALT_LEN);
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(VaultError::Decrypt);
    }

    let (key, iv) = derive_key_iv(passphrase.as_bytes(), salt);
    let mut buf = ciphertext.to_vec();
    let plaintext = Aes256CbcDec::new(&key.into(), &iv.into())
        .decrypt_padded_mut::<Pkcs7>(&mut buf)
        .map_err(|_| VaultError::Decrypt)?;

    String::from_utf8(plaintext.to_vec()).map_err(|_| VaultError::Utf8)
}

/// Encrypt a token with a passphrase and a fresh random salt.
pub fn encrypt_token(token: &str, passphrase: &str) -> Result<String, VaultError> {
    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| VaultError::Random)?;
    encrypt_token_with_salt(token, passphrase, salt)
}

fn encrypt_token_with_salt(
    token: &str,
    passphrase: &str,
    salt: [u8; SALT_LEN],
) -> Result<String, VaultError> {
    let (key, iv) = derive_key_iv(passphrase.as_bytes(), &salt);

    let msg_len = token.len();
    let mut buf = vec![0u8; msg_len + BLOCK_LEN];
    buf[..msg_len].copy_from_slice(token.as_bytes());
    let ciphertext = Aes256CbcEnc::new(&key.into(), &iv.into())
        .encrypt_padded_mut::<Pkcs7>(&mut buf, msg_len)
        .map_err(|_| VaultError::Encrypt)?;

    let mut out = Vec::with_capacity(SALT_MAGIC.len() + SALT_LEN + ciphertext.len());
    out.extend_from_slice(SALT_MAGIC);
    out.extend_from_slice(&salt);
    out.extend_from_slice(ciphertext);
    Ok(BASE64.encode(out))
}

/// OpenSSL `EVP_BytesToKey` with MD5 and a single iteration.
fn derive_key_iv(passphrase: &[u8], salt: &[u8]) -> ([u8; KEY_LEN], [u8; IV_LEN]) {
    let mut derived = Vec::with_capacity(KEY_LEN + IV_LEN + 16);
    let mut previous: Vec<u8> = Vec::new();

    while derived.len() < KEY_LEN + IV_LEN {
        let mut hasher = Md5::new();
        hasher.update(&previous);
        hasher.update(passphrase);
        hasher.update(salt);
        previous = hasher.finalize().to_vec();
        derived.extend_from_slice(&previous);
    }

    let mut key = [0u8; KEY_LEN];
    let mut iv = [0u8; IV_LEN];
    key.copy_from_slice(&derived[..KEY_LEN]);
    iv.copy_from_slice(&derived[KEY_LEN..KEY_LEN + IV_LEN]);
    (key, iv)
}

/// Low-level token cipher errors.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("Ciphertext is not valid base64: {0}")]
    Encoding(String),

    #[error("Ciphertext lacks the Salted__ header")]
    MissingSalt,

    #[error("Decryption failed (wrong passphrase or corrupt data)")]
    Decrypt,

    #[error("Decrypted token is not valid UTF-8")]
    Utf8,

    #[error("Encryption failed")]
    Encrypt,

    #[error("Random number generator failure")]
    Random,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALT: [u8; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

    // echo -n "sv=2024-01-01&sig=abc" |
    //   openssl enc -aes-256-cbc -md md5 -pass pass:club-passphrase -S 0001020304050607
    const OPENSSL_CIPHERTEXT: &str = "U2FsdGVkX18AAQIDBAUGB8D/JBc70lKIA2MK+DwMC2rwnF9+M7RnUBoMfzCrexOd";

    #[test]
    fn test_key_derivation_matches_openssl() {
        // openssl enc -aes-256-cbc -md md5 -P -pass pass:password -S 0001020304050607
        let (key, iv) = derive_key_iv(b"password", &SALT);
        assert_eq!(
            key,
            [
                0xB0, 0x30, 0x96, 0x34, 0x5E, 0x80, 0x5D, 0x3A, 0xA4, 0x39, 0x2D, 0x2E, 0x72, 0x79,
                0x1D, 0xFB, 0x13, 0xE1, 0x2D, 0x3F, 0x61, 0x09, 0x4A, 0x3F, 0xC3, 0x47, 0xAC, 0xE8,
                0x6B, 0x99, 0xAD, 0xA6,
            ]
        );
        assert_eq!(
            iv,
            [
                0xAC, 0xDE, 0x38, 0xB4, 0x60, 0x73, 0xEE, 0xF8, 0x18, 0x40, 0x28, 0x3E, 0x44, 0xA4,
                0xB2, 0x2A,
            ]
        );
    }

    #[test]
    fn test_decrypt_openssl_ciphertext() {
        let token = decrypt_token(OPENSSL_CIPHERTEXT, "club-passphrase").unwrap();
        assert_eq!(token, "sv=2024-01-01&sig=abc");
    }

    #[test]
    fn test_encrypt_with_fixed_salt_matches_openssl() {
        let encrypted =
            encrypt_token_with_salt("sv=2024-01-01&sig=abc", "club-passphrase", SALT).unwrap();
        assert_eq!(encrypted, OPENSSL_CIPHERTEXT);
    }

    #[test]
    fn test_decrypt_with_wrong_passphrase_fails() {
        assert!(decrypt_token(OPENSSL_CIPHERTEXT, "not-the-passphrase")
            .map(|t| t != "sv=2024-01-01&sig=abc")
            .unwrap_or(true));
    }

    #[test]
    fn test_decrypt_recovers_token() {
        let encrypted = encrypt_token("sv=2024&sig=abc", "club-passphrase").unwrap();
        let token = decrypt_token(&encrypted, "club-passphrase").unwrap();
        assert_eq!(token, "sv=2024&sig=abc");
    }

    #[test]
    fn test_decrypt_rejects_missing_header() {
        let err = decrypt_token(&BASE64.encode(b"not salted at all!"), "pw").unwrap_err();
        assert!(matches!(err, VaultError::MissingSalt));

        let err = decrypt_token("%%%", "pw").unwrap_err();
        assert!(matches!(err, VaultError::Encoding(_)));
    }

    #[test]
    fn test_password_bounds() {
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password(&"x".repeat(32)).is_ok());
        assert!(validate_password(&"x".repeat(33)).is_err());
    }
}
