//! AEAD (Authenticated Encryption with Associated Data).
//!
//! AES-128-GCM per NIST SP 800-38D, the AEAD of cipher suite 0x01.
//! Ciphertexts carry an appended 16-byte tag. In PSSST the associated
//! data is always the 4-byte packet header of the packet being built.

use crate::{Error, Result};
use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes128Gcm, Nonce};
use zeroize::Zeroizing;

/// Size in bytes of the AES-128-GCM key.
pub const KEY_SIZE: usize = 16;

/// Size in bytes of the GCM nonce.
pub const NONCE_SIZE: usize = 12;

/// Size in bytes of the authentication tag appended to ciphertexts.
pub const TAG_SIZE: usize = 16;

/// Encrypt with AES-128-GCM.
///
/// # Arguments
/// * `key` - 16-byte encryption key
/// * `nonce` - 12-byte nonce (must be unique per key)
/// * `plaintext` - Data to encrypt
/// * `aad` - Additional authenticated data (not encrypted, but authenticated)
///
/// # Returns
/// Ciphertext with appended 16-byte authentication tag.
pub fn aes128gcm_seal(
    key: &[u8; KEY_SIZE],
    nonce: &[u8; NONCE_SIZE],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>> {
    let cipher = Aes128Gcm::new_from_slice(key)
        .map_err(|_| Error::Encryption("Invalid AES-128-GCM key length".into()))?;

    let payload = Payload {
        msg: plaintext,
        aad,
    };

    cipher
        .encrypt(Nonce::from_slice(nonce), payload)
        .map_err(|_| Error::Encryption("AES-128-GCM encryption failed".into()))
}

/// Decrypt with AES-128-GCM.
///
/// The nonce and AAD must match those used to seal. Returns the
/// plaintext wrapped in `Zeroizing`; in PSSST the opened request
/// plaintext can contain a private scalar, so the buffer is wiped when
/// the caller is done with it.
///
/// # Errors
/// Returns `Error::Decryption` if tag verification fails.
pub fn aes128gcm_open(
    key: &[u8; KEY_SIZE],
    nonce: &[u8; NONCE_SIZE],
    ciphertext_and_tag: &[u8],
    aad: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    let cipher = Aes128Gcm::new_from_slice(key)
        .map_err(|_| Error::Decryption("Invalid AES-128-GCM key length".into()))?;

    let payload = Payload {
        msg: ciphertext_and_tag,
        aad,
    };

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), payload)
        .map_err(|_| Error::Decryption("AES-128-GCM authentication failed".into()))?;

    Ok(Zeroizing::new(plaintext))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Known-answer vector with a PSSST-style 4-byte header as AAD.
    #[test]
    fn test_seal_known_answer() {
        let key: [u8; 16] = hex::decode("000102030405060708090a0b0c0d0e0f")
            .unwrap()
            .try_into()
            .unwrap();
        let nonce: [u8; 12] = hex::decode("000102030405060708090a0b")
            .unwrap()
            .try_into()
            .unwrap();

        let ciphertext =
            aes128gcm_seal(&key, &nonce, b"stateless session", &[0x00, 0x00, 0x01, 0x00]).unwrap();

        assert_eq!(
            ciphertext,
            hex::decode("e018c6ba0377922738f212ef45d01967ddc680911aa2ed63b491bcd9a46f44a199")
                .unwrap()
        );
    }

    #[test]
    fn test_roundtrip() {
        let key = [0x42u8; 16];
        let nonce = [0x01u8; 12];
        let plaintext = b"The quick brown fox jumps over the lazy dog";
        let aad = b"hdr!";

        let ciphertext = aes128gcm_seal(&key, &nonce, plaintext, aad).unwrap();
        assert_eq!(ciphertext.len(), plaintext.len() + TAG_SIZE);

        let decrypted = aes128gcm_open(&key, &nonce, &ciphertext, aad).unwrap();
        assert_eq!(&*decrypted, plaintext);
    }

    #[test]
    fn test_wrong_key_fails() {
        let nonce = [0x01u8; 12];
        let ciphertext = aes128gcm_seal(&[0x42u8; 16], &nonce, b"secret", b"").unwrap();
        assert!(aes128gcm_open(&[0x43u8; 16], &nonce, &ciphertext, b"").is_err());
    }

    #[test]
    fn test_wrong_nonce_fails() {
        let key = [0x42u8; 16];
        let ciphertext = aes128gcm_seal(&key, &[0x01u8; 12], b"secret", b"").unwrap();
        assert!(aes128gcm_open(&key, &[0x02u8; 12], &ciphertext, b"").is_err());
    }

    #[test]
    fn test_wrong_aad_fails() {
        let key = [0x42u8; 16];
        let nonce = [0x01u8; 12];
        let ciphertext = aes128gcm_seal(&key, &nonce, b"secret", &[0, 0, 1, 0]).unwrap();
        assert!(aes128gcm_open(&key, &nonce, &ciphertext, &[0, 1, 1, 0]).is_err());
    }

    #[test]
    fn test_corrupted_ciphertext_fails() {
        let key = [0x42u8; 16];
        let nonce = [0x01u8; 12];
        let mut ciphertext = aes128gcm_seal(&key, &nonce, b"secret", b"").unwrap();

        ciphertext[3] ^= 0xFF;

        let result = aes128gcm_open(&key, &nonce, &ciphertext, b"");
        assert!(matches!(result, Err(Error::Decryption(_))));
    }

    /// An empty plaintext still produces (and verifies) a full tag.
    #[test]
    fn test_empty_plaintext() {
        let key = [0x42u8; 16];
        let nonce = [0x01u8; 12];

        let ciphertext = aes128gcm_seal(&key, &nonce, b"", b"meta").unwrap();
        assert_eq!(ciphertext.len(), TAG_SIZE);

        let decrypted = aes128gcm_open(&key, &nonce, &ciphertext, b"meta").unwrap();
        assert!(decrypted.is_empty());
    }
}
