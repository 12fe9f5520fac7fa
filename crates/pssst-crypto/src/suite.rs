//! Cipher suite identifiers.
//!
//! The suite occupies one byte of the packet header. PSSST v1 defines a
//! single suite; new suites take new identifiers rather than renegotiating
//! parameters of an existing one.

/// Cipher suites understood by this implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CipherSuite {
    /// X25519 key agreement + AES-128-GCM + SHA-256 KDF.
    /// The only suite defined by PSSST v1, mandatory to implement.
    X25519Aes128GcmSha256 = 0x01,
}

impl CipherSuite {
    /// Convert from wire format (one byte). Unknown values yield `None`.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::X25519Aes128GcmSha256),
            _ => None,
        }
    }

    /// Convert to wire format.
    pub fn to_u8(self) -> u8 {
        self as u8
    }
}
