//! Error types for protocol operations.

use thiserror::Error;

/// Result type alias for protocol operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Protocol operation errors.
///
/// Every failure is returned to the caller; nothing is retried inside
/// the core, and no partial packet or plaintext is released on error.
#[derive(Debug, Error)]
pub enum Error {
    /// Packet too short, header unparseable, or reserved bits non-zero.
    #[error("Malformed packet: {0}")]
    Malformed(String),

    /// A request arrived where a reply was expected, or vice versa.
    #[error("Wrong packet direction: {0}")]
    WrongDirection(&'static str),

    /// The cipher suite byte is not recognized.
    #[error("Unsupported cipher suite: 0x{0:02X}")]
    UnsupportedSuite(u8),

    /// Reply client-auth flag differs from the request's.
    #[error("Reply client auth mismatch")]
    AuthFlagMismatch,

    /// Reply dh_param does not match the request it claims to answer.
    #[error("Request/reply mismatch")]
    BindingMismatch,

    /// AEAD tag verification failed.
    #[error("Decryption failed")]
    DecryptFailed,

    /// Embedded (ephemeral, client_pub) does not reconstruct dh_param.
    #[error("Client authentication failed")]
    ClientAuthFailed,

    /// A one-shot reply handler was invoked a second time.
    #[error("Reply handler already used")]
    HandlerAlreadyUsed,

    /// Underlying DH/AEAD/RNG primitive failure.
    #[error("Crypto error: {0}")]
    Crypto(#[from] pssst_crypto::Error),
}
