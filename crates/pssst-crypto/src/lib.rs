//! Cryptographic primitives for the PSSST packet protocol.
//!
//! This crate implements the primitives behind cipher suite 0x01
//! (X25519-AES128GCM-SHA256), the only suite defined by PSSST v1:
//! - Key exchange (X25519 per RFC 7748, with clamped scalar generation)
//! - AEAD encryption (AES-128-GCM with 16-byte tags)
//! - Session key derivation (single SHA-256 hash-and-split with
//!   request/reply nonce domain separation)
//!
//! Security conventions:
//! - No unsafe code
//! - All secrets use Zeroizing wrappers
//! - Constant-time comparisons via subtle crate
//! - No logging of key material

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aead;
pub mod error;
pub mod kdf;
pub mod kex;
pub mod suite;

pub use error::{Error, Result};
pub use kdf::SessionKeys;
pub use suite::CipherSuite;
