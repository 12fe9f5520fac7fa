//! X25519 key exchange (RFC 7748).
//!
//! PSSST embeds raw private scalars in the wire protocol (the
//! client-authentication plaintext prefix carries the ephemeral scalar),
//! so scalars are generated and stored already clamped per RFC 7748 §5
//! rather than relying on clamp-on-use. Clamping is idempotent, so the
//! underlying curve library re-clamping during multiplication is
//! harmless.
//!
//! # Security
//!
//! - Private scalars and shared secrets are wrapped in `Zeroizing<>` so
//!   they are cleared from memory when dropped.
//! - An all-zero shared secret (low-order peer point) is rejected; the
//!   check runs in constant time.

use crate::{Error, Result};
use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Size in bytes of X25519 scalars, points, and shared secrets.
pub const KEY_SIZE: usize = 32;

/// The canonical curve25519 basepoint.
pub const BASEPOINT: [u8; 32] = x25519_dalek::X25519_BASEPOINT_BYTES;

/// Generate a fresh private scalar from the given RNG.
///
/// Draws 32 random bytes and applies RFC 7748 §5 clamping: the low three
/// bits of byte 0 cleared, the top bit of byte 31 cleared, bit 6 of byte
/// 31 set. Fails only if the RNG fails.
pub fn generate_private_key(rng: &mut impl CryptoRngCore) -> Result<Zeroizing<[u8; KEY_SIZE]>> {
    let mut scalar = Zeroizing::new([0u8; KEY_SIZE]);
    rng.try_fill_bytes(scalar.as_mut())
        .map_err(|e| Error::Rng(e.to_string()))?;

    scalar[0] &= 248;
    scalar[31] &= 127;
    scalar[31] |= 64;

    Ok(scalar)
}

/// Generate a keypair: a clamped private scalar and its public point.
pub fn generate_keypair(
    rng: &mut impl CryptoRngCore,
) -> Result<(Zeroizing<[u8; KEY_SIZE]>, [u8; KEY_SIZE])> {
    let private = generate_private_key(rng)?;
    let public = public_key(&private)?;
    Ok((private, public))
}

/// Compute the public point for a private scalar (X25519 against the
/// basepoint).
pub fn public_key(private: &[u8; KEY_SIZE]) -> Result<[u8; KEY_SIZE]> {
    let public = diffie_hellman(private, &BASEPOINT)?;
    Ok(*public)
}

/// Perform X25519 between a private scalar and a peer point.
///
/// # Errors
///
/// Returns `Error::KeyExchange` if the result is all zeros, which happens
/// when the peer point is of low order.
pub fn diffie_hellman(
    private: &[u8; KEY_SIZE],
    public: &[u8; KEY_SIZE],
) -> Result<Zeroizing<[u8; KEY_SIZE]>> {
    let shared = Zeroizing::new(x25519_dalek::x25519(*private, *public));

    if bool::from(shared[..].ct_eq(&[0u8; KEY_SIZE])) {
        return Err(Error::KeyExchange(
            "Invalid peer public key (low-order point)".into(),
        ));
    }

    Ok(shared)
}

/// Length-validated conversion of a byte slice into key material.
pub fn key_from_slice(bytes: &[u8]) -> Result<[u8; KEY_SIZE]> {
    bytes.try_into().map_err(|_| Error::InvalidLength {
        expected: KEY_SIZE,
        actual: bytes.len(),
    })
}
