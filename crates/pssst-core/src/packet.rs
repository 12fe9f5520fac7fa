//! Packet header codec and wire layout constants.
//!
//! Every PSSST packet is `header(4) || dh_param(32) || ciphertext_tag`.
//! The header is the only structured region:
//!
//! ```text
//! Header (4 bytes, big-endian)
//! ┌──────────────────────────────────────────────────┐
//! │ flags: u16        bit 0 REPLY, bit 1 CLIENT_AUTH │
//! │ cipher_suite: u8  0x01 = X25519-AES128GCM-SHA256 │
//! │ reserved: u8      zero on send, ignored on read  │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! The body is positionally sliced; no length prefixes appear because
//! the outer datagram transport carries the length.

use crate::{Error, Result};
use pssst_crypto::{aead, kex, CipherSuite};

/// Flag bit marking a packet as a reply.
pub const FLAG_REPLY: u16 = 0x0001;

/// Flag bit marking a client-authenticated exchange.
pub const FLAG_CLIENT_AUTH: u16 = 0x0002;

/// All defined flag bits; the rest are reserved and must be zero.
const FLAG_MASK: u16 = FLAG_REPLY | FLAG_CLIENT_AUTH;

/// Size in bytes of the packet header.
pub const HEADER_SIZE: usize = 4;

/// Size in bytes of the on-wire DH parameter.
pub const DH_PARAM_SIZE: usize = kex::KEY_SIZE;

/// Offset of the ciphertext region.
pub const BODY_OFFSET: usize = HEADER_SIZE + DH_PARAM_SIZE;

/// Smallest well-formed packet: empty payload, tag only.
pub const MIN_PACKET_SIZE: usize = BODY_OFFSET + aead::TAG_SIZE;

/// Size in bytes of the `client_pub || ephemeral_priv` plaintext prefix
/// carried by client-authenticated requests.
pub const AUTH_PREFIX_SIZE: usize = 2 * kex::KEY_SIZE;

/// Decoded packet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Flag bits (REPLY, CLIENT_AUTH).
    pub flags: u16,
    /// Cipher suite governing the packet body.
    pub suite: CipherSuite,
}

impl Header {
    /// Header for an outgoing request (no flags set).
    pub fn request(suite: CipherSuite) -> Self {
        Self { flags: 0, suite }
    }

    /// Whether the REPLY bit is set.
    pub fn is_reply(&self) -> bool {
        self.flags & FLAG_REPLY != 0
    }

    /// Whether the CLIENT_AUTH bit is set.
    pub fn has_client_auth(&self) -> bool {
        self.flags & FLAG_CLIENT_AUTH != 0
    }

    /// Encode to wire format. The reserved byte is always zero on send.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let flags = self.flags.to_be_bytes();
        [flags[0], flags[1], self.suite.to_u8(), 0]
    }

    /// Decode from the front of a packet.
    ///
    /// Rejects short input and non-zero reserved flag bits as
    /// malformed, and unknown suite bytes as unsupported. The reserved
    /// trailing byte is ignored on receive.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::Malformed(format!(
                "header needs {} bytes, got {}",
                HEADER_SIZE,
                data.len()
            )));
        }

        let flags = u16::from_be_bytes([data[0], data[1]]);
        if flags & !FLAG_MASK != 0 {
            return Err(Error::Malformed(format!(
                "reserved flag bits set: 0x{flags:04X}"
            )));
        }

        let suite = CipherSuite::from_u8(data[2]).ok_or(Error::UnsupportedSuite(data[2]))?;

        Ok(Self { flags, suite })
    }
}

/// Reject packets too short to hold a header, DH parameter, and tag.
pub fn check_min_length(packet: &[u8]) -> Result<()> {
    if packet.len() < MIN_PACKET_SIZE {
        return Err(Error::Malformed(format!(
            "packet needs at least {} bytes, got {}",
            MIN_PACKET_SIZE,
            packet.len()
        )));
    }
    Ok(())
}

/// Slice the on-wire DH parameter out of a length-checked packet.
pub fn dh_param(packet: &[u8]) -> [u8; DH_PARAM_SIZE] {
    let mut param = [0u8; DH_PARAM_SIZE];
    param.copy_from_slice(&packet[HEADER_SIZE..BODY_OFFSET]);
    param
}
