//! Protocol engine for PSSST (Packet Security for Stateless Session
//! Transport).
//!
//! PSSST gives datagram applications confidentiality, server
//! authentication, optional client authentication, and request/reply
//! binding in a single round trip, with no handshake and no
//! server-side session state. This crate implements the protocol state
//! machine over raw byte buffers:
//! - Packet header codec and wire layout ([`packet`])
//! - Client packing and server unpacking ([`client`], [`server`])
//! - One-shot reply handlers bound to their request ([`reply`])
//!
//! Datagram I/O, key storage, and retry policy are the caller's; the
//! core consumes bytes and a source of randomness and emits bytes.
//! Cryptographic primitives live in `pssst-crypto`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod packet;
pub mod reply;
pub mod server;

pub use client::Client;
pub use error::{Error, Result};
pub use reply::{ReplyDecoder, ReplyEncoder};
pub use server::{Server, Unpacked};
