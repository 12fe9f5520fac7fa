//! One-shot reply handlers.
//!
//! Packing a request yields a [`ReplyDecoder`]; unpacking one yields a
//! [`ReplyEncoder`]. Each owns the per-packet key schedule behind an
//! `Option` and takes it on use, so a handler is a linear resource:
//! usable at most once, its sensitive bytes wiped on drop. The reply
//! is tied to its request by carrying the same on-wire `dh_param`.

use crate::packet::{self, Header, FLAG_CLIENT_AUTH, FLAG_REPLY};
use crate::{Error, Result};
use pssst_crypto::{aead, CipherSuite, SessionKeys};
use subtle::ConstantTimeEq;

/// Key schedule and binding state for one reply, either direction.
pub(crate) struct ReplyContext {
    pub(crate) suite: CipherSuite,
    pub(crate) client_auth: bool,
    pub(crate) dh_param: [u8; packet::DH_PARAM_SIZE],
    pub(crate) keys: SessionKeys,
}

/// Encodes the single reply to an unpacked request.
///
/// Produced by [`Server::unpack`](crate::Server::unpack).
pub struct ReplyEncoder {
    ctx: Option<ReplyContext>,
}

impl ReplyEncoder {
    pub(crate) fn new(ctx: ReplyContext) -> Self {
        Self { ctx: Some(ctx) }
    }

    /// Build the reply packet for the given payload.
    ///
    /// The reply header sets REPLY, copies CLIENT_AUTH from the
    /// request, and keeps the request's suite; the packet carries the
    /// request's `dh_param` so the client can bind it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HandlerAlreadyUsed`] on the second and every
    /// later call.
    pub fn encode(&mut self, payload: &[u8]) -> Result<Vec<u8>> {
        let ctx = self.ctx.take().ok_or(Error::HandlerAlreadyUsed)?;

        let mut flags = FLAG_REPLY;
        if ctx.client_auth {
            flags |= FLAG_CLIENT_AUTH;
        }
        let header = Header {
            flags,
            suite: ctx.suite,
        }
        .encode();

        let ciphertext =
            aead::aes128gcm_seal(&ctx.keys.key, &ctx.keys.server_nonce, payload, &header)?;

        let mut reply = Vec::with_capacity(packet::BODY_OFFSET + ciphertext.len());
        reply.extend_from_slice(&header);
        reply.extend_from_slice(&ctx.dh_param);
        reply.extend_from_slice(&ciphertext);
        Ok(reply)
    }
}

/// Decodes the single reply to a packed request.
///
/// Produced by [`Client::pack`](crate::Client::pack).
pub struct ReplyDecoder {
    ctx: Option<ReplyContext>,
}

impl ReplyDecoder {
    pub(crate) fn new(ctx: ReplyContext) -> Self {
        Self { ctx: Some(ctx) }
    }

    /// Authenticate and decrypt a reply packet.
    ///
    /// Validation order: handler unused, minimum length, header parse,
    /// REPLY bit, CLIENT_AUTH bit equal to the request's, `dh_param`
    /// binding, then AEAD open. Failures before the AEAD leave the
    /// handler usable, so a mis-delivered packet cannot burn the
    /// decoder; reaching the AEAD consumes it whether or not the tag
    /// verifies.
    pub fn decode(&mut self, reply: &[u8]) -> Result<Vec<u8>> {
        let ctx = self.ctx.as_ref().ok_or(Error::HandlerAlreadyUsed)?;

        packet::check_min_length(reply)?;
        let header = Header::decode(reply)?;

        if !header.is_reply() {
            return Err(Error::WrongDirection("packet is not a reply"));
        }
        if header.has_client_auth() != ctx.client_auth {
            return Err(Error::AuthFlagMismatch);
        }
        let bound = reply[packet::HEADER_SIZE..packet::BODY_OFFSET].ct_eq(&ctx.dh_param[..]);
        if !bool::from(bound) {
            return Err(Error::BindingMismatch);
        }

        let ctx = self.ctx.take().ok_or(Error::HandlerAlreadyUsed)?;
        let plaintext = aead::aes128gcm_open(
            &ctx.keys.key,
            &ctx.keys.server_nonce,
            &reply[packet::BODY_OFFSET..],
            &reply[..packet::HEADER_SIZE],
        )
        .map_err(|_| Error::DecryptFailed)?;

        Ok(plaintext.to_vec())
    }
}
