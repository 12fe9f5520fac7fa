//! Server context: unpacks incoming requests and answers them.

use crate::packet::{self, Header};
use crate::reply::{ReplyContext, ReplyEncoder};
use crate::{Error, Result};
use pssst_crypto::{aead, kdf, kex};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Server-side protocol context.
///
/// Holds the server's long-term private key; read-only after
/// construction, so one context serves all incoming packets from any
/// number of threads. No per-packet state outlives the returned
/// [`Unpacked`].
pub struct Server {
    private_key: Zeroizing<[u8; kex::KEY_SIZE]>,
    public_key: [u8; kex::KEY_SIZE],
}

/// Result of unpacking one request packet.
pub struct Unpacked {
    /// The decrypted application payload.
    pub payload: Vec<u8>,
    /// The client's public key, when the request authenticated one.
    pub client_public: Option<[u8; kex::KEY_SIZE]>,
    /// One-shot encoder for the reply to this request.
    pub reply: ReplyEncoder,
}

impl Server {
    /// Create a server context from a 32-byte private key.
    ///
    /// The public key is derived here, so [`public_key`](Self::public_key)
    /// cannot fail later.
    ///
    /// # Errors
    ///
    /// Fails if the key is not 32 bytes, or on DH failure.
    pub fn new(private_key: &[u8]) -> Result<Self> {
        let private_key = Zeroizing::new(kex::key_from_slice(private_key)?);
        let public_key = kex::public_key(&private_key)?;

        Ok(Self {
            private_key,
            public_key,
        })
    }

    /// The server's long-term public key, as distributed to clients.
    pub fn public_key(&self) -> &[u8; kex::KEY_SIZE] {
        &self.public_key
    }

    /// Unpack an incoming request packet.
    ///
    /// Validates length and header, recovers the session keys from the
    /// on-wire `dh_param`, opens the ciphertext, and verifies client
    /// authentication when the request carries it: the embedded
    /// `(client_pub, ephemeral)` pair must reconstruct the on-wire
    /// `dh_param`, proving the sender owns the client private key.
    pub fn unpack(&self, packet_bytes: &[u8]) -> Result<Unpacked> {
        packet::check_min_length(packet_bytes)?;
        let header = Header::decode(packet_bytes)?;

        if header.is_reply() {
            return Err(Error::WrongDirection("packet is a reply"));
        }

        let dh_param = packet::dh_param(packet_bytes);
        let shared_secret = kex::diffie_hellman(&self.private_key, &dh_param)?;
        let keys = kdf::derive_session_keys(&dh_param, &shared_secret);

        let opened = aead::aes128gcm_open(
            &keys.key,
            &keys.client_nonce,
            &packet_bytes[packet::BODY_OFFSET..],
            &packet_bytes[..packet::HEADER_SIZE],
        )
        .map_err(|_| Error::DecryptFailed)?;

        let (payload, client_public) = if header.has_client_auth() {
            if opened.len() < packet::AUTH_PREFIX_SIZE {
                return Err(Error::Malformed("client auth prefix truncated".into()));
            }

            let mut claimed = [0u8; kex::KEY_SIZE];
            claimed.copy_from_slice(&opened[..kex::KEY_SIZE]);
            let mut ephemeral = Zeroizing::new([0u8; kex::KEY_SIZE]);
            ephemeral.copy_from_slice(&opened[kex::KEY_SIZE..packet::AUTH_PREFIX_SIZE]);

            let check = kex::diffie_hellman(&ephemeral, &claimed)?;
            if !bool::from(check[..].ct_eq(&dh_param[..])) {
                return Err(Error::ClientAuthFailed);
            }

            (opened[packet::AUTH_PREFIX_SIZE..].to_vec(), Some(claimed))
        } else {
            (opened.to_vec(), None)
        };

        let reply = ReplyEncoder::new(ReplyContext {
            suite: header.suite,
            client_auth: header.has_client_auth(),
            dh_param,
            keys,
        });

        Ok(Unpacked {
            payload,
            client_public,
            reply,
        })
    }
}
