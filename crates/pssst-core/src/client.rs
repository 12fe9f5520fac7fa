//! Client context: packs request packets addressed to a known server.

use crate::packet::{self, Header, FLAG_CLIENT_AUTH};
use crate::reply::{ReplyContext, ReplyDecoder};
use crate::Result;
use pssst_crypto::{aead, kdf, kex, CipherSuite};
use rand::rngs::OsRng;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

/// Client long-term identity, with the values derived from it.
///
/// `server_shared` is the fixed product `client_priv · server_pub`; the
/// raw private scalar is not needed once both are derived.
struct Identity {
    public: [u8; kex::KEY_SIZE],
    server_shared: Zeroizing<[u8; kex::KEY_SIZE]>,
}

/// Client-side protocol context.
///
/// Holds the server's long-term public key and, optionally, a client
/// identity. All derived values are computed at construction, so one
/// context can serve any number of concurrent [`pack`](Self::pack)
/// calls without synchronization.
pub struct Client {
    server_public: [u8; kex::KEY_SIZE],
    identity: Option<Identity>,
}

impl Client {
    /// Create an anonymous client for the given server public key.
    ///
    /// # Errors
    ///
    /// Fails if the key is not 32 bytes.
    pub fn new(server_public: &[u8]) -> Result<Self> {
        Ok(Self {
            server_public: kex::key_from_slice(server_public)?,
            identity: None,
        })
    }

    /// Create a client that authenticates with a long-term private key.
    ///
    /// The client public key and the fixed `client_priv · server_pub`
    /// product are derived here, once.
    ///
    /// # Errors
    ///
    /// Fails if either key is not 32 bytes, or on DH failure.
    pub fn with_identity(server_public: &[u8], client_private: &[u8]) -> Result<Self> {
        let server_public = kex::key_from_slice(server_public)?;
        let private = Zeroizing::new(kex::key_from_slice(client_private)?);

        let public = kex::public_key(&private)?;
        let server_shared = kex::diffie_hellman(&private, &server_public)?;

        Ok(Self {
            server_public,
            identity: Some(Identity {
                public,
                server_shared,
            }),
        })
    }

    /// Whether packed requests carry client authentication.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Pack a payload into a request packet using the OS CSPRNG.
    ///
    /// Returns the packet and the one-shot decoder for its reply.
    pub fn pack(&self, payload: &[u8]) -> Result<(Vec<u8>, ReplyDecoder)> {
        self.pack_with_rng(&mut OsRng, payload)
    }

    /// Pack a payload drawing ephemeral key material from `rng`.
    ///
    /// The anonymous arrangement sends `dh_param = e·B` and encrypts
    /// under `e·server_pub`. With an identity, `dh_param = e·client_pub`
    /// and the key comes from `e·(client_priv·server_pub)`; the
    /// plaintext gains a `client_pub || e` prefix from which the server
    /// reconstructs `dh_param` to verify possession of the client key.
    pub fn pack_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        payload: &[u8],
    ) -> Result<(Vec<u8>, ReplyDecoder)> {
        let ephemeral = kex::generate_private_key(rng)?;

        let mut header = Header::request(CipherSuite::X25519Aes128GcmSha256);
        let dh_param;
        let shared_secret;
        let extended;

        match &self.identity {
            Some(identity) => {
                header.flags |= FLAG_CLIENT_AUTH;
                dh_param = *kex::diffie_hellman(&ephemeral, &identity.public)?;
                shared_secret = kex::diffie_hellman(&ephemeral, &identity.server_shared)?;

                let mut buf = Zeroizing::new(Vec::with_capacity(
                    packet::AUTH_PREFIX_SIZE + payload.len(),
                ));
                buf.extend_from_slice(&identity.public);
                buf.extend_from_slice(&ephemeral[..]);
                buf.extend_from_slice(payload);
                extended = Some(buf);
            }
            None => {
                dh_param = kex::public_key(&ephemeral)?;
                shared_secret = kex::diffie_hellman(&ephemeral, &self.server_public)?;
                extended = None;
            }
        }
        let plaintext: &[u8] = match &extended {
            Some(buf) => buf.as_slice(),
            None => payload,
        };

        let keys = kdf::derive_session_keys(&dh_param, &shared_secret);
        let encoded_header = header.encode();
        let ciphertext =
            aead::aes128gcm_seal(&keys.key, &keys.client_nonce, plaintext, &encoded_header)?;

        let mut request = Vec::with_capacity(packet::BODY_OFFSET + ciphertext.len());
        request.extend_from_slice(&encoded_header);
        request.extend_from_slice(&dh_param);
        request.extend_from_slice(&ciphertext);

        let decoder = ReplyDecoder::new(ReplyContext {
            suite: header.suite,
            client_auth: header.has_client_auth(),
            dh_param,
            keys,
        });

        Ok((request, decoder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pssst_crypto::aead::TAG_SIZE;

    #[test]
    fn test_anonymous_request_layout() {
        let client = Client::new(&[0x77; 32]).unwrap();
        let (request, _decoder) = client.pack(b"hello").unwrap();

        assert_eq!(request.len(), packet::BODY_OFFSET + 5 + TAG_SIZE);
        let header = Header::decode(&request).unwrap();
        assert!(!header.is_reply());
        assert!(!header.has_client_auth());
    }

    #[test]
    fn test_authenticated_request_grows_by_prefix() {
        let client = Client::with_identity(&[0x77; 32], &[0x22; 32]).unwrap();
        assert!(client.is_authenticated());

        let (request, _decoder) = client.pack(b"hello").unwrap();
        assert_eq!(
            request.len(),
            packet::BODY_OFFSET + packet::AUTH_PREFIX_SIZE + 5 + TAG_SIZE
        );
        assert!(Header::decode(&request).unwrap().has_client_auth());
    }

    /// Fresh ephemerals make every pack of the same payload distinct.
    #[test]
    fn test_packets_are_unique_per_pack() {
        let client = Client::new(&[0x77; 32]).unwrap();
        let (a, _) = client.pack(b"same").unwrap();
        let (b, _) = client.pack(b"same").unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn test_key_length_validated() {
        assert!(Client::new(&[0u8; 31]).is_err());
        assert!(Client::with_identity(&[0u8; 32], &[0u8; 16]).is_err());
    }
}
