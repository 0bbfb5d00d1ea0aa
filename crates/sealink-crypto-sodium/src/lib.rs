/*
    sealink-crypto-sodium
      - libsodium-based implementation of sealink-core's CryptoProvider.
      - All `unsafe` is confined to `sodium::ffi`.
*/
mod sodium;

use async_trait::async_trait;
use sealink_core::crypto::{
    CryptoError, CryptoProvider, IdentityPublic, IdentitySecret, Nonce24, SessionKey, Signature64,
    X25519Keypair,
};

/// Crypto provider backed by libsodium.
#[derive(Debug, Default, Clone)]
pub struct SodiumCrypto;

impl SodiumCrypto {
    pub fn new() -> Self {
        sodium::init();
        Self
    }
}

#[async_trait]
impl CryptoProvider for SodiumCrypto {
    async fn random_bytes(&self, out: &mut [u8]) -> Result<(), CryptoError> {
        sodium::safe::random_bytes(out)
    }

    async fn box_keypair(&self) -> Result<X25519Keypair, CryptoError> {
        sodium::safe::box_keypair()
    }

    async fn ed25519_keypair(&self) -> Result<(IdentitySecret, IdentityPublic), CryptoError> {
        sodium::safe::ed25519_keypair()
    }

    async fn box_precompute(
        &self,
        peer_public: &[u8; 32],
        own_secret: &[u8; 32],
    ) -> Result<SessionKey, CryptoError> {
        sodium::safe::box_precompute(peer_public, own_secret)
    }

    async fn ed25519_sign(&self, secret: &[u8; 64], msg: &[u8]) -> Result<Signature64, CryptoError> {
        sodium::safe::ed25519_sign(secret, msg)
    }

    async fn ed25519_verify(
        &self,
        public: &[u8; 32],
        msg: &[u8],
        sig: &Signature64,
    ) -> Result<(), CryptoError> {
        sodium::safe::ed25519_verify(public, msg, sig)
    }

    async fn secretbox_seal(
        &self,
        key: &SessionKey,
        nonce: &Nonce24,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        sodium::safe::secretbox_seal(key, nonce, plaintext)
    }

    async fn secretbox_open(
        &self,
        key: &SessionKey,
        nonce: &Nonce24,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        sodium::safe::secretbox_open(key, nonce, ciphertext)
    }
}
