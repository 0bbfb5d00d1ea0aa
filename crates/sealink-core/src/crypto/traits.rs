use async_trait::async_trait;

use crate::crypto::{
    CryptoError, IdentityPublic, IdentitySecret, Nonce24, SessionKey, Signature64, X25519Keypair,
};

// Trait boundary for cryptographic primitives.
// Protocol logic depends on this trait, never on a concrete backend, and
// tests substitute a deterministic provider.
#[async_trait]
pub trait CryptoProvider: Send + Sync + 'static {
    async fn random_bytes(&self, out: &mut [u8]) -> Result<(), CryptoError>;

    async fn box_keypair(&self) -> Result<X25519Keypair, CryptoError>;

    async fn ed25519_keypair(&self) -> Result<(IdentitySecret, IdentityPublic), CryptoError>;

    /// X25519 scalar multiplication followed by the precomputation step the
    /// sealing primitive expects, yielding a ready-to-use symmetric key.
    async fn box_precompute(
        &self,
        peer_public: &[u8; 32],
        own_secret: &[u8; 32],
    ) -> Result<SessionKey, CryptoError>;

    async fn ed25519_sign(&self, secret: &[u8; 64], msg: &[u8]) -> Result<Signature64, CryptoError>;

    async fn ed25519_verify(
        &self,
        public: &[u8; 32],
        msg: &[u8],
        sig: &Signature64,
    ) -> Result<(), CryptoError>;

    /// Authenticated encryption. Ciphertext is plaintext length plus the
    /// MAC; the nonce is supplied by the caller and not included.
    async fn secretbox_seal(
        &self,
        key: &SessionKey,
        nonce: &Nonce24,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;

    async fn secretbox_open(
        &self,
        key: &SessionKey,
        nonce: &Nonce24,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;
}
