//! Deterministic provider for protocol tests. The primitives are toy
//! algebra with the same shapes as the real ones: the key agreement is
//! symmetric, signatures bind to the keypair, sealing appends a 16-byte
//! tag. None of it is secure.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::crypto::{
    CryptoError, CryptoProvider, IdentityPublic, IdentitySecret, Nonce24, SessionKey, Signature64,
    X25519Keypair, MAC_SIZE,
};

const PUB_MASK: u8 = 0xa7;

pub(crate) fn mix32(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut acc: u8 = 0x5f;
    for (i, b) in data.iter().enumerate() {
        acc = acc.wrapping_mul(31).wrapping_add(*b).wrapping_add(i as u8);
        out[i % 32] ^= acc;
    }
    for i in 1..32 {
        out[i] = out[i].wrapping_add(out[i - 1].rotate_left(3));
    }
    out
}

fn keystream(key: &[u8; 32], nonce: &[u8; 24], len: usize) -> Vec<u8> {
    let mut seed = Vec::with_capacity(32 + 24);
    seed.extend_from_slice(key);
    seed.extend_from_slice(nonce);

    let mut out = Vec::with_capacity(len);
    let mut block = mix32(&seed);
    while out.len() < len {
        out.extend_from_slice(&block);
        block = mix32(&block);
    }
    out.truncate(len);
    out
}

fn tag16(key: &[u8; 32], nonce: &[u8; 24], ciphertext: &[u8]) -> [u8; MAC_SIZE] {
    let mut buf = Vec::with_capacity(32 + 24 + ciphertext.len());
    buf.extend_from_slice(key);
    buf.extend_from_slice(nonce);
    buf.extend_from_slice(ciphertext);

    let h = mix32(&buf);
    let mut t = [0u8; MAC_SIZE];
    t.copy_from_slice(&h[..MAC_SIZE]);
    t
}

#[derive(Debug, Default)]
pub(crate) struct TestCrypto {
    counter: AtomicU64,
}

impl TestCrypto {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn next_block(&self) -> [u8; 32] {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        mix32(&n.to_be_bytes())
    }
}

#[async_trait]
impl CryptoProvider for TestCrypto {
    async fn random_bytes(&self, out: &mut [u8]) -> Result<(), CryptoError> {
        let mut filled = 0;
        while filled < out.len() {
            let block = self.next_block();
            let n = (out.len() - filled).min(32);
            out[filled..filled + n].copy_from_slice(&block[..n]);
            filled += n;
        }
        Ok(())
    }

    async fn box_keypair(&self) -> Result<X25519Keypair, CryptoError> {
        let secret = self.next_block();
        let mut public = secret;
        for b in &mut public {
            *b ^= PUB_MASK;
        }
        Ok(X25519Keypair { public, secret })
    }

    async fn ed25519_keypair(&self) -> Result<(IdentitySecret, IdentityPublic), CryptoError> {
        let seed = self.next_block();
        let mut tagged = seed.to_vec();
        tagged.extend_from_slice(b"identity");
        let public = mix32(&tagged);

        let mut secret = [0u8; 64];
        secret[..32].copy_from_slice(&seed);
        secret[32..].copy_from_slice(&public);
        Ok((IdentitySecret(secret), IdentityPublic(public)))
    }

    // secret XOR peer_public is symmetric because public = secret XOR mask.
    async fn box_precompute(
        &self,
        peer_public: &[u8; 32],
        own_secret: &[u8; 32],
    ) -> Result<SessionKey, CryptoError> {
        let mut mixed = [0u8; 32];
        for i in 0..32 {
            mixed[i] = own_secret[i] ^ peer_public[i];
        }
        Ok(SessionKey(mix32(&mixed)))
    }

    // The second half of an identity secret is its public key, so the
    // verifier can recompute the same digest.
    async fn ed25519_sign(&self, secret: &[u8; 64], msg: &[u8]) -> Result<Signature64, CryptoError> {
        let mut buf = secret[32..].to_vec();
        buf.extend_from_slice(msg);

        let h1 = mix32(&buf);
        let h2 = mix32(&h1);

        let mut sig = [0u8; 64];
        sig[..32].copy_from_slice(&h1);
        sig[32..].copy_from_slice(&h2);
        Ok(Signature64(sig))
    }

    async fn ed25519_verify(
        &self,
        public: &[u8; 32],
        msg: &[u8],
        sig: &Signature64,
    ) -> Result<(), CryptoError> {
        let mut secret = [0u8; 64];
        secret[32..].copy_from_slice(public);
        let expected = self.ed25519_sign(&secret, msg).await?;

        if expected.0 != sig.0 {
            return Err(CryptoError::BadSignature);
        }
        Ok(())
    }

    async fn secretbox_seal(
        &self,
        key: &SessionKey,
        nonce: &Nonce24,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let stream = keystream(&key.0, &nonce.0, plaintext.len());
        let mut c: Vec<u8> = plaintext
            .iter()
            .zip(stream.iter())
            .map(|(p, s)| p ^ s)
            .collect();

        let tag = tag16(&key.0, &nonce.0, &c);
        c.extend_from_slice(&tag);
        Ok(c)
    }

    async fn secretbox_open(
        &self,
        key: &SessionKey,
        nonce: &Nonce24,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        if ciphertext.len() < MAC_SIZE {
            return Err(CryptoError::OpenFailure);
        }

        let (c, tag) = ciphertext.split_at(ciphertext.len() - MAC_SIZE);
        if tag != tag16(&key.0, &nonce.0, c) {
            return Err(CryptoError::OpenFailure);
        }

        let stream = keystream(&key.0, &nonce.0, c.len());
        Ok(c.iter().zip(stream.iter()).map(|(b, s)| b ^ s).collect())
    }
}
