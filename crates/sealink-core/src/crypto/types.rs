use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of a directional session key.
pub const KEY_SIZE: usize = 32;

/// Size of a seal nonce.
pub const NONCE_SIZE: usize = 24;

/// MAC bytes appended to a sealed message.
pub const MAC_SIZE: usize = 16;

/// Size of an identity signature.
pub const SIGNATURE_SIZE: usize = 64;

/// Size of an identity public key.
pub const IDENTITY_PUBLIC_SIZE: usize = 32;

/// Size of an identity private key.
pub const IDENTITY_SECRET_SIZE: usize = 64;

/// A single X25519 keypair. The secret half is wiped when the value is
/// dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct X25519Keypair {
    pub public: [u8; 32],
    pub secret: [u8; 32],
}

/// A directional symmetric session key. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SessionKey(pub [u8; KEY_SIZE]);

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionKey(..)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nonce24(pub [u8; NONCE_SIZE]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature64(pub [u8; SIGNATURE_SIZE]);

/// Long-term Ed25519 identity private key. Borrowed by the handshake,
/// never retained by a session. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct IdentitySecret(pub [u8; IDENTITY_SECRET_SIZE]);

impl std::fmt::Debug for IdentitySecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("IdentitySecret(..)")
    }
}

/// Long-term Ed25519 identity public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityPublic(pub [u8; IDENTITY_PUBLIC_SIZE]);
