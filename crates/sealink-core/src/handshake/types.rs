use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::SessionKey;

/// Size of the public half of a session keypair: two concatenated X25519
/// public keys.
pub const KEX_PUB_SIZE: usize = 64;

/// Size of the private half of a session keypair: two concatenated X25519
/// scalars.
pub const KEX_SECRET_SIZE: usize = 64;

/// Size of the key exchange blob each side sends exactly once during the
/// handshake: public half followed by a signature region.
pub const KEX_BLOB_SIZE: usize = 128;

/// Which side of the handshake this peer is. The dialer speaks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Dialer,
    Listener,
}

/// Private half of a session keypair. The first 32 bytes carry the
/// dialer-to-listener link, the second 32 bytes the reverse. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KexSecret(pub [u8; KEX_SECRET_SIZE]);

impl std::fmt::Debug for KexSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KexSecret(..)")
    }
}

/// Public half of a session keypair, same split as [`KexSecret`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KexPublic(pub [u8; KEX_PUB_SIZE]);

/// The two directional keys a completed exchange yields. The dialer's send
/// key equals the listener's receive key and vice versa.
#[derive(Debug)]
pub struct SessionKeys {
    pub send: SessionKey,
    pub recv: SessionKey,
}
