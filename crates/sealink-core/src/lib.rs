/*
    sealink-core
        protocol core for authenticated, encrypted message channels
        overlaid on any reliable, ordered byte transport.
 */

pub mod error;

pub mod wipe;
pub mod envelope;
pub mod crypto;
pub mod framing;
pub mod handshake;
pub mod session;

pub use error::SealinkError;
pub use session::{Message, Session};

/// Maximum plaintext payload carried by a single envelope.
pub const BUF_SIZE: usize = 2_097_152; // 2 MiB

/// Protocol and cryptographic overhead added to a message when it is
/// sealed: nonce, MAC, and envelope header.
pub const OVERHEAD: usize = 106;
