use thiserror::Error;

use crate::{
    crypto::CryptoError,
    envelope::EnvelopeError,
    framing::FramingError,
    handshake::HandshakeError,
    session::SessionError,
};

#[derive(Debug, Error)]
pub enum SealinkError {
    #[error("envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    #[error("handshake error: {0}")]
    Handshake(#[from] HandshakeError),

    #[error("session error: {0}")]
    Session(#[from] SessionError),
}
