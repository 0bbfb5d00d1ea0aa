pub mod dial;
pub mod kex;
pub mod listen;
pub mod types;

pub use dial::dial;
pub use kex::*;
pub use listen::listen;
pub use types::*;

use crate::crypto::CryptoError;

#[derive(Debug, thiserror::Error)]
pub enum HandshakeError {
    #[error("I/O error during key exchange: {0}")]
    Io(#[from] std::io::Error),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("key exchange signature verification failed")]
    BadSignature,
}
