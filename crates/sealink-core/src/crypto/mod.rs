pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod test_crypto;

pub use traits::*;
pub use types::*;

#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("randomness generation failed")]
    RngFailure,

    #[error("keypair generation failed")]
    KeypairFailure,

    #[error("key agreement failed")]
    KeyAgreementFailure,

    #[error("signature verification failed")]
    BadSignature,

    #[error("signing failed")]
    SignFailure,

    #[error("sealing failed")]
    SealFailure,

    #[error("open failed: bad MAC or truncated ciphertext")]
    OpenFailure,
}
