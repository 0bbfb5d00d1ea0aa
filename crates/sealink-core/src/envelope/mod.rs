pub mod codec;
pub mod types;

pub use codec::*;
pub use types::*;

#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("sequence number must not be zero")]
    ZeroSequence,

    #[error("empty payload")]
    EmptyPayload,

    #[error("payload too large: {len} bytes, max {max}")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("invalid message type: {0:#x}")]
    InvalidType(u8),

    #[error("unsupported envelope version: {0}")]
    UnsupportedVersion(u8),

    #[error("nonzero padding")]
    NonzeroPad,

    #[error("envelope truncated: {0} bytes")]
    Truncated(usize),

    #[error("declared payload length {declared} does not match {actual} remaining bytes")]
    LengthMismatch { declared: u32, actual: usize },
}
