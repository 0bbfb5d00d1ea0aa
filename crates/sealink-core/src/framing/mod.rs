pub mod length_prefixed;
pub mod types;

pub use length_prefixed::*;
pub use types::*;

#[derive(Debug, thiserror::Error)]
pub enum FramingError {
    #[error("unexpected EOF while reading a frame")]
    UnexpectedEof,

    #[error("invalid frame length: zero-length frame")]
    ZeroLengthFrame,

    #[error("frame too large: len={len}, max={max}")]
    FrameTooLarge { len: u32, max: u32 },

    #[error("I/O error: {0}")]
    Io(String),
}

#[cfg(test)]
mod length_prefixed_tests;
