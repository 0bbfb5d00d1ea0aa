use crate::framing::FramingError;
use crate::{BUF_SIZE, OVERHEAD};

/// Upper bound on the outer (sealed) frame length. Checked against the
/// length prefix before any payload bytes are read.
#[derive(Debug, Clone, Copy)]
pub struct FrameLimits {
    pub max_frame_len: u32,
}

impl FrameLimits {
    /// Limit for established sessions: the payload cap plus seal overhead.
    pub const SESSION: FrameLimits = FrameLimits {
        max_frame_len: (BUF_SIZE + OVERHEAD) as u32,
    };

    pub fn validate_len(&self, len: u32) -> Result<(), FramingError> {
        if len == 0 {
            return Err(FramingError::ZeroLengthFrame);
        }

        if len > self.max_frame_len {
            return Err(FramingError::FrameTooLarge {
                len,
                max: self.max_frame_len,
            });
        }
        Ok(())
    }
}
