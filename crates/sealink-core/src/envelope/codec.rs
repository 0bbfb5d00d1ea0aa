use crate::envelope::{Envelope, EnvelopeError, MessageType, ENVELOPE_HEADER_SIZE, ENVELOPE_VERSION};
use crate::BUF_SIZE;

/// Serialize a payload into an envelope frame. Multi-byte fields are
/// big-endian; the two pad bytes are written as zero.
pub fn pack(sequence: u32, msg_type: MessageType, message: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
    if sequence == 0 {
        return Err(EnvelopeError::ZeroSequence);
    }

    if message.is_empty() {
        return Err(EnvelopeError::EmptyPayload);
    }

    if message.len() > BUF_SIZE {
        return Err(EnvelopeError::PayloadTooLarge {
            len: message.len(),
            max: BUF_SIZE,
        });
    }

    let mut out = Vec::with_capacity(ENVELOPE_HEADER_SIZE + message.len());
    out.push(ENVELOPE_VERSION);
    out.push(msg_type.to_wire());
    out.extend_from_slice(&[0, 0]);
    out.extend_from_slice(&sequence.to_be_bytes());
    out.extend_from_slice(&(message.len() as u32).to_be_bytes());
    out.extend_from_slice(message);
    Ok(out)
}

/// Strict parser for the envelope frame. Every header field is validated
/// and the declared payload length must account for the remaining bytes
/// exactly.
pub fn unpack(input: &[u8]) -> Result<Envelope, EnvelopeError> {
    if input.len() <= ENVELOPE_HEADER_SIZE {
        return Err(EnvelopeError::Truncated(input.len()));
    }

    let version = input[0];
    if version != ENVELOPE_VERSION {
        return Err(EnvelopeError::UnsupportedVersion(version));
    }

    let msg_type = MessageType::from_wire(input[1]).ok_or(EnvelopeError::InvalidType(input[1]))?;

    if input[2] != 0 || input[3] != 0 {
        return Err(EnvelopeError::NonzeroPad);
    }

    let sequence = u32::from_be_bytes([input[4], input[5], input[6], input[7]]);
    let payload_len = u32::from_be_bytes([input[8], input[9], input[10], input[11]]);

    if payload_len == 0 {
        return Err(EnvelopeError::EmptyPayload);
    }

    if payload_len as usize > BUF_SIZE {
        return Err(EnvelopeError::PayloadTooLarge {
            len: payload_len as usize,
            max: BUF_SIZE,
        });
    }

    let rest = &input[ENVELOPE_HEADER_SIZE..];
    if rest.len() != payload_len as usize {
        return Err(EnvelopeError::LengthMismatch {
            declared: payload_len,
            actual: rest.len(),
        });
    }

    Ok(Envelope {
        version,
        msg_type,
        sequence,
        payload: rest.to_vec(),
    })
}
