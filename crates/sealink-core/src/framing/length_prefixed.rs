use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::framing::{FrameLimits, FramingError};

/// Frame format on the transport:
///   [u32 big-endian length][payload bytes...]
///
/// Reads land in a caller-owned buffer so a session can reuse and wipe a
/// single allocation for its whole lifetime.

/// Map std::io errors into the framing error taxonomy.
fn map_io_err(e: std::io::Error) -> FramingError {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        FramingError::UnexpectedEof
    } else {
        FramingError::Io(e.to_string())
    }
}

/// Read one frame into `buf`, returning the payload length. The length
/// prefix is validated against `limits` before a single payload byte is
/// read.
pub async fn read_frame_into<R>(
    io: &mut R,
    buf: &mut [u8],
    limits: &FrameLimits,
) -> Result<usize, FramingError>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 4];
    io.read_exact(&mut len_buf).await.map_err(map_io_err)?;

    let len = u32::from_be_bytes(len_buf);
    limits.validate_len(len)?;

    if len as usize > buf.len() {
        return Err(FramingError::FrameTooLarge {
            len,
            max: buf.len() as u32,
        });
    }

    io.read_exact(&mut buf[..len as usize])
        .await
        .map_err(map_io_err)?;

    Ok(len as usize)
}

/// Write one length-prefixed frame and flush it.
pub async fn write_frame<W>(
    io: &mut W,
    payload: &[u8],
    limits: &FrameLimits,
) -> Result<(), FramingError>
where
    W: AsyncWrite + Unpin,
{
    let len: u32 = payload.len().try_into().map_err(|_| FramingError::FrameTooLarge {
        len: u32::MAX,
        max: limits.max_frame_len,
    })?;

    limits.validate_len(len)?;

    io.write_all(&len.to_be_bytes()).await.map_err(map_io_err)?;
    io.write_all(payload).await.map_err(map_io_err)?;
    io.flush().await.map_err(map_io_err)?;

    Ok(())
}
