use tokio::io::{self, AsyncWriteExt};

use crate::framing::{read_frame_into, write_frame, FrameLimits, FramingError};

const SMALL: FrameLimits = FrameLimits { max_frame_len: 64 };

#[tokio::test]
async fn round_trip_single_frame() {
    let (mut a, mut b) = io::duplex(4096);
    let mut buf = [0u8; 64];

    write_frame(&mut a, b"hello sealink", &SMALL).await.unwrap();
    let n = read_frame_into(&mut b, &mut buf, &SMALL).await.unwrap();

    assert_eq!(&buf[..n], b"hello sealink");
}

#[tokio::test]
async fn rejects_oversized_length_before_reading_payload() {
    let (mut a, mut b) = io::duplex(4096);
    let mut buf = [0u8; 64];

    // Crafted length prefix past the receiver's max, with no payload behind
    // it. The read must fail on the prefix alone.
    a.write_all(&65u32.to_be_bytes()).await.unwrap();
    a.flush().await.unwrap();

    let err = read_frame_into(&mut b, &mut buf, &SMALL).await.unwrap_err();
    match err {
        FramingError::FrameTooLarge { len, max } => {
            assert_eq!(len, 65);
            assert_eq!(max, 64);
        }
        other => panic!("expected FrameTooLarge, got {other:?}"),
    }
}

#[tokio::test]
async fn rejects_zero_length_frame() {
    let (mut a, mut b) = io::duplex(4096);
    let mut buf = [0u8; 64];

    a.write_all(&0u32.to_be_bytes()).await.unwrap();
    a.flush().await.unwrap();

    let err = read_frame_into(&mut b, &mut buf, &SMALL).await.unwrap_err();
    assert!(matches!(err, FramingError::ZeroLengthFrame));
}

#[tokio::test]
async fn unexpected_eof_reading_length() {
    let (mut a, mut b) = io::duplex(4096);
    let mut buf = [0u8; 64];

    a.write_all(&[0, 0]).await.unwrap();
    drop(a);

    let err = read_frame_into(&mut b, &mut buf, &SMALL).await.unwrap_err();
    assert!(matches!(err, FramingError::UnexpectedEof));
}

#[tokio::test]
async fn unexpected_eof_reading_payload() {
    let (mut a, mut b) = io::duplex(4096);
    let mut buf = [0u8; 64];

    a.write_all(&5u32.to_be_bytes()).await.unwrap();
    a.write_all(&[1, 2]).await.unwrap();
    drop(a);

    let err = read_frame_into(&mut b, &mut buf, &SMALL).await.unwrap_err();
    assert!(matches!(err, FramingError::UnexpectedEof));
}

#[tokio::test]
async fn write_rejects_payload_over_limit() {
    let (mut a, _b) = io::duplex(4096);

    let err = write_frame(&mut a, &[0u8; 65], &SMALL).await.unwrap_err();
    assert!(matches!(err, FramingError::FrameTooLarge { len: 65, max: 64 }));
}

#[tokio::test]
async fn session_limit_matches_buffer_cap() {
    use crate::{BUF_SIZE, OVERHEAD};

    assert_eq!(
        FrameLimits::SESSION.max_frame_len as usize,
        BUF_SIZE + OVERHEAD
    );
}
