use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use zeroize::{Zeroize, Zeroizing};

use crate::crypto::{
    CryptoError, CryptoProvider, IdentityPublic, IdentitySecret, Nonce24, SessionKey, NONCE_SIZE,
};
use crate::envelope::{self, EnvelopeError, MessageType};
use crate::framing::{self, FrameLimits, FramingError};
use crate::handshake::{
    self, derive_session_keys, generate_session_keypair, HandshakeError, KexPublic, Role,
    SessionKeys, KEX_PUB_SIZE,
};
use crate::wipe::wipe;
use crate::{BUF_SIZE, OVERHEAD};

/// The insecure byte transport a session runs over. Anything reliable and
/// order-preserving qualifies; short reads and writes are treated as
/// failures by the session.
pub trait Channel: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> Channel for T {}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session is not ready")]
    NotReady,

    #[error("handshake failed: {0}")]
    Handshake(#[from] HandshakeError),

    #[error("envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    #[error("sealed frame too short: {0} bytes")]
    ShortSealedFrame(usize),

    #[error("replayed or reordered frame: sequence {sequence}, last accepted {last}")]
    Replay { sequence: u32, last: u32 },

    #[error("key exchange payload has wrong length: {0} bytes")]
    KexPayload(usize),

    #[error("expected {expected:?} during rekey, got {got:?}")]
    UnexpectedMessage {
        expected: MessageType,
        got: MessageType,
    },
}

/// A message received over the secure channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub msg_type: MessageType,
    pub contents: Vec<u8>,
}

/// An established secure channel. Holds the two directional keys, tracks
/// sequence numbers in both directions, and owns a single receive buffer
/// that is wiped after every frame.
///
/// A session is strictly sequential: exactly one of `send`, `receive`,
/// `rekey`, or `close` may be in flight at a time, which `&mut self`
/// enforces. Any failure after establishment is fatal; callers must
/// [`zero`](Session::zero) the session and discard it.
pub struct Session<C> {
    /// Plaintext envelope bytes received and sent, cumulative.
    recv_bytes: u64,
    send_bytes: u64,

    // Last received and last sent sequence numbers.
    recv_ctr: u32,
    send_ctr: u32,

    recv_key: SessionKey,
    send_key: SessionKey,

    // Incoming sealed frames land here and are wiped after use.
    buf: Box<[u8]>,

    channel: Option<C>,

    // Set between a successful handshake and shutdown or zeroization.
    ready: bool,

    // Set while a rekey we initiated is waiting for the peer's reply.
    kex_in_progress: bool,

    crypto: Arc<dyn CryptoProvider>,
}

impl<C: std::fmt::Debug> std::fmt::Debug for Session<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("recv_bytes", &self.recv_bytes)
            .field("send_bytes", &self.send_bytes)
            .field("recv_ctr", &self.recv_ctr)
            .field("send_ctr", &self.send_ctr)
            .field("recv_key", &self.recv_key)
            .field("send_key", &self.send_key)
            .field("buf", &self.buf)
            .field("channel", &self.channel)
            .field("ready", &self.ready)
            .field("kex_in_progress", &self.kex_in_progress)
            .field("crypto", &"<dyn CryptoProvider>")
            .finish()
    }
}

impl<C: Channel> Session<C> {
    /// Initiate a key exchange over `channel` and return an established
    /// session. With `signer` the exchange is signed; with `verifier` the
    /// peer's signature is required and checked.
    pub async fn dial(
        mut channel: C,
        crypto: Arc<dyn CryptoProvider>,
        signer: Option<&IdentitySecret>,
        verifier: Option<&IdentityPublic>,
    ) -> Result<Self, SessionError> {
        let keys = handshake::dial(&mut channel, crypto.as_ref(), signer, verifier).await?;
        Ok(Self::established(channel, crypto, keys))
    }

    /// Answer a key exchange over `channel` and return an established
    /// session.
    pub async fn listen(
        mut channel: C,
        crypto: Arc<dyn CryptoProvider>,
        signer: Option<&IdentitySecret>,
        verifier: Option<&IdentityPublic>,
    ) -> Result<Self, SessionError> {
        let keys = handshake::listen(&mut channel, crypto.as_ref(), signer, verifier).await?;
        Ok(Self::established(channel, crypto, keys))
    }

    fn established(channel: C, crypto: Arc<dyn CryptoProvider>, keys: SessionKeys) -> Self {
        Session {
            recv_bytes: 0,
            send_bytes: 0,
            recv_ctr: 0,
            send_ctr: 0,
            recv_key: keys.recv,
            send_key: keys.send,
            buf: vec![0u8; BUF_SIZE + OVERHEAD].into_boxed_slice(),
            channel: Some(channel),
            ready: true,
            kex_in_progress: false,
            crypto,
        }
    }

    /// Seal `message` and send it over the channel.
    ///
    /// The sequence counter advances before the envelope is packed, so a
    /// rejected payload (empty or oversized) leaves a gap in the counter
    /// with no frame on the wire. The receiver only requires strict
    /// monotonicity, so the gap is harmless.
    pub async fn send(&mut self, message: &[u8]) -> Result<(), SessionError> {
        if !self.ready {
            return Err(SessionError::NotReady);
        }
        self.emit(MessageType::Normal, message).await
    }

    /// Read the next message from the secure channel.
    ///
    /// A key exchange initiated by the peer is answered internally and
    /// surfaces as a `Kex` message with empty contents. A shutdown
    /// notification surfaces as a `Shutdown` message; the caller should
    /// [`zero`](Session::zero) the session afterwards.
    pub async fn receive(&mut self) -> Result<Message, SessionError> {
        if !self.ready {
            return Err(SessionError::NotReady);
        }

        let plain = self.next_envelope().await?;
        self.extract(plain).await
    }

    /// Rotate both directional keys. Sends a fresh session public key to
    /// the peer and blocks until its answer arrives; messages already in
    /// flight are delivered to the caller through the internal `receive`
    /// before the exchange completes. Counters are not reset.
    pub async fn rekey(&mut self) -> Result<(), SessionError> {
        if !self.ready {
            return Err(SessionError::NotReady);
        }

        let (mut sk, pk) = generate_session_keypair(self.crypto.as_ref()).await?;
        self.emit(MessageType::Kex, &pk.0).await?;
        self.kex_in_progress = true;

        let reply = self.receive().await?;
        if reply.msg_type != MessageType::Kex {
            return Err(SessionError::UnexpectedMessage {
                expected: MessageType::Kex,
                got: reply.msg_type,
            });
        }
        self.kex_in_progress = false;

        if reply.contents.len() != KEX_PUB_SIZE {
            return Err(SessionError::KexPayload(reply.contents.len()));
        }
        let mut peer = [0u8; KEX_PUB_SIZE];
        peer.copy_from_slice(&reply.contents);

        let keys =
            derive_session_keys(self.crypto.as_ref(), Role::Dialer, &mut sk, &KexPublic(peer))
                .await?;
        self.install_keys(keys);
        Ok(())
    }

    /// Tell the peer the channel is going away, then zeroize. The session
    /// is zeroized even if the notification cannot be delivered; the
    /// caller should close the underlying transport afterwards.
    pub async fn close(&mut self) -> Result<(), SessionError> {
        if !self.ready {
            return Err(SessionError::NotReady);
        }

        let result = self.emit(MessageType::Shutdown, &[0]).await;
        self.zero();
        result
    }

    async fn emit(&mut self, msg_type: MessageType, message: &[u8]) -> Result<(), SessionError> {
        self.send_ctr = self.send_ctr.wrapping_add(1);
        let plain = Zeroizing::new(envelope::pack(self.send_ctr, msg_type, message)?);

        let sealed = self.seal(&plain).await?;
        self.send_bytes += plain.len() as u64;
        drop(plain);

        let channel = self.channel.as_mut().ok_or(SessionError::NotReady)?;
        framing::write_frame(channel, &sealed, &FrameLimits::SESSION).await?;
        Ok(())
    }

    async fn seal(&self, plain: &[u8]) -> Result<Vec<u8>, SessionError> {
        let mut nonce = Nonce24([0u8; NONCE_SIZE]);
        self.crypto.random_bytes(&mut nonce.0).await?;

        let boxed = self
            .crypto
            .secretbox_seal(&self.send_key, &nonce, plain)
            .await?;

        let mut out = Vec::with_capacity(NONCE_SIZE + boxed.len());
        out.extend_from_slice(&nonce.0);
        out.extend_from_slice(&boxed);
        Ok(out)
    }

    /// Read one outer frame into the session buffer, open it, and hand
    /// back the plaintext envelope. The used buffer region is wiped before
    /// returning.
    async fn next_envelope(&mut self) -> Result<Zeroizing<Vec<u8>>, SessionError> {
        let channel = self.channel.as_mut().ok_or(SessionError::NotReady)?;
        let n = framing::read_frame_into(channel, &mut self.buf, &FrameLimits::SESSION).await?;

        let opened = self.open(n).await;
        wipe(&mut self.buf, n);

        let plain = opened?;
        self.recv_bytes += plain.len() as u64;
        Ok(plain)
    }

    async fn open(&self, n: usize) -> Result<Zeroizing<Vec<u8>>, SessionError> {
        if n <= NONCE_SIZE {
            return Err(SessionError::ShortSealedFrame(n));
        }

        let mut nonce = Nonce24([0u8; NONCE_SIZE]);
        nonce.0.copy_from_slice(&self.buf[..NONCE_SIZE]);

        let plain = self
            .crypto
            .secretbox_open(&self.recv_key, &nonce, &self.buf[NONCE_SIZE..n])
            .await?;
        Ok(Zeroizing::new(plain))
    }

    async fn extract(&mut self, plain: Zeroizing<Vec<u8>>) -> Result<Message, SessionError> {
        let env = envelope::unpack(&plain)?;
        drop(plain);

        if env.sequence <= self.recv_ctr {
            return Err(SessionError::Replay {
                sequence: env.sequence,
                last: self.recv_ctr,
            });
        }
        self.recv_ctr = env.sequence;

        match env.msg_type {
            MessageType::Normal => Ok(Message {
                msg_type: MessageType::Normal,
                contents: env.payload,
            }),
            MessageType::Kex => {
                if self.kex_in_progress {
                    // We initiated this exchange; rekey() finishes it with
                    // the peer public carried here.
                    return Ok(Message {
                        msg_type: MessageType::Kex,
                        contents: env.payload,
                    });
                }

                self.answer_rekey(&env.payload).await?;
                Ok(Message {
                    msg_type: MessageType::Kex,
                    contents: Vec::new(),
                })
            }
            MessageType::Shutdown => Ok(Message {
                msg_type: MessageType::Shutdown,
                contents: Vec::new(),
            }),
        }
    }

    /// The peer started a key rotation. Answer with a fresh session public
    /// key under the still-current send key, then switch both directions
    /// to the new keys.
    async fn answer_rekey(&mut self, peer_public: &[u8]) -> Result<(), SessionError> {
        if peer_public.len() != KEX_PUB_SIZE {
            return Err(SessionError::KexPayload(peer_public.len()));
        }

        let (mut sk, pk) = generate_session_keypair(self.crypto.as_ref()).await?;
        self.emit(MessageType::Kex, &pk.0).await?;

        let mut peer = [0u8; KEX_PUB_SIZE];
        peer.copy_from_slice(peer_public);

        let keys =
            derive_session_keys(self.crypto.as_ref(), Role::Listener, &mut sk, &KexPublic(peer))
                .await?;
        self.install_keys(keys);
        Ok(())
    }

    fn install_keys(&mut self, keys: SessionKeys) {
        self.send_key = keys.send;
        self.recv_key = keys.recv;
    }
}

impl<C> Session<C> {
    /// True between a successful handshake and shutdown or zeroization.
    pub fn ready(&self) -> bool {
        self.ready
    }

    /// Last sent sequence number.
    pub fn send_ctr(&self) -> u32 {
        self.send_ctr
    }

    /// Last received sequence number.
    pub fn recv_ctr(&self) -> u32 {
        self.recv_ctr
    }

    /// Cumulative plaintext envelope bytes sent.
    pub fn bytes_sent(&self) -> u64 {
        self.send_bytes
    }

    /// Cumulative plaintext envelope bytes received.
    pub fn bytes_received(&self) -> u64 {
        self.recv_bytes
    }

    /// Wipe both session keys and the receive buffer, clear counters and
    /// flags, and drop the transport. Idempotent; the session is unusable
    /// afterwards.
    pub fn zero(&mut self) {
        self.send_key.0.zeroize();
        self.recv_key.0.zeroize();
        wipe(&mut self.buf, 0);
        self.send_bytes = 0;
        self.recv_bytes = 0;
        self.send_ctr = 0;
        self.recv_ctr = 0;
        self.ready = false;
        self.kex_in_progress = false;
        self.channel = None;
    }

    #[cfg(test)]
    fn keys_are_zero(&self) -> bool {
        let zero = |k: &SessionKey| k.0.iter().all(|&b| b == 0);
        zero(&self.send_key) && zero(&self.recv_key)
    }
}

impl<C> Drop for Session<C> {
    fn drop(&mut self) {
        self.zero();
    }
}
