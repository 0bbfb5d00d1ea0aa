use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use zeroize::Zeroizing;

use crate::crypto::{CryptoProvider, IdentityPublic, IdentitySecret};
use crate::handshake::{
    derive_session_keys, generate_session_keypair, sign_kex, verify_kex, HandshakeError, KexPublic,
    Role, SessionKeys, KEX_BLOB_SIZE, KEX_PUB_SIZE,
};

/// Dialer side of the handshake: send our KEX blob first, then read the
/// peer's. Returns the directional session keys; on any failure every
/// ephemeral buffer is wiped on the way out.
pub async fn dial<C>(
    channel: &mut C,
    crypto: &dyn CryptoProvider,
    signer: Option<&IdentitySecret>,
    verifier: Option<&IdentityPublic>,
) -> Result<SessionKeys, HandshakeError>
where
    C: AsyncRead + AsyncWrite + Unpin + Send,
{
    let (mut sk, pk) = generate_session_keypair(crypto).await?;

    let mut blob = Zeroizing::new([0u8; KEX_BLOB_SIZE]);
    blob[..KEX_PUB_SIZE].copy_from_slice(&pk.0);
    sign_kex(crypto, &mut blob, signer).await?;

    channel.write_all(&*blob).await?;
    channel.flush().await?;

    // The blob buffer is reused for the peer's reply.
    channel.read_exact(&mut *blob).await?;
    verify_kex(crypto, &blob, verifier).await?;

    let mut peer = [0u8; KEX_PUB_SIZE];
    peer.copy_from_slice(&blob[..KEX_PUB_SIZE]);

    derive_session_keys(crypto, Role::Dialer, &mut sk, &KexPublic(peer)).await
}
