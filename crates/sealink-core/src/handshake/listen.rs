use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use zeroize::Zeroizing;

use crate::crypto::{CryptoProvider, IdentityPublic, IdentitySecret};
use crate::handshake::{
    derive_session_keys, generate_session_keypair, sign_kex, verify_kex, HandshakeError, KexPublic,
    Role, SessionKeys, KEX_BLOB_SIZE, KEX_PUB_SIZE,
};

/// Listener side of the handshake: read the dialer's KEX blob, derive keys,
/// then answer with our own signed blob.
pub async fn listen<C>(
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
    channel.read_exact(&mut *blob).await?;
    verify_kex(crypto, &blob, verifier).await?;

    let mut peer = [0u8; KEX_PUB_SIZE];
    peer.copy_from_slice(&blob[..KEX_PUB_SIZE]);

    let keys = derive_session_keys(crypto, Role::Listener, &mut sk, &KexPublic(peer)).await?;

    blob[..KEX_PUB_SIZE].copy_from_slice(&pk.0);
    blob[KEX_PUB_SIZE..].fill(0);
    sign_kex(crypto, &mut blob, signer).await?;

    channel.write_all(&*blob).await?;
    channel.flush().await?;

    Ok(keys)
}
