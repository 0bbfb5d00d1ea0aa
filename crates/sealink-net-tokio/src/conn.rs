use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};

use sealink_core::crypto::{CryptoProvider, IdentityPublic, IdentitySecret};
use sealink_core::Session;

use crate::NetError;

/// Connect to `addr` and run the dialer side of the handshake. Returns an
/// established session over the TCP stream.
pub async fn dial_tcp(
    addr: &str,
    crypto: Arc<dyn CryptoProvider>,
    signer: Option<&IdentitySecret>,
    verifier: Option<&IdentityPublic>,
) -> Result<Session<TcpStream>, NetError> {
    let stream = TcpStream::connect(addr).await?;
    let session = Session::dial(stream, crypto, signer, verifier).await?;
    Ok(session)
}

/// Accept one TCP connection and run the listener side of the handshake.
/// Returns the established session together with the peer address.
pub async fn accept_tcp(
    listener: &TcpListener,
    crypto: Arc<dyn CryptoProvider>,
    signer: Option<&IdentitySecret>,
    verifier: Option<&IdentityPublic>,
) -> Result<(Session<TcpStream>, SocketAddr), NetError> {
    let (stream, peer) = listener.accept().await?;
    let session = Session::listen(stream, crypto, signer, verifier).await?;
    Ok((session, peer))
}
