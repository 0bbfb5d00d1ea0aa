use std::sync::Arc;

use tokio::net::TcpListener;

use sealink_core::crypto::CryptoProvider;
use sealink_core::envelope::MessageType;
use sealink_crypto_sodium::SodiumCrypto;
use sealink_net_tokio::{accept_tcp, dial_tcp};

#[tokio::test]
async fn tcp_handshake_and_encrypted_round_trip() {
    let crypto: Arc<dyn CryptoProvider> = Arc::new(SodiumCrypto::new());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    let server_crypto = crypto.clone();
    let server = tokio::spawn(async move {
        let (mut session, _peer) = accept_tcp(&listener, server_crypto, None, None)
            .await
            .unwrap();

        // Receive and echo until the client shuts down.
        loop {
            let msg = session.receive().await.unwrap();
            match msg.msg_type {
                MessageType::Normal => session.send(&msg.contents).await.unwrap(),
                MessageType::Shutdown => break,
                MessageType::Kex => {}
            }
        }

        let received = session.recv_ctr();
        session.zero();
        received
    });

    let mut client = dial_tcp(&addr, crypto.clone(), None, None).await.unwrap();

    let payload = b"hello over tcp secure session";
    client.send(payload).await.unwrap();
    let echo = client.receive().await.unwrap();
    assert_eq!(echo.contents, payload);

    client.close().await.unwrap();
    assert!(!client.ready());

    // One normal message plus the shutdown envelope.
    assert_eq!(server.await.unwrap(), 2);
}

#[tokio::test]
async fn tcp_mutual_authentication() {
    let crypto: Arc<dyn CryptoProvider> = Arc::new(SodiumCrypto::new());

    let (client_sk, client_pk) = crypto.ed25519_keypair().await.unwrap();
    let (server_sk, server_pk) = crypto.ed25519_keypair().await.unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    let server_crypto = crypto.clone();
    let server = tokio::spawn(async move {
        let (mut session, _peer) =
            accept_tcp(&listener, server_crypto, Some(&server_sk), Some(&client_pk))
                .await
                .unwrap();

        let msg = session.receive().await.unwrap();
        session.send(&msg.contents).await.unwrap();
        session.zero();
    });

    let mut client = dial_tcp(&addr, crypto.clone(), Some(&client_sk), Some(&server_pk))
        .await
        .unwrap();

    client.send(b"authenticated").await.unwrap();
    assert_eq!(client.receive().await.unwrap().contents, b"authenticated");

    server.await.unwrap();
}

#[tokio::test]
async fn tcp_verifier_rejects_unsigned_dialer() {
    let crypto: Arc<dyn CryptoProvider> = Arc::new(SodiumCrypto::new());
    let (_sk, expected_pk) = crypto.ed25519_keypair().await.unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    let server_crypto = crypto.clone();
    let server = tokio::spawn(async move {
        accept_tcp(&listener, server_crypto, None, Some(&expected_pk))
            .await
            .map(|_| ())
    });

    // Dialing without a signer; the listener hangs up during verification.
    let dialed = dial_tcp(&addr, crypto.clone(), None, None).await;

    assert!(server.await.unwrap().is_err());
    assert!(dialed.is_err());
}

#[tokio::test]
async fn tcp_rekey_mid_stream() {
    let crypto: Arc<dyn CryptoProvider> = Arc::new(SodiumCrypto::new());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    let server_crypto = crypto.clone();
    let server = tokio::spawn(async move {
        let (mut session, _peer) = accept_tcp(&listener, server_crypto, None, None)
            .await
            .unwrap();

        assert_eq!(
            session.receive().await.unwrap().contents,
            b"under first keys"
        );

        // The client's rekey arrives here and is answered internally.
        let kex = session.receive().await.unwrap();
        assert_eq!(kex.msg_type, MessageType::Kex);
        assert!(kex.contents.is_empty());

        let msg = session.receive().await.unwrap();
        assert_eq!(msg.contents, b"under fresh keys");
        assert_eq!(session.recv_ctr(), 3);
    });

    let mut client = dial_tcp(&addr, crypto.clone(), None, None).await.unwrap();

    client.send(b"under first keys").await.unwrap();
    client.rekey().await.unwrap();
    client.send(b"under fresh keys").await.unwrap();

    server.await.unwrap();
    client.zero();
}
