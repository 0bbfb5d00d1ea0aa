use zeroize::Zeroize;

use crate::crypto::{
    CryptoProvider, IdentityPublic, IdentitySecret, SessionKey, Signature64, SIGNATURE_SIZE,
};
use crate::handshake::{
    HandshakeError, KexPublic, KexSecret, Role, SessionKeys, KEX_BLOB_SIZE, KEX_PUB_SIZE,
};

/// Generate a session keypair: two independent X25519 keypairs laid out
/// back to back. Intermediate secret material is wiped as soon as it has
/// been copied out; if the second generation fails, the first half is
/// wiped before the error is returned.
pub async fn generate_session_keypair(
    crypto: &dyn CryptoProvider,
) -> Result<(KexSecret, KexPublic), HandshakeError> {
    let mut sk = KexSecret([0u8; 64]);
    let mut pk = KexPublic([0u8; 64]);

    let first = crypto.box_keypair().await?;
    sk.0[..32].copy_from_slice(&first.secret);
    pk.0[..32].copy_from_slice(&first.public);
    drop(first);

    let second = match crypto.box_keypair().await {
        Ok(kp) => kp,
        Err(e) => {
            sk.zeroize();
            return Err(e.into());
        }
    };
    sk.0[32..].copy_from_slice(&second.secret);
    pk.0[32..].copy_from_slice(&second.public);
    drop(second);

    Ok((sk, pk))
}

/// Sign the public-key region of a KEX blob in place. With no signer the
/// signature region is left as is and the peer decides whether to care.
pub async fn sign_kex(
    crypto: &dyn CryptoProvider,
    blob: &mut [u8; KEX_BLOB_SIZE],
    signer: Option<&IdentitySecret>,
) -> Result<(), HandshakeError> {
    let Some(secret) = signer else {
        return Ok(());
    };

    let sig = crypto.ed25519_sign(&secret.0, &blob[..KEX_PUB_SIZE]).await?;
    blob[KEX_PUB_SIZE..].copy_from_slice(&sig.0);
    Ok(())
}

/// Verify the signature region of a peer's KEX blob. With no verifier any
/// signature region is accepted.
pub async fn verify_kex(
    crypto: &dyn CryptoProvider,
    blob: &[u8; KEX_BLOB_SIZE],
    verifier: Option<&IdentityPublic>,
) -> Result<(), HandshakeError> {
    let Some(public) = verifier else {
        return Ok(());
    };

    let mut sig = [0u8; SIGNATURE_SIZE];
    sig.copy_from_slice(&blob[KEX_PUB_SIZE..]);

    crypto
        .ed25519_verify(&public.0, &blob[..KEX_PUB_SIZE], &Signature64(sig))
        .await
        .map_err(|_| HandshakeError::BadSignature)
}

/// One directional key: precompute over a 32-byte half of our secret and
/// the matching half of the peer's public. The secret half is wiped the
/// moment it has been copied for the scalar multiplication.
async fn link_key(
    crypto: &dyn CryptoProvider,
    secret_half: &mut [u8],
    public_half: &[u8],
) -> Result<SessionKey, HandshakeError> {
    let mut secret = [0u8; 32];
    secret.copy_from_slice(secret_half);
    secret_half.zeroize();

    let mut public = [0u8; 32];
    public.copy_from_slice(public_half);

    let key = crypto.box_precompute(&public, &secret).await;
    secret.zeroize();

    Ok(key?)
}

/// Derive both directional keys from our session secret and the peer's
/// session public. The first 32-byte halves carry the dialer-to-listener
/// link, the second halves the reverse; the role decides which of the two
/// becomes the send key. Consumes (wipes) the secret.
pub async fn derive_session_keys(
    crypto: &dyn CryptoProvider,
    role: Role,
    secret: &mut KexSecret,
    peer: &KexPublic,
) -> Result<SessionKeys, HandshakeError> {
    let dialer_to_listener = link_key(crypto, &mut secret.0[..32], &peer.0[..32]).await?;
    let listener_to_dialer = link_key(crypto, &mut secret.0[32..], &peer.0[32..]).await?;

    Ok(match role {
        Role::Dialer => SessionKeys {
            send: dialer_to_listener,
            recv: listener_to_dialer,
        },
        Role::Listener => SessionKeys {
            send: listener_to_dialer,
            recv: dialer_to_listener,
        },
    })
}
